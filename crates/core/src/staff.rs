//! Staff roster.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AmountOverflow, CheckedAmounts, EmployeeId, EmploymentStatus, checked_total, round_cents};

/// A member of staff as listed on the staff page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    pub email: String,
    /// Job title, e.g. "Line Cook".
    pub position: String,
    /// Kitchen, floor, bar or office.
    pub department: String,
    pub hourly_rate: Decimal,
    pub weekly_hours: Decimal,
    #[serde(default)]
    pub status: EmploymentStatus,
    pub hire_date: NaiveDate,
}

impl Employee {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, EmploymentStatus::Active)
    }

    /// Scheduled weekly pay before deductions.
    /// `None` on overflow.
    #[must_use]
    pub fn weekly_pay(&self) -> Option<Decimal> {
        self.hourly_rate
            .checked_mul(self.weekly_hours)
            .map(round_cents)
    }
}

/// Headcount and scheduled cost of the active roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaffSummary {
    pub headcount: usize,
    pub active: usize,
    pub on_leave: usize,
    /// Sum of `weekly_pay` over active staff.
    pub weekly_payroll: Decimal,
}

/// # Errors
///
/// Returns `AmountOverflow` if the weekly payroll overflows.
pub fn staff_summary(employees: &[Employee]) -> Result<StaffSummary, AmountOverflow> {
    let active: Vec<&Employee> = employees.iter().filter(|e| e.is_active()).collect();
    let weekly_pay = active
        .iter()
        .map(|e| e.weekly_pay().ok_or(AmountOverflow("weekly pay")))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StaffSummary {
        headcount: employees
            .iter()
            .filter(|e| e.status != EmploymentStatus::Terminated)
            .count(),
        active: active.len(),
        on_leave: employees
            .iter()
            .filter(|e| e.status == EmploymentStatus::OnLeave)
            .count(),
        weekly_payroll: checked_total(weekly_pay, "weekly payroll")?,
    })
}

impl CheckedAmounts for Employee {
    fn check_amounts(rows: &[Self]) -> Result<(), AmountOverflow> {
        staff_summary(rows).map(drop)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn employee(id: &str, rate: i64, hours: i64, status: EmploymentStatus) -> Employee {
        Employee {
            id: EmployeeId::new(id),
            full_name: id.to_owned(),
            email: format!("{id}@example.com"),
            position: "Server".to_owned(),
            department: "Floor".to_owned(),
            hourly_rate: Decimal::new(rate, 2),
            weekly_hours: Decimal::new(hours, 0),
            status,
            hire_date: NaiveDate::default(),
        }
    }

    #[test]
    fn test_summary_counts_only_active_pay() {
        let staff = vec![
            employee("a", 1850, 40, EmploymentStatus::Active),
            employee("b", 2000, 30, EmploymentStatus::OnLeave),
            employee("c", 1500, 20, EmploymentStatus::Terminated),
            employee("d", 1600, 25, EmploymentStatus::Active),
        ];

        let summary = staff_summary(&staff).unwrap();
        assert_eq!(summary.headcount, 3);
        assert_eq!(summary.active, 2);
        assert_eq!(summary.on_leave, 1);
        // 18.50 × 40 + 16.00 × 25
        assert_eq!(summary.weekly_payroll, Decimal::new(114_000, 2));
    }

    #[test]
    fn test_pay_overflow_is_an_error() {
        let mut staff = vec![employee("a", 1850, 40, EmploymentStatus::Active)];
        staff.push(Employee {
            hourly_rate: Decimal::MAX,
            ..employee("b", 0, 40, EmploymentStatus::Active)
        });

        assert_eq!(staff.get(1).and_then(Employee::weekly_pay), None);
        assert_eq!(staff_summary(&staff), Err(AmountOverflow("weekly pay")));
    }
}
