//! Pay runs and payroll totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AmountOverflow, CheckedAmounts, PayRunId, PayRunStatus, checked_total};

/// One payroll cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRun {
    pub id: PayRunId,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    pub pay_date: NaiveDate,
    #[serde(default)]
    pub status: PayRunStatus,
    pub employee_count: u32,
    pub gross: Decimal,
    pub deductions: Decimal,
}

impl PayRun {
    /// Take-home total; always `gross - deductions`.
    /// Gross minus deductions; `None` on overflow.
    #[must_use]
    pub fn net(&self) -> Option<Decimal> {
        self.gross.checked_sub(self.deductions)
    }
}

/// Totals across pay runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollSummary {
    pub run_count: usize,
    pub total_gross: Decimal,
    pub total_deductions: Decimal,
    pub total_net: Decimal,
    /// Pay date of the most recent paid run.
    pub last_paid: Option<NaiveDate>,
    /// Net amount of the most recent paid run.
    pub last_net: Option<Decimal>,
    /// Runs not yet paid out.
    pub pending_runs: usize,
}

/// # Errors
///
/// Returns `AmountOverflow` if a net amount or a total overflows.
pub fn payroll_summary(runs: &[PayRun]) -> Result<PayrollSummary, AmountOverflow> {
    let nets = runs
        .iter()
        .map(|r| r.net().ok_or(AmountOverflow("net pay")))
        .collect::<Result<Vec<_>, _>>()?;

    let last_paid_run = runs
        .iter()
        .filter(|r| r.status == PayRunStatus::Paid)
        .max_by_key(|r| r.pay_date);

    Ok(PayrollSummary {
        run_count: runs.len(),
        total_gross: checked_total(runs.iter().map(|r| r.gross), "gross pay")?,
        total_deductions: checked_total(runs.iter().map(|r| r.deductions), "deductions")?,
        total_net: checked_total(nets, "net pay")?,
        last_paid: last_paid_run.map(|r| r.pay_date),
        last_net: last_paid_run.and_then(PayRun::net),
        pending_runs: runs
            .iter()
            .filter(|r| r.status != PayRunStatus::Paid)
            .count(),
    })
}

impl CheckedAmounts for PayRun {
    fn check_amounts(rows: &[Self]) -> Result<(), AmountOverflow> {
        payroll_summary(rows).map(drop)
    }
}
