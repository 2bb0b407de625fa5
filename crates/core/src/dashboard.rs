//! Headline figures for the dashboard page.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::expenses::{Expense, expense_summary};
use crate::inventory::{InventoryItem, low_stock_alerts, value_summary};
use crate::payroll::{PayRun, payroll_summary};
use crate::staff::{Employee, staff_summary};
use crate::types::AmountOverflow;

/// Everything the dashboard cards show, derived from the per-domain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardOverview {
    pub inventory_value: Decimal,
    pub low_stock_count: usize,
    pub active_staff: usize,
    pub weekly_payroll: Decimal,
    pub expenses_total: Decimal,
    pub last_net_payroll: Option<Decimal>,
    pub pending_pay_runs: usize,
}

/// # Errors
///
/// Returns `AmountOverflow` if any per-domain summary overflows.
pub fn dashboard_overview(
    items: &[InventoryItem],
    employees: &[Employee],
    pay_runs: &[PayRun],
    expenses: &[Expense],
) -> Result<DashboardOverview, AmountOverflow> {
    let staff = staff_summary(employees)?;
    let payroll = payroll_summary(pay_runs)?;

    Ok(DashboardOverview {
        inventory_value: value_summary(items)?.total_value,
        low_stock_count: low_stock_alerts(items)?.len(),
        active_staff: staff.active,
        weekly_payroll: staff.weekly_payroll,
        expenses_total: expense_summary(expenses)?.total,
        last_net_payroll: payroll.last_net,
        pending_pay_runs: payroll.pending_runs,
    })
}
