//! Static demo datasets.
//!
//! Served verbatim whenever a page runs in demo mode. Every derived demo
//! figure (alerts, totals, dashboard cards) is computed from these slices with
//! the same functions used for live data, so the two can never drift apart.

use std::sync::LazyLock;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::expenses::Expense;
use crate::inventory::InventoryItem;
use crate::payroll::PayRun;
use crate::staff::Employee;
use crate::types::{EmployeeId, EmploymentStatus, ExpenseId, ItemId, PayRunId, PayRunStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

/// `cents / 100` as a decimal.
fn usd(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    name: &str,
    category: &str,
    quantity: Decimal,
    unit: &str,
    min_quantity: Decimal,
    unit_cost: Decimal,
    supplier: &str,
) -> InventoryItem {
    InventoryItem {
        id: ItemId::new(id),
        name: name.to_owned(),
        category: category.to_owned(),
        quantity,
        unit: unit.to_owned(),
        min_quantity,
        unit_cost,
        supplier: Some(supplier.to_owned()),
    }
}

static INVENTORY: LazyLock<Vec<InventoryItem>> = LazyLock::new(|| {
    let n = |v: i64| Decimal::new(v, 0);
    let tenths = |v: i64| Decimal::new(v, 1);
    vec![
        item("inv-001", "Extra Virgin Olive Oil", "Pantry", n(24), "L", n(10), usd(1250), "Kalamata Groves"),
        item("inv-002", "Feta Cheese", "Dairy", tenths(85), "kg", n(10), usd(1420), "Epirus Dairy Co."),
        item("inv-003", "Greek Yogurt", "Dairy", n(15), "kg", n(8), usd(675), "Epirus Dairy Co."),
        item("inv-004", "Lamb Shoulder", "Meat", n(18), "kg", n(12), usd(1690), "Thessaly Meats"),
        item("inv-005", "Chicken Thighs", "Meat", n(22), "kg", n(15), usd(745), "Thessaly Meats"),
        item("inv-006", "Octopus", "Seafood", tenths(45), "kg", n(6), usd(2480), "Aegean Catch"),
        item("inv-007", "Sea Bass (whole)", "Seafood", n(12), "kg", n(8), usd(1960), "Aegean Catch"),
        item("inv-008", "Kalamata Olives", "Pantry", n(9), "kg", n(5), usd(1130), "Kalamata Groves"),
        item("inv-009", "Vine Tomatoes", "Produce", n(30), "kg", n(20), usd(315), "Attica Farms"),
        item("inv-010", "Cucumbers", "Produce", n(14), "kg", n(15), usd(195), "Attica Farms"),
        item("inv-011", "Red Onions", "Produce", n(25), "kg", n(10), usd(140), "Attica Farms"),
        item("inv-012", "Fresh Oregano", "Produce", tenths(12), "kg", n(1), usd(2800), "Attica Farms"),
        item("inv-013", "Phyllo Dough", "Bakery", n(6), "box", n(10), usd(560), "Athens Bakery Supply"),
        item("inv-014", "Pita Bread", "Bakery", n(120), "pc", n(80), usd(45), "Athens Bakery Supply"),
        item("inv-015", "Assyrtiko White Wine", "Beverages", n(36), "bottle", n(24), usd(1375), "Santorini Cellars"),
        item("inv-016", "Ouzo", "Beverages", n(10), "bottle", n(12), usd(2140), "Lesvos Distillers"),
    ]
});

#[allow(clippy::too_many_arguments)]
fn employee(
    id: &str,
    full_name: &str,
    email: &str,
    position: &str,
    department: &str,
    hourly_rate: Decimal,
    weekly_hours: i64,
    status: EmploymentStatus,
    hire_date: NaiveDate,
) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        position: position.to_owned(),
        department: department.to_owned(),
        hourly_rate,
        weekly_hours: Decimal::new(weekly_hours, 0),
        status,
        hire_date,
    }
}

static EMPLOYEES: LazyLock<Vec<Employee>> = LazyLock::new(|| {
    use EmploymentStatus::{Active, OnLeave};
    vec![
        employee("emp-001", "Nikos Papadopoulos", "nikos@mykonos-mediterranean.com", "General Manager", "Office", usd(4200), 45, Active, date(2019, 4, 1)),
        employee("emp-002", "Elena Vasquez", "elena@mykonos-mediterranean.com", "Floor Manager", "Floor", usd(2850), 40, Active, date(2020, 9, 14)),
        employee("emp-003", "Dimitris Georgiou", "dimitris@mykonos-mediterranean.com", "Head Chef", "Kitchen", usd(3400), 45, Active, date(2019, 5, 20)),
        employee("emp-004", "Sofia Karras", "sofia@mykonos-mediterranean.com", "Line Cook", "Kitchen", usd(1975), 38, Active, date(2022, 2, 7)),
        employee("emp-005", "Marco Rossi", "marco@mykonos-mediterranean.com", "Server", "Floor", usd(1550), 32, Active, date(2023, 6, 1)),
        employee("emp-006", "Ioanna Pappas", "ioanna@mykonos-mediterranean.com", "Bartender", "Bar", usd(1725), 30, Active, date(2021, 11, 15)),
        employee("emp-007", "Yannis Alexiou", "yannis@mykonos-mediterranean.com", "Dishwasher", "Kitchen", usd(1400), 35, OnLeave, date(2024, 1, 8)),
        employee("emp-008", "Katerina Nikolaou", "katerina@mykonos-mediterranean.com", "Host", "Floor", usd(1500), 20, Active, date(2025, 3, 3)),
    ]
});

fn pay_run(
    id: &str,
    period: (NaiveDate, NaiveDate),
    pay_date: NaiveDate,
    status: PayRunStatus,
    gross: Decimal,
    deductions: Decimal,
) -> PayRun {
    PayRun {
        id: PayRunId::new(id),
        period_start: period.0,
        period_end: period.1,
        pay_date,
        status,
        employee_count: 8,
        gross,
        deductions,
    }
}

static PAY_RUNS: LazyLock<Vec<PayRun>> = LazyLock::new(|| {
    vec![
        pay_run("pr-2026-17", (date(2026, 9, 1), date(2026, 9, 15)), date(2026, 9, 18), PayRunStatus::Paid, usd(1_842_560), usd(386_938)),
        pay_run("pr-2026-18", (date(2026, 9, 16), date(2026, 9, 30)), date(2026, 10, 3), PayRunStatus::Paid, usd(1_905_310), usd(400_115)),
        pay_run("pr-2026-19", (date(2026, 10, 1), date(2026, 10, 15)), date(2026, 10, 18), PayRunStatus::Processing, usd(1_876_040), usd(393_968)),
        pay_run("pr-2026-20", (date(2026, 10, 16), date(2026, 10, 31)), date(2026, 11, 3), PayRunStatus::Draft, usd(1_890_000), usd(396_900)),
    ]
});

fn expense(id: &str, on: NaiveDate, category: &str, vendor: &str, description: &str, amount: Decimal) -> Expense {
    Expense {
        id: ExpenseId::new(id),
        date: on,
        category: category.to_owned(),
        vendor: vendor.to_owned(),
        description: description.to_owned(),
        amount,
    }
}

static EXPENSES: LazyLock<Vec<Expense>> = LazyLock::new(|| {
    vec![
        expense("exp-101", date(2026, 10, 1), "Rent", "Harbor Properties", "October lease", usd(850_000)),
        expense("exp-102", date(2026, 10, 2), "Utilities", "City Power & Light", "Electricity, September", usd(126_445)),
        expense("exp-103", date(2026, 10, 2), "Utilities", "Metro Water", "Water and sewer", usd(31_820)),
        expense("exp-104", date(2026, 10, 4), "Food Supplies", "Aegean Catch", "Seafood delivery", usd(214_760)),
        expense("exp-105", date(2026, 10, 6), "Food Supplies", "Attica Farms", "Weekly produce", usd(68_935)),
        expense("exp-106", date(2026, 10, 7), "Repairs", "CoolTech Services", "Walk-in cooler compressor", usd(94_000)),
        expense("exp-107", date(2026, 10, 9), "Marketing", "Local Eats Magazine", "Half-page autumn ad", usd(45_000)),
        expense("exp-108", date(2026, 10, 10), "Linen", "Blue Wave Laundry", "Napkins and aprons", usd(18_650)),
    ]
});

/// The 16-item demo inventory.
#[must_use]
pub fn inventory_items() -> &'static [InventoryItem] {
    &INVENTORY
}

#[must_use]
pub fn employees() -> &'static [Employee] {
    &EMPLOYEES
}

#[must_use]
pub fn pay_runs() -> &'static [PayRun] {
    &PAY_RUNS
}

#[must_use]
pub fn expenses() -> &'static [Expense] {
    &EXPENSES
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::dashboard::dashboard_overview;
    use crate::inventory::{low_stock_alerts, value_summary};

    #[test]
    fn test_inventory_fixture_shape() {
        let items = inventory_items();
        assert_eq!(items.len(), 16);
        let mut ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 16);
    }

    #[test]
    fn test_demo_value_summary_reconciles_to_the_cent() {
        let summary = value_summary(inventory_items()).unwrap();
        assert_eq!(summary.total_value, usd(242_555));
        assert_eq!(
            summary.by_category.iter().map(|c| c.value).sum::<Decimal>(),
            summary.total_value
        );

        let by_name: Vec<(&str, Decimal)> = summary
            .by_category
            .iter()
            .map(|c| (c.category.as_str(), c.value))
            .collect();
        assert_eq!(
            by_name,
            [
                ("Bakery", usd(8_760)),
                ("Beverages", usd(70_900)),
                ("Dairy", usd(22_195)),
                ("Meat", usd(46_810)),
                ("Pantry", usd(40_170)),
                ("Produce", usd(19_040)),
                ("Seafood", usd(34_680)),
            ]
        );
    }

    #[test]
    fn test_demo_value_summary_is_idempotent() {
        assert_eq!(value_summary(inventory_items()), value_summary(inventory_items()));
        assert!(value_summary(inventory_items()).is_ok());
    }

    #[test]
    fn test_demo_alerts() {
        let names: Vec<String> = low_stock_alerts(inventory_items())
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, ["Feta Cheese", "Octopus", "Cucumbers", "Phyllo Dough", "Ouzo"]);
    }

    #[test]
    fn test_demo_pay_runs_are_consistent() {
        for run in pay_runs() {
            assert!(run.period_start < run.period_end);
            assert!(run.period_end < run.pay_date);
            assert!(run.net().unwrap() > Decimal::ZERO);
        }
    }

    #[test]
    fn test_demo_dashboard_overview() {
        let overview =
            dashboard_overview(inventory_items(), employees(), pay_runs(), expenses()).unwrap();
        assert_eq!(overview.inventory_value, usd(242_555));
        assert_eq!(overview.low_stock_count, 5);
        assert_eq!(overview.active_staff, 7);
        assert_eq!(overview.last_net_payroll, Some(usd(1_905_310) - usd(400_115)));
        assert_eq!(overview.pending_pay_runs, 2);
    }

    #[test]
    fn test_demo_amounts_are_in_range() {
        use crate::types::CheckedAmounts;

        assert!(InventoryItem::check_amounts(inventory_items()).is_ok());
        assert!(Employee::check_amounts(employees()).is_ok());
        assert!(PayRun::check_amounts(pay_runs()).is_ok());
        assert!(Expense::check_amounts(expenses()).is_ok());
    }

    #[test]
    fn test_usd_helper() {
        assert_eq!(usd(1250), Decimal::new(1250, 2));
        assert_eq!(usd(-5), Decimal::new(-5, 2));
    }
}
