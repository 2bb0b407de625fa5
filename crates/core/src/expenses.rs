//! Operating expenses.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AmountOverflow, CheckedAmounts, ExpenseId, checked_total};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub category: String,
    pub vendor: String,
    pub description: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub count: usize,
    pub total: Decimal,
}

/// Expense totals; `by_category` sums to `total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub by_category: Vec<CategoryTotal>,
    /// Highest-spend category, ties broken by name.
    pub top_category: Option<String>,
}

/// # Errors
///
/// Returns `AmountOverflow` if a category total overflows.
pub fn expense_summary(expenses: &[Expense]) -> Result<ExpenseSummary, AmountOverflow> {
    let mut categories: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for expense in expenses {
        let entry = categories
            .entry(expense.category.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry
            .1
            .checked_add(expense.amount)
            .ok_or(AmountOverflow("expense total"))?;
    }

    let by_category: Vec<CategoryTotal> = categories
        .into_iter()
        .map(|(category, (count, total))| CategoryTotal {
            category: category.to_owned(),
            count,
            total,
        })
        .collect();

    // BTreeMap order is by name, so the first maximum wins ties.
    let top_category = by_category
        .iter()
        .fold(None::<&CategoryTotal>, |best, c| match best {
            Some(b) if b.total >= c.total => Some(b),
            _ => Some(c),
        })
        .map(|c| c.category.clone());

    Ok(ExpenseSummary {
        total: checked_total(by_category.iter().map(|c| c.total), "expense total")?,
        by_category,
        top_category,
    })
}

impl CheckedAmounts for Expense {
    fn check_amounts(rows: &[Self]) -> Result<(), AmountOverflow> {
        expense_summary(rows).map(drop)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn expense(category: &str, cents: i64) -> Expense {
        Expense {
            id: ExpenseId::new(format!("exp-{category}-{cents}")),
            date: NaiveDate::default(),
            category: category.to_owned(),
            vendor: "Vendor".to_owned(),
            description: String::new(),
            amount: Decimal::new(cents, 2),
        }
    }

    #[test]
    fn test_summary_by_category() {
        let summary = expense_summary(&[
            expense("Utilities", 45_000),
            expense("Rent", 600_000),
            expense("Utilities", 12_550),
        ])
        .unwrap();

        assert_eq!(summary.total, Decimal::new(657_550, 2));
        assert_eq!(summary.by_category.len(), 2);
        assert_eq!(summary.top_category.as_deref(), Some("Rent"));
    }

    #[test]
    fn test_top_category_tie_breaks_by_name() {
        let summary = expense_summary(&[expense("Repairs", 100), expense("Linen", 100)]).unwrap();
        assert_eq!(summary.top_category.as_deref(), Some("Linen"));
    }

    #[test]
    fn test_empty() {
        let summary = expense_summary(&[]).unwrap();
        assert_eq!(summary.total, Decimal::ZERO);
        assert_eq!(summary.top_category, None);
    }

    #[test]
    fn test_overflow_across_categories() {
        let mut rent = expense("Rent", 0);
        rent.amount = Decimal::MAX;
        let mut repairs = expense("Repairs", 0);
        repairs.amount = Decimal::MAX;

        assert_eq!(
            expense_summary(&[rent, repairs]),
            Err(AmountOverflow("expense total"))
        );
    }
}
