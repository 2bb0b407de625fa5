//! Inventory items and the figures derived from them.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{AmountOverflow, CheckedAmounts, ItemId, round_cents};

/// A stocked ingredient or supply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub unit: String,
    /// Reorder threshold; stock strictly below it raises an alert.
    pub min_quantity: Decimal,
    pub unit_cost: Decimal,
    #[serde(default)]
    pub supplier: Option<String>,
}

impl InventoryItem {
    /// Stock value (`quantity × unit_cost`), rounded to cents. `None` on
    /// overflow.
    #[must_use]
    pub fn value(&self) -> Option<Decimal> {
        self.quantity.checked_mul(self.unit_cost).map(round_cents)
    }

    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < self.min_quantity
    }
}

/// An item that has dropped below its reorder threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockAlert {
    pub item_id: ItemId,
    pub name: String,
    pub category: String,
    pub quantity: Decimal,
    pub min_quantity: Decimal,
    pub unit: String,
    /// How much is needed to get back to the threshold.
    pub shortfall: Decimal,
}

/// Items below their minimum, in input order.
///
/// # Errors
///
/// Returns `AmountOverflow` if a shortfall does not fit in a `Decimal`.
pub fn low_stock_alerts(items: &[InventoryItem]) -> Result<Vec<LowStockAlert>, AmountOverflow> {
    items
        .iter()
        .filter(|item| item.is_low_stock())
        .map(|item| {
            Ok(LowStockAlert {
                item_id: item.id.clone(),
                name: item.name.clone(),
                category: item.category.clone(),
                quantity: item.quantity,
                min_quantity: item.min_quantity,
                unit: item.unit.clone(),
                shortfall: item
                    .min_quantity
                    .checked_sub(item.quantity)
                    .ok_or(AmountOverflow("stock shortfall"))?,
            })
        })
        .collect()
}

/// Stock value of one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryValue {
    pub category: String,
    pub item_count: usize,
    pub value: Decimal,
}

/// Stock value overall and per category.
///
/// `by_category` is sorted by category name and its values always add up to
/// `total_value` exactly: both are sums of the same cent-rounded item values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueSummary {
    pub total_value: Decimal,
    pub item_count: usize,
    pub by_category: Vec<CategoryValue>,
}

/// # Errors
///
/// Returns `AmountOverflow` if an item value or a running total overflows.
pub fn value_summary(items: &[InventoryItem]) -> Result<ValueSummary, AmountOverflow> {
    let overflow = AmountOverflow("stock value");
    let mut categories: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    let mut total_value = Decimal::ZERO;

    for item in items {
        let value = item.value().ok_or(overflow)?;
        total_value = total_value.checked_add(value).ok_or(overflow)?;
        let entry = categories
            .entry(item.category.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 = entry.1.checked_add(value).ok_or(overflow)?;
    }

    Ok(ValueSummary {
        total_value,
        item_count: items.len(),
        by_category: categories
            .into_iter()
            .map(|(category, (item_count, value))| CategoryValue {
                category: category.to_owned(),
                item_count,
                value,
            })
            .collect(),
    })
}

impl CheckedAmounts for InventoryItem {
    fn check_amounts(rows: &[Self]) -> Result<(), AmountOverflow> {
        value_summary(rows)?;
        low_stock_alerts(rows)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, category: &str, quantity: Decimal, min: Decimal, cost: Decimal) -> InventoryItem {
        InventoryItem {
            id: ItemId::new(id),
            name: id.to_owned(),
            category: category.to_owned(),
            quantity,
            unit: "kg".to_owned(),
            min_quantity: min,
            unit_cost: cost,
            supplier: None,
        }
    }

    #[test]
    fn test_alerts_are_strictly_below_minimum() {
        let items = vec![
            item("a", "Produce", Decimal::new(2, 0), Decimal::new(5, 0), Decimal::ONE),
            item("b", "Produce", Decimal::new(5, 0), Decimal::new(5, 0), Decimal::ONE),
            item("c", "Dairy", Decimal::new(9, 0), Decimal::new(5, 0), Decimal::ONE),
        ];

        let alerts = low_stock_alerts(&items).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts.first().map(|a| a.item_id.as_str()), Some("a"));
        assert_eq!(alerts.first().map(|a| a.shortfall), Some(Decimal::new(3, 0)));
    }

    #[test]
    fn test_value_summary_groups_and_sorts() {
        let items = vec![
            item("a", "Seafood", Decimal::new(125, 1), Decimal::ZERO, Decimal::new(435, 2)),
            item("b", "Dairy", Decimal::new(3, 0), Decimal::ZERO, Decimal::new(1999, 2)),
            item("c", "Seafood", Decimal::new(1, 0), Decimal::ZERO, Decimal::new(2250, 2)),
        ];

        let summary = value_summary(&items).unwrap();
        // 12.5 × 4.35 = 54.375 → 54.38; 3 × 19.99 = 59.97; 22.50
        assert_eq!(summary.total_value, Decimal::new(13685, 2));
        assert_eq!(summary.item_count, 3);
        let names: Vec<&str> = summary.by_category.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, ["Dairy", "Seafood"]);
        assert_eq!(
            summary.by_category.iter().map(|c| c.value).sum::<Decimal>(),
            summary.total_value
        );
    }

    #[test]
    fn test_value_summary_empty() {
        let summary = value_summary(&[]).unwrap();
        assert_eq!(summary.total_value, Decimal::ZERO);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_value_overflow_is_an_error() {
        let huge = Decimal::new(10_000_000_000_000_000, 0);
        let items = vec![
            item("a", "Pantry", Decimal::ONE, Decimal::ZERO, Decimal::ONE),
            item("b", "Pantry", huge, Decimal::ZERO, huge),
        ];

        assert_eq!(items.get(1).and_then(InventoryItem::value), None);
        assert_eq!(value_summary(&items), Err(AmountOverflow("stock value")));
        assert!(InventoryItem::check_amounts(&items).is_err());
    }

    #[test]
    fn test_running_total_overflow_is_an_error() {
        let items = vec![
            item("a", "Pantry", Decimal::ONE, Decimal::ZERO, Decimal::MAX),
            item("b", "Dairy", Decimal::ONE, Decimal::ZERO, Decimal::MAX),
        ];
        assert!(value_summary(&items).is_err());
    }

    #[test]
    fn test_shortfall_overflow_is_an_error() {
        let items = vec![item("a", "Pantry", Decimal::MIN, Decimal::MAX, Decimal::ZERO)];
        assert_eq!(low_stock_alerts(&items), Err(AmountOverflow("stock shortfall")));
    }
}
