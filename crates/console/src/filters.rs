//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;
use tavola_core::format_money;

/// Formats a decimal amount as dollars: `12345.6` → `$12,345.60`.
///
/// Non-numeric input is passed through unchanged.
///
/// Usage in templates: `{{ item.unit_cost|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let raw = value.to_string();
    Ok(raw.parse::<Decimal>().map_or(raw, format_money))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money_backs_filter() {
        assert_eq!(format_money(Decimal::new(1_234_560, 2)), "$12,345.60");
        assert_eq!("7.5".parse::<Decimal>().map(format_money).ok().as_deref(), Some("$7.50"));
    }
}
