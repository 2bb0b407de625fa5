//! Money formatting using decimal arithmetic.
//!
//! Amounts are plain [`Decimal`] values in dollars; the console only deals in
//! one currency, so there is no currency tag to carry around.
//!
//! Backend rows are not range-checked on decode, so every derived figure is
//! computed with checked arithmetic and reports [`AmountOverflow`] instead of
//! panicking.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// A derived amount does not fit in a [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount overflow while computing {0}")]
pub struct AmountOverflow(pub &'static str);

/// Records whose derived figures can be checked before anything renders them.
///
/// Implementations run the same derivations the pages use, so a batch that
/// passes can be summarized without error.
pub trait CheckedAmounts: Sized {
    /// # Errors
    ///
    /// Returns `AmountOverflow` if any derived figure overflows.
    fn check_amounts(rows: &[Self]) -> Result<(), AmountOverflow>;
}

/// Sum `amounts`, failing instead of panicking on overflow.
///
/// # Errors
///
/// Returns `AmountOverflow(what)` if the running total overflows.
pub fn checked_total(
    amounts: impl IntoIterator<Item = Decimal>,
    what: &'static str,
) -> Result<Decimal, AmountOverflow> {
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total.checked_add(amount).ok_or(AmountOverflow(what))
    })
}

/// Round an amount to whole cents using banker's rounding.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Format an amount for display, e.g. `$12,345.60` or `-$4.20`.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(Decimal::new(0, 0)), "$0.00");
        assert_eq!(format_money(Decimal::new(42, 1)), "$4.20");
        assert_eq!(format_money(Decimal::new(1_234_560, 2)), "$12,345.60");
        assert_eq!(format_money(Decimal::new(100_000_000, 2)), "$1,000,000.00");
        assert_eq!(format_money(Decimal::new(-420, 2)), "-$4.20");
    }

    #[test]
    fn test_checked_total() {
        assert_eq!(
            checked_total([Decimal::new(150, 2), Decimal::new(250, 2)], "test"),
            Ok(Decimal::new(4, 0))
        );
        assert_eq!(checked_total([], "test"), Ok(Decimal::ZERO));
        assert_eq!(
            checked_total([Decimal::MAX, Decimal::ONE], "stock value"),
            Err(AmountOverflow("stock value"))
        );
    }

    #[test]
    fn test_round_cents_bankers() {
        assert_eq!(round_cents(Decimal::new(54_375, 3)), Decimal::new(5438, 2));
        assert_eq!(round_cents(Decimal::new(54_365, 3)), Decimal::new(5436, 2));
    }
}
