//! Monetary amounts. The database stores minor units (kobo, i64); the API
//! boundary uses rust_decimal so JSON numbers stay exact.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Converts a decimal naira amount to minor units.
/// Returns None for sub-kobo precision or values outside i64 range.
pub fn minor_from_decimal(amount: Decimal) -> Option<i64> {
    let scaled = amount.checked_mul(Decimal::ONE_HUNDRED)?;
    if !scaled.fract().is_zero() {
        return None;
    }
    scaled.trunc().to_i64()
}

pub fn decimal_from_minor(minor: i64) -> Decimal {
    Decimal::new(minor, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn whole_and_fractional_naira() {
        assert_eq!(minor_from_decimal(Decimal::from(25)), Some(2_500));
        assert_eq!(minor_from_decimal(Decimal::from_str("24.99").unwrap()), Some(2_499));
        assert_eq!(minor_from_decimal(Decimal::from_str("1000.01").unwrap()), Some(100_001));
    }

    #[test]
    fn sub_kobo_precision_rejected() {
        assert_eq!(minor_from_decimal(Decimal::from_str("25.005").unwrap()), None);
    }

    #[test]
    fn minor_round_trip() {
        assert_eq!(decimal_from_minor(2_500), Decimal::from_str("25.00").unwrap());
        assert_eq!(minor_from_decimal(decimal_from_minor(99_999)), Some(99_999));
    }
}
