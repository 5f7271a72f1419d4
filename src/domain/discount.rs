use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::coupon::DiscountPercent;

/// Number of fractional digits kept for every stored price.
pub const PRICE_SCALE: u32 = 4;

/// Round a price to [`PRICE_SCALE`] digits and pad it to that scale.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut rounded = price.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(PRICE_SCALE);
    rounded
}

/// Apply a flat percentage discount to `base_price`.
///
/// Callers guarantee `base_price >= 0`; with a percent in `[0, 100)` the
/// result is never negative. Prices too large to multiply exactly are
/// divided first; if that overflows too, `base_price` is returned unchanged.
pub fn apply_discount(base_price: Decimal, percent: DiscountPercent) -> Decimal {
    if percent.is_zero() {
        return base_price;
    }

    let remaining = Decimal::ONE_HUNDRED - percent.value();
    base_price
        .checked_mul(remaining)
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .or_else(|| {
            base_price
                .checked_div(Decimal::ONE_HUNDRED)
                .and_then(|share| share.checked_mul(remaining))
        })
        .map(normalize_price)
        .unwrap_or(base_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn percent(value: &str) -> DiscountPercent {
        DiscountPercent::new(dec(value)).unwrap()
    }

    #[test]
    fn zero_percent_returns_base_untouched() {
        let base = dec("19.99");
        let result = apply_discount(base, DiscountPercent::ZERO);
        assert_eq!(result, base);
        assert_eq!(result.scale(), 2);
    }

    #[test]
    fn ten_percent_off_phone() {
        let result = apply_discount(dec("300.00"), percent("10"));
        assert_eq!(result.to_string(), "270.0000");
    }

    #[test]
    fn fractional_percent_is_exact() {
        assert_eq!(apply_discount(dec("100"), percent("12.5")), dec("87.5"));
        assert_eq!(apply_discount(dec("0.10"), percent("33")), dec("0.067"));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        // 0.00015 * 0.5 = 0.000075 -> 0.0001
        assert_eq!(apply_discount(dec("0.00015"), percent("50")), dec("0.0001"));
    }

    #[test]
    fn never_negative_near_upper_bound() {
        let result = apply_discount(dec("1000"), percent("99.9999"));
        assert!(result >= Decimal::ZERO);
        assert_eq!(result, dec("0.001"));
    }

    #[test]
    fn huge_price_does_not_overflow() {
        let base = Decimal::MAX;

        let result = apply_discount(base, percent("10"));

        let expected = normalize_price(base / Decimal::ONE_HUNDRED * Decimal::from(90));
        assert_eq!(result, expected);
        assert!(result < base);
        assert!(result > Decimal::ZERO);
    }

    #[test]
    fn repeated_application_from_same_base_is_stable() {
        let base = dec("100");
        let first = apply_discount(base, percent("10"));
        let second = apply_discount(base, percent("10"));
        assert_eq!(first, second);
        assert_eq!(first, dec("90"));
    }
}
