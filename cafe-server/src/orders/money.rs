//! Money arithmetic for order pricing
//!
//! All monetary values are `rust_decimal::Decimal` end to end. Sums and line
//! totals are computed exactly; rounding to 2 decimal places (half-up) only
//! happens when a value is produced for storage or display.

use rust_decimal::prelude::*;
use shared::{AppError, AppResult};

/// Monetary scale: 2 decimal places
pub const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per unit (1,000,000.00)
pub const MAX_UNIT_PRICE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Maximum allowed quantity per order line
pub const MAX_QUANTITY: i64 = 9999;

/// Round a monetary value to 2 decimal places, half-up
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Canonical 2-decimal display string: `9.50`, `5.00`
pub fn format_money(value: Decimal) -> String {
    format!("{:.2}", round_money(value))
}

/// Validate a price: non-negative, capped, at most 2 decimal places
pub fn validate_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "price must be non-negative, got {price}"
        )));
    }
    if price > MAX_UNIT_PRICE {
        return Err(AppError::validation(format!(
            "price exceeds maximum allowed ({MAX_UNIT_PRICE}), got {price}"
        )));
    }
    if round_money(price) != price {
        return Err(AppError::validation(format!(
            "price must have at most {DECIMAL_PLACES} decimal places, got {price}"
        )));
    }
    Ok(())
}

/// Validate an order line quantity: positive and within bounds
pub fn validate_quantity(quantity: i64) -> AppResult<()> {
    if quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {quantity}"
        )));
    }
    if quantity > MAX_QUANTITY {
        return Err(AppError::validation(format!(
            "quantity exceeds maximum allowed ({MAX_QUANTITY}), got {quantity}"
        )));
    }
    Ok(())
}

/// Line total for one order item
///
/// Formula: unit_price * quantity
pub fn line_total(unit_price: Decimal, quantity: i64) -> Decimal {
    round_money(unit_price * Decimal::from(quantity))
}

/// Order total as the exact sum of line totals
pub fn order_total<I>(line_totals: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    round_money(line_totals.into_iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_decimal_addition_is_exact() {
        // Classic floating point problem: 0.1 + 0.2 != 0.3
        let sum_f64 = 0.1_f64 + 0.2_f64;
        assert_ne!(sum_f64, 0.3);

        // Decimal succeeds
        assert_eq!(dec("0.1") + dec("0.2"), dec("0.3"));
    }

    #[test]
    fn test_three_dimes_sum_to_exactly_thirty_cents() {
        let total = order_total([dec("0.10"), dec("0.10"), dec("0.10")]);
        assert_eq!(total, dec("0.30"));
        assert_eq!(format_money(total), "0.30");
    }

    #[test]
    fn test_nine_fifty_survives_roundtrip() {
        // 9.50 must stay 9.50, never 9.499999...
        let price = dec("9.50");
        assert_eq!(round_money(price), price);
        assert_eq!(format_money(price), "9.50");
    }

    #[test]
    fn test_accumulation_precision() {
        // Sum 0.01 one thousand times
        let mut total = Decimal::ZERO;
        for _ in 0..1000 {
            total += dec("0.01");
        }
        assert_eq!(total, dec("10.00"));
        assert_eq!(format_money(total), "10.00");
    }

    #[test]
    fn test_line_total_two_espressos() {
        // 2 x 2.50 = 5.00
        let total = line_total(dec("2.50"), 2);
        assert_eq!(total, dec("5.00"));
        assert_eq!(format_money(total), "5.00");
    }

    #[test]
    fn test_line_total_large_quantity() {
        let total = line_total(dec("999999.99"), 9999);
        assert_eq!(total, dec("9999899890.01"));
    }

    #[test]
    fn test_order_total_sums_lines() {
        let total = order_total([dec("5.00"), dec("4.50")]);
        assert_eq!(total, dec("9.50"));
    }

    #[test]
    fn test_order_total_empty_is_zero() {
        assert_eq!(order_total([]), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_half_up() {
        // 0.005 rounds up to 0.01, 0.004 rounds down to 0.00
        assert_eq!(round_money(dec("0.005")), dec("0.01"));
        assert_eq!(round_money(dec("0.004")), dec("0.00"));
        // away from zero on the negative side
        assert_eq!(round_money(dec("-0.005")), dec("-0.01"));
    }

    #[test]
    fn test_format_money_pads_to_two_places() {
        assert_eq!(format_money(dec("9.5")), "9.50");
        assert_eq!(format_money(dec("5")), "5.00");
        assert_eq!(format_money(Decimal::ZERO), "0.00");
    }

    // ========================================================================
    // 价格与数量校验
    // ========================================================================

    #[test]
    fn test_validate_price_accepts_valid() {
        assert!(validate_price(Decimal::ZERO).is_ok());
        assert!(validate_price(dec("2.50")).is_ok());
        assert!(validate_price(dec("10.00")).is_ok());
        assert!(validate_price(MAX_UNIT_PRICE).is_ok());
    }

    #[test]
    fn test_validate_price_rejects_negative() {
        assert!(validate_price(dec("-0.01")).is_err());
    }

    #[test]
    fn test_validate_price_rejects_over_cap() {
        assert!(validate_price(MAX_UNIT_PRICE + dec("0.01")).is_err());
    }

    #[test]
    fn test_validate_price_rejects_sub_cent_precision() {
        // 三位小数被拒绝
        assert!(validate_price(dec("1.005")).is_err());
        // 仅多余的尾零是合法的
        assert!(validate_price(dec("1.500")).is_ok());
    }

    #[test]
    fn test_validate_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_QUANTITY).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_QUANTITY + 1).is_err());
    }
}
