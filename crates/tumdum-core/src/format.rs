//! # Display Formatting
//!
//! Numeric rendering rules shared by every front end:
//!
//! | Value kind                          | Rendering                  |
//! |-------------------------------------|----------------------------|
//! | Currency                            | exactly 2 fractional digits|
//! | Percentages                         | exactly 1 fractional digit |
//! | Raw echo of user input (menu price) | as entered, no rounding    |
//!
//! Rounding is half away from zero, matching what a restaurant owner expects
//! from a calculator (₹0.125 → ₹0.13).

use rust_decimal::{Decimal, RoundingStrategy};

/// Renders `value` with exactly `dp` fractional digits.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tumdum_core::format::fixed;
///
/// assert_eq!(fixed(Decimal::new(255, 0), 2), "255.00");
/// assert_eq!(fixed(Decimal::new(23165, 2), 1), "231.7");
/// ```
pub fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(dp);
    rounded.to_string()
}

/// Renders a percentage with one fractional digit (no `%` sign).
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tumdum_core::format::format_percent;
///
/// assert_eq!(format_percent(Decimal::new(5, 0)), "5.0");
/// ```
pub fn format_percent(value: Decimal) -> String {
    fixed(value, 1)
}

/// Echoes a user-entered number without forcing a scale.
///
/// Trailing zeros are dropped, so `150.00` and `150` both render as `150`.
pub fn format_raw(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fixed_pads_and_rounds() {
        assert_eq!(fixed(dec!(8.65), 2), "8.65");
        assert_eq!(fixed(dec!(10), 2), "10.00");
        assert_eq!(fixed(dec!(2.345), 2), "2.35");
        assert_eq!(fixed(dec!(-2.345), 2), "-2.35");
    }

    #[test]
    fn test_negative_zero_is_rendered_unsigned() {
        assert_eq!(fixed(dec!(-0.04), 1), "0.0");
    }

    #[test]
    fn test_percent() {
        assert_eq!(format_percent(dec!(20)), "20.0");
        assert_eq!(format_percent(dec!(4.96875)), "5.0");
        assert_eq!(format_percent(dec!(12.34)), "12.3");
    }

    #[test]
    fn test_raw_keeps_user_precision() {
        assert_eq!(format_raw(dec!(150.00)), "150");
        assert_eq!(format_raw(dec!(199.5)), "199.5");
        assert_eq!(format_raw(dec!(0.125)), "0.125");
    }
}
