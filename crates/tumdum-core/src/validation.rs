//! # Validation Module
//!
//! Input validation for the pricing form and the save dialog.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Raw text fields                                              │
//! │  ├── parse_optional_decimal: "" → None, "abc" → error                  │
//! │  └── Negative amounts rejected                                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: PricingInput::validate (THIS MODULE)                         │
//! │  ├── Commission 0–100, margin 1–30                                     │
//! │  ├── Amounts ≤ ₹1 crore, distance ≤ 1000 km                            │
//! │  └── Discount never larger than the listed price                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  └── NOT NULL / CHECK constraints on analysis_history                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tumdum_core::validation::{parse_optional_decimal, validate_restaurant_name};
//!
//! assert_eq!(parse_optional_decimal("distance", "  ").unwrap(), None);
//! assert!(validate_restaurant_name("Zomato Express").is_ok());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PricingInput;
use crate::{
    MAX_AMOUNT_RUPEES, MAX_DISTANCE_KM, MAX_FILTER_LENGTH, MAX_NAME_LENGTH,
    MAX_PROFIT_MARGIN_PERCENT, MIN_PROFIT_MARGIN_PERCENT,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Field Parsing
// =============================================================================

/// Parses a form field that may be left empty.
///
/// ## Rules
/// - Empty or whitespace-only input is `None` (not yet entered)
/// - `0` is a present value
/// - Negative numbers are rejected
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tumdum_core::validation::parse_optional_decimal;
///
/// assert_eq!(parse_optional_decimal("price", "").unwrap(), None);
/// assert_eq!(parse_optional_decimal("price", "0").unwrap(), Some(Decimal::ZERO));
/// assert!(parse_optional_decimal("price", "-1").is_err());
/// assert!(parse_optional_decimal("price", "ten").is_err());
/// ```
pub fn parse_optional_decimal(field: &str, raw: &str) -> ValidationResult<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    let value = Decimal::from_str(raw).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a number".to_string(),
    })?;

    require_non_negative(field, value)?;
    Ok(Some(value))
}

/// Same as [`parse_optional_decimal`], wrapped as [`Money`].
pub fn parse_optional_money(field: &str, raw: &str) -> ValidationResult<Option<Money>> {
    parse_optional_decimal(field, raw).map(|value| value.map(Money::new))
}

fn require_non_negative(field: &str, value: Decimal) -> ValidationResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Range Validators
// =============================================================================

/// Validates a commission percentage.
///
/// ## Rules
/// - Between 0 and 100 inclusive
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tumdum_core::validation::validate_commission_percent;
///
/// assert!(validate_commission_percent(Decimal::from(25)).is_ok());
/// assert!(validate_commission_percent(Decimal::from(101)).is_err());
/// ```
pub fn validate_commission_percent(commission: Decimal) -> ValidationResult<()> {
    if commission < Decimal::ZERO || commission > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "commission".to_string(),
            min: 0,
            max: 100,
        });
    }
    Ok(())
}

/// Validates the profit margin slider value.
///
/// ## Rules
/// - Between 1 and 30 inclusive
pub fn validate_profit_margin(margin: u8) -> ValidationResult<()> {
    if !(MIN_PROFIT_MARGIN_PERCENT..=MAX_PROFIT_MARGIN_PERCENT).contains(&margin) {
        return Err(ValidationError::OutOfRange {
            field: "profit margin".to_string(),
            min: i64::from(MIN_PROFIT_MARGIN_PERCENT),
            max: i64::from(MAX_PROFIT_MARGIN_PERCENT),
        });
    }
    Ok(())
}

/// Validates that a discount does not exceed the listed price.
///
/// ## Example
/// ```rust
/// use tumdum_core::validation::validate_discount;
/// use tumdum_core::Money;
///
/// assert!(validate_discount(Money::from_rupees(50), Money::from_rupees(200)).is_ok());
/// assert!(validate_discount(Money::from_rupees(250), Money::from_rupees(200)).is_err());
/// ```
pub fn validate_discount(discount: Money, listed_price: Money) -> ValidationResult<()> {
    require_non_negative("discount", discount.amount())?;

    if discount > listed_price {
        return Err(ValidationError::Exceeds {
            field: "discount".to_string(),
            limit: "listed price".to_string(),
        });
    }
    Ok(())
}

fn require_at_most(field: &str, value: Decimal, max: i64) -> ValidationResult<()> {
    if value > Decimal::from(max) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max,
        });
    }
    Ok(())
}

impl PricingInput {
    /// Checks every present field against its allowed range.
    ///
    /// Missing fields are not errors here; the engine simply has no result
    /// for them yet.
    pub fn validate(&self) -> ValidationResult<()> {
        let amounts = [
            ("menu price", self.menu_price),
            ("listed price", self.listed_price),
            ("discount", self.discount),
            ("delivery fee", self.delivery_fee_override),
        ];
        for (field, amount) in amounts {
            if let Some(amount) = amount {
                require_non_negative(field, amount.amount())?;
                require_at_most(field, amount.amount(), MAX_AMOUNT_RUPEES)?;
            }
        }

        if let Some(distance) = self.distance_km {
            require_non_negative("distance", distance)?;
            require_at_most("distance", distance, MAX_DISTANCE_KM)?;
        }
        if let Some(commission) = self.commission_percent {
            validate_commission_percent(commission)?;
        }
        if let (Some(discount), Some(listed)) = (self.discount, self.listed_price) {
            validate_discount(discount, listed)?;
        }

        validate_profit_margin(self.profit_margin_percent)
    }
}

// =============================================================================
// String Validators
// =============================================================================

fn validate_required_name(field: &str, value: &str) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(value.to_string())
}

/// Validates the restaurant name entered on save.
///
/// ## Returns
/// The trimmed name.
pub fn validate_restaurant_name(name: &str) -> ValidationResult<String> {
    validate_required_name("restaurant name", name)
}

/// Validates the dish name entered on save.
pub fn validate_dish_name(name: &str) -> ValidationResult<String> {
    validate_required_name("dish name", name)
}

/// Validates the records search filter.
///
/// ## Rules
/// - Can be empty (lists everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed filter, or `None` when it is blank.
pub fn validate_name_filter(filter: &str) -> ValidationResult<Option<String>> {
    let filter = filter.trim();

    if filter.chars().count() > MAX_FILTER_LENGTH {
        return Err(ValidationError::TooLong {
            field: "filter".to_string(),
            max: MAX_FILTER_LENGTH,
        });
    }

    Ok((!filter.is_empty()).then(|| filter.to_string()))
}

/// Validates a record identifier.
///
/// ## Example
/// ```rust
/// use tumdum_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id.trim()).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_optional_decimal() {
        assert_eq!(parse_optional_decimal("price", "").unwrap(), None);
        assert_eq!(parse_optional_decimal("price", "   ").unwrap(), None);
        assert_eq!(parse_optional_decimal("price", "0").unwrap(), Some(dec!(0)));
        assert_eq!(parse_optional_decimal("price", " 7.01 ").unwrap(), Some(dec!(7.01)));
        assert_eq!(parse_optional_decimal("price", "-0").unwrap(), Some(dec!(0)));

        assert!(matches!(
            parse_optional_decimal("price", "-3"),
            Err(ValidationError::MustBeNonNegative { .. })
        ));
        assert!(matches!(
            parse_optional_decimal("price", "12abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_parse_optional_money() {
        assert_eq!(
            parse_optional_money("discount", "12.50").unwrap(),
            Some(Money::from_paise(1250))
        );
    }

    #[test]
    fn test_validate_commission_percent() {
        assert!(validate_commission_percent(dec!(0)).is_ok());
        assert!(validate_commission_percent(dec!(100)).is_ok());
        assert!(validate_commission_percent(dec!(17.5)).is_ok());
        assert!(validate_commission_percent(dec!(-0.1)).is_err());
        assert!(validate_commission_percent(dec!(100.01)).is_err());
    }

    #[test]
    fn test_validate_profit_margin() {
        assert!(validate_profit_margin(1).is_ok());
        assert!(validate_profit_margin(30).is_ok());
        assert!(validate_profit_margin(0).is_err());
        assert!(validate_profit_margin(31).is_err());
    }

    #[test]
    fn test_validate_discount() {
        let listed = Money::from_rupees(200);
        assert!(validate_discount(Money::zero(), listed).is_ok());
        assert!(validate_discount(listed, listed).is_ok());
        assert!(matches!(
            validate_discount(Money::from_paise(20001), listed),
            Err(ValidationError::Exceeds { .. })
        ));
    }

    #[test]
    fn test_pricing_input_validate() {
        let mut input = PricingInput {
            listed_price: Some(Money::from_rupees(200)),
            commission_percent: Some(dec!(20)),
            discount: Some(Money::from_rupees(20)),
            distance_km: Some(dec!(5)),
            ..PricingInput::default()
        };
        assert!(input.validate().is_ok());

        input.commission_percent = Some(dec!(120));
        assert!(input.validate().is_err());

        input.commission_percent = Some(dec!(20));
        input.distance_km = Some(dec!(-1));
        assert!(input.validate().is_err());

        input.distance_km = Some(dec!(5));
        input.profit_margin_percent = 45;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_amounts_and_distance_are_bounded() {
        let input = PricingInput {
            listed_price: Some(Money::from_rupees(MAX_AMOUNT_RUPEES)),
            distance_km: Some(Decimal::from(MAX_DISTANCE_KM)),
            ..PricingInput::default()
        };
        assert!(input.validate().is_ok());

        let err = PricingInput {
            listed_price: Some(Money::new(Decimal::MAX)),
            ..input.clone()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "listed price must be between 0 and 10000000");

        let err = PricingInput {
            distance_km: Some(dec!(1000.01)),
            ..input
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { max: 1000, .. }));
    }

    #[test]
    fn test_incomplete_input_is_still_valid() {
        assert!(PricingInput::default().validate().is_ok());
    }

    #[test]
    fn test_validate_names() {
        assert_eq!(
            validate_restaurant_name("  Zomato Express ").unwrap(),
            "Zomato Express"
        );
        assert!(validate_restaurant_name("").is_err());
        assert!(validate_dish_name("   ").is_err());
        assert!(validate_dish_name(&"a".repeat(200)).is_ok());
        assert!(validate_dish_name(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_name_filter() {
        assert_eq!(validate_name_filter("").unwrap(), None);
        assert_eq!(validate_name_filter(" zom ").unwrap(), Some("zom".to_string()));
        assert!(validate_name_filter(&"z".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
        assert!(validate_uuid("123").is_err());
    }
}
