//! # Money Module
//!
//! Provides the `Money` type for rupee amounts.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Restaurant earning ₹160 with a 5% margin target:                       │
//! │    f64:      160 × 1.05 = 168.00000000000003                            │
//! │    ceil(168.00000000000003 + 5) = 174  ❌ one rupee too high            │
//! │                                                                         │
//! │  Integer paise do not help either:                                      │
//! │    ₹199.99 at 17.5% commission = ₹164.991750 (fractional paise)         │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal                                          │
//! │    160 × 1.05 = 168.00 exactly, ceil(173.00) = 173  ✓                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tumdum_core::money::Money;
//!
//! let listed = Money::from_rupees(200);
//! let earning = listed.apply_percentage_cut(20.into()); // 20% commission
//! assert_eq!(earning, Money::from_rupees(160));
//! assert_eq!(earning.to_string(), "₹160.00");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;
use ts_rs::TS;

use crate::format;
use crate::types::TaxRate;
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A rupee amount with exact decimal precision.
///
/// ## Design Decisions
/// - **Decimal, not f64**: every fee, GST and earning is exact in base 10
/// - **No implicit rounding**: amounts keep full precision through the
///   formula; rounding happens only when a value is displayed
/// - **Serialized as a string**: `"8.65"` survives JSON without drift,
///   and trailing zeros from working precision are dropped
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  PricingInput.listed_price ──► discounted price ──► restaurant earning  │
/// │                                                        │                │
/// │                            target earning ◄────────────┘                │
/// │                                  │                                      │
/// │                                  ▼                                      │
/// │                    recommended price (ceil) ──► alternative breakdown   │
/// │                                                                         │
/// │  Every amount in a ComparisonResult flows through this type             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "string")] Decimal);

impl Money {
    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a whole-rupee amount.
    ///
    /// ## Example
    /// ```rust
    /// use tumdum_core::money::Money;
    ///
    /// assert_eq!(Money::from_rupees(10).to_string(), "₹10.00");
    /// ```
    #[inline]
    pub fn from_rupees(rupees: i64) -> Self {
        Money(Decimal::from(rupees))
    }

    /// Creates an amount from paise (1/100 rupee).
    ///
    /// ## Example
    /// ```rust
    /// use tumdum_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(865).to_string(), "₹8.65");
    /// ```
    #[inline]
    pub fn from_paise(paise: i64) -> Self {
        Money(Decimal::new(paise, 2))
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero rupees.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is strictly greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is strictly less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Rounds up to the next whole rupee.
    ///
    /// ## Example
    /// ```rust
    /// use tumdum_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(17301).ceil(), Money::from_rupees(174));
    /// assert_eq!(Money::from_rupees(173).ceil(), Money::from_rupees(173));
    /// ```
    #[inline]
    pub fn ceil(&self) -> Self {
        Money(self.0.ceil())
    }

    /// Checks if the amount has no fractional part.
    #[inline]
    pub fn is_whole(&self) -> bool {
        self.0.fract().is_zero()
    }

    /// Calculates GST on this amount.
    ///
    /// No rounding is applied; ₹173 at 5% is exactly ₹8.65.
    ///
    /// ## Example
    /// ```rust
    /// use tumdum_core::money::Money;
    /// use tumdum_core::types::TaxRate;
    ///
    /// let gst = Money::from_rupees(173).calculate_gst(TaxRate::from_bps(500));
    /// assert_eq!(gst, Money::from_paise(865));
    /// ```
    pub fn calculate_gst(&self, rate: TaxRate) -> Money {
        Money(self.0 * rate.as_fraction())
    }

    /// Removes a percentage cut (commission) from the amount.
    ///
    /// `amount × (1 − pct/100)`
    pub fn apply_percentage_cut(&self, pct: Decimal) -> Money {
        Money(self.0 * (Decimal::ONE - pct / Decimal::ONE_HUNDRED))
    }

    /// Adds a percentage uplift (profit margin) to the amount.
    ///
    /// `amount × (1 + pct/100)`
    pub fn apply_percentage_uplift(&self, pct: Decimal) -> Money {
        Money(self.0 * (Decimal::ONE + pct / Decimal::ONE_HUNDRED))
    }

    /// Multiplies a per-kilometre rate by a distance.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use tumdum_core::money::Money;
    ///
    /// let fee = Money::from_rupees(7).per_km(Decimal::new(701, 2)); // 7.01 km
    /// assert_eq!(fee, Money::from_paise(4907));
    /// ```
    #[inline]
    pub fn per_km(&self, distance_km: Decimal) -> Money {
        Money(self.0 * distance_km)
    }

    /// Multiplies money by an order count.
    #[inline]
    pub fn multiply_orders(&self, orders: u32) -> Money {
        Money(self.0 * Decimal::from(orders))
    }

    /// Formats with the given currency symbol and exactly two fractional digits.
    ///
    /// ## Example
    /// ```rust
    /// use tumdum_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(-550).format_with("Rs. "), "-Rs. 5.50");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let digits = format::fixed(self.0.abs(), 2);
        let sign = if self.is_negative() && digits != format::fixed(Decimal::ZERO, 2) {
            "-"
        } else {
            ""
        };
        format!("{}{}{}", sign, symbol, digits)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money with the rupee symbol and two fractional digits.
///
/// ## Note
/// UI code should go through the configured currency symbol instead.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(CURRENCY_SYMBOL))
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Money)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.normalize().to_string())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by an order count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, orders: u32) -> Self {
        self.multiply_orders(orders)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
