//! # Pricing Engine
//!
//! Derives both platform breakdowns and the recommended TumDum price from a
//! single [`PricingInput`].
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Zomato                                                                 │
//! │    listed ──(− discount)──► discounted ──(− commission%)──► earning    │
//! │    listed × 5%  ──► gst                                      │          │
//! │    distance × 7 ──► delivery (gold waiver / override)        │          │
//! │    customer = discounted + delivery + 10 + gst               │          │
//! │                                                              ▼          │
//! │  TumDum                                                                 │
//! │    target = earning × (1 + margin%)                                     │
//! │    recommended = ceil(target + 5)                                       │
//! │    earning = recommended − 5                                            │
//! │    customer = recommended + distance × 9 + 5 + recommended × 5%         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine never fails: incomplete or out-of-range input yields `None`,
//! and the one division (effective commission) is guarded to zero.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::money::Money;
use crate::types::{
    AlternativeBreakdown, ComparisonResult, CompetitorBreakdown, PricingInput, TaxRate,
};

// =============================================================================
// Fee Constants
// =============================================================================

/// Zomato delivery charge per kilometre (₹).
pub const COMPETITOR_RATE_PER_KM: i64 = 7;

/// TumDum delivery charge per kilometre (₹).
pub const ALTERNATIVE_RATE_PER_KM: i64 = 9;

/// Zomato flat platform fee (₹).
pub const COMPETITOR_PLATFORM_FEE: i64 = 10;

/// TumDum flat platform fee (₹).
pub const ALTERNATIVE_PLATFORM_FEE: i64 = 5;

/// GST on food delivery.
pub const GST_RATE: TaxRate = TaxRate::from_bps(500);

/// Gold waives delivery only when the listed price is strictly above this.
pub const GOLD_MIN_LISTED_PRICE: i64 = 199;

/// Gold waives delivery only up to this distance (inclusive, km).
pub const GOLD_MAX_DISTANCE_KM: i64 = 7;

// =============================================================================
// Engine
// =============================================================================

/// Computes the full Zomato vs TumDum comparison.
///
/// Returns `None` until menu price, listed price, commission and distance
/// are all present. A present zero counts as present. Input that fails
/// [`PricingInput::validate`] also yields `None`.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tumdum_core::{compute_comparison, Money, PricingInput};
///
/// assert!(compute_comparison(&PricingInput::default()).is_none());
///
/// let input = PricingInput {
///     menu_price: Some(Money::from_rupees(150)),
///     listed_price: Some(Money::from_rupees(200)),
///     commission_percent: Some(Decimal::from(20)),
///     distance_km: Some(Decimal::from(5)),
///     ..PricingInput::default()
/// };
/// let result = compute_comparison(&input).unwrap();
/// assert_eq!(result.competitor.customer_price, Money::from_rupees(255));
/// assert_eq!(result.alternative.customer_price, Money::from_paise(23165));
/// ```
pub fn compute_comparison(input: &PricingInput) -> Option<ComparisonResult> {
    // menu_price is informational but still gates the calculation
    input.menu_price?;
    let listed_price = input.listed_price?;
    let commission_percent = input.commission_percent?;
    let distance_km = input.distance_km?;
    input.validate().ok()?;

    let competitor = competitor_breakdown(input, listed_price, commission_percent, distance_km);
    let (alternative, recommended_price) = alternative_breakdown(
        competitor.restaurant_earning,
        input.profit_margin_percent,
        distance_km,
    );

    Some(ComparisonResult {
        competitor,
        alternative,
        recommended_price,
    })
}

/// Whether Gold membership waives the Zomato delivery fee.
///
/// ## Example
/// ```rust
/// use rust_decimal::Decimal;
/// use tumdum_core::pricing::gold_waives_delivery;
/// use tumdum_core::Money;
///
/// assert!(gold_waives_delivery(Money::from_rupees(200), Decimal::from(7)));
/// assert!(!gold_waives_delivery(Money::from_rupees(199), Decimal::from(3)));
/// ```
pub fn gold_waives_delivery(listed_price: Money, distance_km: Decimal) -> bool {
    listed_price.amount() > Decimal::from(GOLD_MIN_LISTED_PRICE)
        && distance_km <= Decimal::from(GOLD_MAX_DISTANCE_KM)
}

fn competitor_breakdown(
    input: &PricingInput,
    listed_price: Money,
    commission_percent: Decimal,
    distance_km: Decimal,
) -> CompetitorBreakdown {
    let base_delivery_fee = Money::from_rupees(COMPETITOR_RATE_PER_KM).per_km(distance_km);
    let computed_delivery_fee =
        if input.gold_enabled && gold_waives_delivery(listed_price, distance_km) {
            Money::zero()
        } else {
            base_delivery_fee
        };
    let delivery_fee = input.delivery_fee_override.unwrap_or(computed_delivery_fee);

    let platform_fee = Money::from_rupees(COMPETITOR_PLATFORM_FEE);
    let gst = listed_price.calculate_gst(GST_RATE);

    let discounted_price = match input.discount {
        Some(discount) => listed_price - discount,
        None => listed_price,
    };
    let restaurant_earning = discounted_price.apply_percentage_cut(commission_percent);

    let effective_commission_percent =
        effective_commission_percent(listed_price, restaurant_earning);

    let customer_price = discounted_price + delivery_fee + platform_fee + gst;

    CompetitorBreakdown {
        listed_price,
        discounted_price,
        customer_price,
        restaurant_earning,
        delivery_fee,
        platform_fee,
        gst,
        effective_commission_percent,
    }
}

fn alternative_breakdown(
    competitor_earning: Money,
    profit_margin_percent: u8,
    distance_km: Decimal,
) -> (AlternativeBreakdown, Money) {
    let target_earning =
        competitor_earning.apply_percentage_uplift(Decimal::from(profit_margin_percent));
    let platform_fee = Money::from_rupees(ALTERNATIVE_PLATFORM_FEE);

    // Rounding up keeps the restaurant at or above the target after the fee
    let recommended_price = (target_earning + platform_fee).ceil();

    let delivery_fee = Money::from_rupees(ALTERNATIVE_RATE_PER_KM).per_km(distance_km);
    let gst = recommended_price.calculate_gst(GST_RATE);
    let restaurant_earning = recommended_price - platform_fee;
    let customer_price = recommended_price + delivery_fee + platform_fee + gst;

    let breakdown = AlternativeBreakdown {
        target_earning,
        customer_price,
        restaurant_earning,
        delivery_fee,
        platform_fee,
        gst,
    };

    (breakdown, recommended_price)
}

/// `(listed − earning) / listed × 100`, one decimal place, 0 for a free listing.
fn effective_commission_percent(listed_price: Money, restaurant_earning: Money) -> Decimal {
    (listed_price - restaurant_earning)
        .amount()
        .checked_div(listed_price.amount())
        .map(|ratio| {
            (ratio * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        })
        .unwrap_or(Decimal::ZERO)
}

// =============================================================================
// Unit Tests
// =============================================================================
