//! # Domain Types
//!
//! Core domain types used throughout TumDum pricing analysis.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌──────────────────────────────────────┐   │
//! │  │  PricingInput   │──────► │          ComparisonResult            │   │
//! │  │  (form state)   │ engine │  competitor: CompetitorBreakdown     │   │
//! │  └─────────────────┘        │  alternative: AlternativeBreakdown   │   │
//! │                             │  recommended_price                   │   │
//! │                             └───────────────┬──────────────────────┘   │
//! │                                             │                          │
//! │                     ┌───────────────────────┼──────────────────┐       │
//! │                     ▼                       ▼                  ▼       │
//! │            ┌────────────────┐   ┌───────────────────┐ ┌─────────────┐  │
//! │            │ OrderVolumeRow │   │ ComparisonSummary │ │ NewAnalysis │  │
//! │            │ (projection)   │   │ (uplift, savings) │ │ (save req.) │  │
//! │            └────────────────┘   └───────────────────┘ └──────┬──────┘  │
//! │                                                              ▼         │
//! │                                                     ┌────────────────┐ │
//! │                                                     │ AnalysisRecord │ │
//! │                                                     │ (flattened row)│ │
//! │                                                     └────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::format;
use crate::money::Money;
use crate::DEFAULT_PROFIT_MARGIN_PERCENT;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (GST on restaurant food delivery)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate as an exact fraction (500 bps → 0.05).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the rate as a percentage (500 bps → 5).
    #[inline]
    pub fn percentage(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2)
    }
}

// =============================================================================
// Platform
// =============================================================================

/// The two delivery platforms being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Commission-based reference platform.
    Competitor,
    /// Flat-fee platform whose price is being recommended.
    Alternative,
}

impl Platform {
    /// Display name shown to restaurant owners.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Platform::Competitor => "Zomato",
            Platform::Alternative => "TumDum",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// Pricing Input
// =============================================================================

/// Order parameters entered by the restaurant owner.
///
/// ## Lifecycle
/// Transient form state, rebuilt on every keystroke. Empty fields are
/// `None`; a present zero is still present.
///
/// ## Required Fields
/// `menu_price`, `listed_price`, `commission_percent` and `distance_km`
/// must all be present before the engine produces a result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    /// Menu price (informational only, never used in the formula).
    pub menu_price: Option<Money>,

    /// Price listed on the competitor before discount.
    pub listed_price: Option<Money>,

    /// Competitor commission on the discounted price, 0–100.
    #[ts(type = "string | null")]
    pub commission_percent: Option<Decimal>,

    /// Absolute discount subtracted from the listed price.
    pub discount: Option<Money>,

    /// Delivery distance in kilometres.
    #[ts(type = "string | null")]
    pub distance_km: Option<Decimal>,

    /// Replaces the computed competitor delivery fee when present.
    pub delivery_fee_override: Option<Money>,

    /// Competitor "Gold" membership (free delivery under a threshold).
    pub gold_enabled: bool,

    /// Extra earning sought over the competitor, 1–30.
    pub profit_margin_percent: u8,
}

impl Default for PricingInput {
    /// Empty form with the default 5% profit margin.
    fn default() -> Self {
        PricingInput {
            menu_price: None,
            listed_price: None,
            commission_percent: None,
            discount: None,
            distance_km: None,
            delivery_fee_override: None,
            gold_enabled: false,
            profit_margin_percent: DEFAULT_PROFIT_MARGIN_PERCENT,
        }
    }
}

impl PricingInput {
    /// Name of the first required field that is still empty, if any.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        if self.menu_price.is_none() {
            Some("menu price")
        } else if self.listed_price.is_none() {
            Some("listed price")
        } else if self.commission_percent.is_none() {
            Some("commission")
        } else if self.distance_km.is_none() {
            Some("distance")
        } else {
            None
        }
    }
}

// =============================================================================
// Breakdowns
// =============================================================================

/// Fees and earnings on the commission-based competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CompetitorBreakdown {
    /// Listing price before discount (GST base).
    pub listed_price: Money,
    /// Listing price after the absolute discount.
    pub discounted_price: Money,
    /// What the customer pays: discounted price + fees + GST.
    pub customer_price: Money,
    /// What the restaurant keeps after commission.
    pub restaurant_earning: Money,
    pub delivery_fee: Money,
    pub platform_fee: Money,
    pub gst: Money,
    /// Gap between listed price and earning, as a percentage (1 dp).
    #[ts(type = "string")]
    pub effective_commission_percent: Decimal,
}

/// Fees and earnings on the flat-fee alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AlternativeBreakdown {
    /// Competitor earning plus the requested margin.
    pub target_earning: Money,
    pub customer_price: Money,
    /// Recommended price minus the flat platform fee.
    pub restaurant_earning: Money,
    pub delivery_fee: Money,
    pub platform_fee: Money,
    pub gst: Money,
}

// =============================================================================
// Comparison Result
// =============================================================================

/// Output of one engine run.
///
/// Immutable; a recomputation produces a fresh value that replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub competitor: CompetitorBreakdown,
    pub alternative: AlternativeBreakdown,
    /// Alternative listing price, always a whole rupee.
    pub recommended_price: Money,
}

impl ComparisonResult {
    /// Headline numbers for the results panel.
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary::between(
            self.competitor.listed_price,
            self.competitor.restaurant_earning,
            self.competitor.customer_price,
            self.alternative.restaurant_earning,
            self.alternative.customer_price,
        )
    }
}

/// Per-order headline comparison.
///
/// ## Panel Wording
/// ```text
/// ✓ Earn ₹{earning_uplift} more per order ({earning_uplift_percent}% more)
/// ✓ Customer pays ₹{customer_savings} less
///   Commission: -₹{commission_deduction}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSummary {
    pub earning_uplift: Money,
    /// Zero when the competitor earning is not positive.
    #[ts(type = "string")]
    pub earning_uplift_percent: Decimal,
    /// Negative when the alternative is dearer for the customer.
    pub customer_savings: Money,
    /// Listed price minus competitor earning.
    pub commission_deduction: Money,
}

impl ComparisonSummary {
    /// Builds the summary from the five figures it depends on.
    pub fn between(
        listed_price: Money,
        competitor_earning: Money,
        competitor_customer_price: Money,
        alternative_earning: Money,
        alternative_customer_price: Money,
    ) -> Self {
        let earning_uplift = alternative_earning - competitor_earning;
        let earning_uplift_percent = if competitor_earning.is_positive() {
            (earning_uplift.amount() / competitor_earning.amount() * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
        } else {
            Decimal::ZERO
        };

        ComparisonSummary {
            earning_uplift,
            earning_uplift_percent,
            customer_savings: competitor_customer_price - alternative_customer_price,
            commission_deduction: listed_price - competitor_earning,
        }
    }
}

// =============================================================================
// Order Volume Projection
// =============================================================================

/// One row of the order-volume profit table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct OrderVolumeRow {
    pub orders: u32,
    pub competitor_profit: Money,
    pub alternative_profit: Money,
    pub profit_difference: Money,
    /// One fractional digit, or the literal `"0"` when the competitor
    /// profit is not positive.
    pub percentage_gain: String,
}

// =============================================================================
// Saved Analyses
// =============================================================================

/// A save request: the names entered in the save dialog plus the complete
/// input and the result it produced.
///
/// ## Construction
/// Only through [`NewAnalysis::from_input`], which refuses incomplete input.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAnalysis {
    pub restaurant_name: String,
    pub dish_name: String,
    pub menu_price: Money,
    pub listed_price: Money,
    pub commission_percent: Decimal,
    pub discount: Option<Money>,
    pub distance_km: Decimal,
    pub delivery_fee_override: Option<Money>,
    pub gold_enabled: bool,
    pub profit_margin_percent: u8,
    pub comparison: ComparisonResult,
}

impl NewAnalysis {
    /// Freezes the current form and result into a save request.
    ///
    /// Names are trimmed. Validation of the names themselves lives in
    /// [`crate::validation`].
    pub fn from_input(
        restaurant_name: &str,
        dish_name: &str,
        input: &PricingInput,
        comparison: &ComparisonResult,
    ) -> CoreResult<Self> {
        let missing = |field: &str| CoreError::IncompleteInput {
            field: field.to_string(),
        };

        Ok(NewAnalysis {
            restaurant_name: restaurant_name.trim().to_string(),
            dish_name: dish_name.trim().to_string(),
            menu_price: input.menu_price.ok_or_else(|| missing("menu price"))?,
            listed_price: input.listed_price.ok_or_else(|| missing("listed price"))?,
            commission_percent: input
                .commission_percent
                .ok_or_else(|| missing("commission"))?,
            discount: input.discount,
            distance_km: input.distance_km.ok_or_else(|| missing("distance"))?,
            delivery_fee_override: input.delivery_fee_override,
            gold_enabled: input.gold_enabled,
            profit_margin_percent: input.profit_margin_percent,
            comparison: comparison.clone(),
        })
    }
}

/// Identifier and timestamp assigned by the store on save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SavedAnalysis {
    pub id: String,
    #[ts(as = "String")]
    pub saved_at: DateTime<Utc>,
}

/// A persisted analysis, flattened into one row.
///
/// Read-only once created; the only mutation is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRecord {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub restaurant_name: String,
    pub dish_name: String,

    pub menu_price: Money,
    pub listed_price: Money,
    #[ts(type = "string")]
    pub commission_percent: Decimal,
    pub discount: Option<Money>,
    #[ts(type = "string")]
    pub distance_km: Decimal,
    pub delivery_fee_override: Option<Money>,
    pub gold_enabled: bool,
    pub profit_margin_percent: u8,
    pub recommended_price: Money,

    pub competitor_customer_price: Money,
    pub competitor_restaurant_earning: Money,
    pub competitor_delivery_fee: Money,
    pub competitor_platform_fee: Money,
    pub competitor_gst: Money,
    #[ts(type = "string")]
    pub competitor_effective_commission_percent: Decimal,

    pub alternative_customer_price: Money,
    pub alternative_restaurant_earning: Money,
    pub alternative_delivery_fee: Money,
    pub alternative_platform_fee: Money,
    pub alternative_gst: Money,

    /// Assigned by the store when the record was written.
    #[ts(as = "String")]
    pub saved_at: DateTime<Utc>,
}

impl AnalysisRecord {
    /// Flattens a save request into the stored shape.
    pub fn from_saved(new: &NewAnalysis, saved: SavedAnalysis) -> Self {
        let competitor = &new.comparison.competitor;
        let alternative = &new.comparison.alternative;

        AnalysisRecord {
            id: saved.id,
            restaurant_name: new.restaurant_name.clone(),
            dish_name: new.dish_name.clone(),
            menu_price: new.menu_price,
            listed_price: new.listed_price,
            commission_percent: new.commission_percent,
            discount: new.discount,
            distance_km: new.distance_km,
            delivery_fee_override: new.delivery_fee_override,
            gold_enabled: new.gold_enabled,
            profit_margin_percent: new.profit_margin_percent,
            recommended_price: new.comparison.recommended_price,
            competitor_customer_price: competitor.customer_price,
            competitor_restaurant_earning: competitor.restaurant_earning,
            competitor_delivery_fee: competitor.delivery_fee,
            competitor_platform_fee: competitor.platform_fee,
            competitor_gst: competitor.gst,
            competitor_effective_commission_percent: competitor.effective_commission_percent,
            alternative_customer_price: alternative.customer_price,
            alternative_restaurant_earning: alternative.restaurant_earning,
            alternative_delivery_fee: alternative.delivery_fee,
            alternative_platform_fee: alternative.platform_fee,
            alternative_gst: alternative.gst,
            saved_at: saved.saved_at,
        }
    }

    /// Headline numbers for the record detail view.
    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary::between(
            self.listed_price,
            self.competitor_restaurant_earning,
            self.competitor_customer_price,
            self.alternative_restaurant_earning,
            self.alternative_customer_price,
        )
    }

    /// Menu price exactly as the owner typed it.
    pub fn menu_price_display(&self) -> String {
        format::format_raw(self.menu_price.amount())
    }

    /// Listed price exactly as the owner typed it.
    pub fn listed_price_display(&self) -> String {
        format::format_raw(self.listed_price.amount())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_comparison() -> ComparisonResult {
        ComparisonResult {
            competitor: CompetitorBreakdown {
                listed_price: Money::from_rupees(200),
                discounted_price: Money::from_rupees(200),
                customer_price: Money::from_rupees(255),
                restaurant_earning: Money::from_rupees(160),
                delivery_fee: Money::from_rupees(35),
                platform_fee: Money::from_rupees(10),
                gst: Money::from_rupees(10),
                effective_commission_percent: dec!(20.0),
            },
            alternative: AlternativeBreakdown {
                target_earning: Money::from_rupees(168),
                customer_price: Money::from_paise(23165),
                restaurant_earning: Money::from_rupees(168),
                delivery_fee: Money::from_rupees(45),
                platform_fee: Money::from_rupees(5),
                gst: Money::from_paise(865),
            },
            recommended_price: Money::from_rupees(173),
        }
    }

    #[test]
    fn test_tax_rate_fraction() {
        let gst = TaxRate::from_bps(500);
        assert_eq!(gst.as_fraction(), dec!(0.05));
        assert_eq!(gst.percentage(), dec!(5));
    }

    #[test]
    fn test_platform_names() {
        assert_eq!(Platform::Competitor.to_string(), "Zomato");
        assert_eq!(Platform::Alternative.to_string(), "TumDum");
    }

    #[test]
    fn test_default_input_is_incomplete_with_default_margin() {
        let input = PricingInput::default();
        assert_eq!(input.profit_margin_percent, 5);
        assert_eq!(input.first_missing_field(), Some("menu price"));
    }

    #[test]
    fn test_summary() {
        let summary = sample_comparison().summary();
        assert_eq!(summary.earning_uplift, Money::from_rupees(8));
        assert_eq!(summary.earning_uplift_percent, dec!(5.0));
        assert_eq!(summary.customer_savings, Money::from_paise(2335));
        assert_eq!(summary.commission_deduction, Money::from_rupees(40));
    }

    #[test]
    fn test_summary_with_zero_competitor_earning() {
        let summary = ComparisonSummary::between(
            Money::from_rupees(100),
            Money::zero(),
            Money::from_rupees(110),
            Money::from_rupees(10),
            Money::from_rupees(30),
        );
        assert_eq!(summary.earning_uplift_percent, Decimal::ZERO);
    }

    #[test]
    fn test_new_analysis_requires_complete_input() {
        let input = PricingInput {
            menu_price: Some(Money::from_rupees(150)),
            listed_price: Some(Money::from_rupees(200)),
            commission_percent: Some(dec!(20)),
            ..PricingInput::default()
        };

        let err = NewAnalysis::from_input("Zomato Express", "Thali", &input, &sample_comparison())
            .unwrap_err();
        assert!(matches!(err, CoreError::IncompleteInput { ref field } if field == "distance"));
    }

    #[test]
    fn test_record_flattening() {
        let input = PricingInput {
            menu_price: Some(Money::from_rupees(150)),
            listed_price: Some(Money::from_rupees(200)),
            commission_percent: Some(dec!(20)),
            distance_km: Some(dec!(5)),
            ..PricingInput::default()
        };
        let new =
            NewAnalysis::from_input("  Zomato Express ", "Thali", &input, &sample_comparison())
                .unwrap();
        let saved = SavedAnalysis {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            saved_at: Utc::now(),
        };

        let record = AnalysisRecord::from_saved(&new, saved);

        assert_eq!(record.restaurant_name, "Zomato Express");
        assert_eq!(record.recommended_price, Money::from_rupees(173));
        assert_eq!(record.competitor_effective_commission_percent, dec!(20.0));
        assert_eq!(record.alternative_gst, Money::from_paise(865));
        assert_eq!(record.discount, None);
        assert_eq!(record.summary(), sample_comparison().summary());
        assert_eq!(record.listed_price_display(), "200");
    }

    #[test]
    fn test_comparison_serializes_camel_case() {
        let json = serde_json::to_value(sample_comparison()).unwrap();
        assert_eq!(json["recommendedPrice"], "173");
        assert_eq!(json["alternative"]["gst"], "8.65");
        assert!(json["competitor"].get("effectiveCommissionPercent").is_some());
    }
}
