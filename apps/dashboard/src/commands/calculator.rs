//! # Calculator Commands
//!
//! Form input, live comparison, and saving the current analysis.
//!
//! ## Save Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update_input(form) ──► parse + validate ──► CalculatorState::replace   │
//! │                                                    │                    │
//! │                                                    ▼                    │
//! │                                     compute_comparison (inside lock)    │
//! │                                                                         │
//! │  save_analysis(restaurant, dish)                                        │
//! │     1. validate names                                                   │
//! │     2. snapshot input + result (IncompleteInput if no result)           │
//! │     3. AnalysisRepository::insert                                       │
//! │     4. prepend the new record to RecordsState                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{ApiError, SAVE_FAILED};
use crate::state::{CalculatorState, DbState, RecordsState};
use tumdum_core::validation::{
    parse_optional_decimal, parse_optional_money, validate_dish_name, validate_restaurant_name,
};
use tumdum_core::{
    AnalysisRecord, ComparisonResult, ComparisonSummary, CoreError, NewAnalysis, OrderVolumeRow,
    PricingInput, DEFAULT_ORDER_VOLUMES,
};

/// Raw form values as typed by the user; blank means "not entered".
#[derive(Debug, Clone, Default)]
pub struct PricingForm {
    pub menu_price: String,
    pub listed_price: String,
    pub commission_percent: String,
    pub discount: String,
    pub distance_km: String,
    pub delivery_fee_override: String,
    pub gold_enabled: bool,
    /// `None` keeps the configured default margin.
    pub profit_margin_percent: Option<u8>,
}

impl PricingForm {
    /// Parses and range-checks the form.
    pub fn parse(&self, default_margin: u8) -> Result<PricingInput, ApiError> {
        let input = PricingInput {
            menu_price: parse_optional_money("menu price", &self.menu_price)?,
            listed_price: parse_optional_money("listed price", &self.listed_price)?,
            commission_percent: parse_optional_decimal("commission", &self.commission_percent)?,
            discount: parse_optional_money("discount", &self.discount)?,
            distance_km: parse_optional_decimal("distance", &self.distance_km)?,
            delivery_fee_override: parse_optional_money(
                "delivery fee",
                &self.delivery_fee_override,
            )?,
            gold_enabled: self.gold_enabled,
            profit_margin_percent: self.profit_margin_percent.unwrap_or(default_margin),
        };

        input.validate()?;
        Ok(input)
    }
}

/// Everything the calculator screen renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorView {
    pub input: PricingInput,
    /// `None` shows the "enter order details" placeholder.
    pub result: Option<ComparisonResult>,
    pub summary: Option<ComparisonSummary>,
    pub projection: Vec<OrderVolumeRow>,
}

/// Replaces the form and recomputes.
///
/// ## Returns
/// The new comparison, or `None` while required fields are blank.
pub fn update_input(
    calculator: &CalculatorState,
    form: &PricingForm,
    default_margin: u8,
) -> Result<Option<ComparisonResult>, ApiError> {
    let input = form.parse(default_margin)?;
    debug!(?input, "update_input command");
    Ok(calculator.replace(input))
}

/// Renders the current calculator state.
///
/// ## Arguments
/// * `volumes` - Order counts for the projection table; `None` uses the
///   default `[1, 5, 10, 25, 50, 100, 200, 500]`.
pub fn get_calculator(calculator: &CalculatorState, volumes: Option<&[u32]>) -> CalculatorView {
    let (input, result) = calculator.snapshot();
    let volumes = volumes.unwrap_or(&DEFAULT_ORDER_VOLUMES);

    let summary = result.as_ref().map(ComparisonResult::summary);
    let projection = tumdum_core::project(result.as_ref(), volumes.iter().copied()).collect();

    CalculatorView {
        input,
        result,
        summary,
        projection,
    }
}

/// Saves the current comparison under a restaurant and dish name.
///
/// ## Errors
/// - `ValidationError`: blank or over-long names
/// - `IncompleteInput`: no comparison yet
/// - `PersistenceFailure`: "Failed to save analysis"
pub async fn save_analysis(
    db: &DbState,
    calculator: &CalculatorState,
    records: &RecordsState,
    restaurant_name: &str,
    dish_name: &str,
) -> Result<AnalysisRecord, ApiError> {
    let restaurant_name = validate_restaurant_name(restaurant_name)?;
    let dish_name = validate_dish_name(dish_name)?;

    let (input, result) = calculator.snapshot();
    let comparison = result.ok_or_else(|| CoreError::IncompleteInput {
        field: input.first_missing_field().unwrap_or("input").to_string(),
    })?;

    let analysis = NewAnalysis::from_input(&restaurant_name, &dish_name, &input, &comparison)?;

    let saved = db
        .inner()
        .analyses()
        .insert(&analysis)
        .await
        .map_err(|e| ApiError::persistence(SAVE_FAILED, e))?;

    let record = AnalysisRecord::from_saved(&analysis, saved);
    records.prepend(record.clone());

    info!(id = %record.id, restaurant = %record.restaurant_name, "Analysis saved");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tumdum_core::Money;
    use tumdum_db::{Database, DbConfig};

    fn reference_form() -> PricingForm {
        PricingForm {
            menu_price: "150".to_string(),
            listed_price: "200".to_string(),
            commission_percent: "20".to_string(),
            distance_km: "5".to_string(),
            ..PricingForm::default()
        }
    }

    async fn db_state() -> DbState {
        DbState::new(Database::new(DbConfig::in_memory()).await.unwrap())
    }

    #[test]
    fn test_blank_form_has_no_result() {
        let calculator = CalculatorState::default();
        let result = update_input(&calculator, &PricingForm::default(), 5).unwrap();
        assert!(result.is_none());

        let view = get_calculator(&calculator, None);
        assert!(view.summary.is_none());
        assert!(view.projection.is_empty());
    }

    #[test]
    fn test_view_has_default_projection() {
        let calculator = CalculatorState::default();
        update_input(&calculator, &reference_form(), 5).unwrap();

        let view = get_calculator(&calculator, None);
        assert_eq!(view.projection.len(), 8);
        assert_eq!(view.projection[5].orders, 100);
        assert_eq!(view.projection[5].percentage_gain, "5.0");
        assert_eq!(view.summary.unwrap().earning_uplift, Money::from_rupees(8));
    }

    #[test]
    fn test_custom_volumes() {
        let calculator = CalculatorState::default();
        update_input(&calculator, &reference_form(), 5).unwrap();

        let view = get_calculator(&calculator, Some(&[2, 4]));
        let orders: Vec<u32> = view.projection.iter().map(|r| r.orders).collect();
        assert_eq!(orders, vec![2, 4]);
    }

    #[test]
    fn test_invalid_form_is_rejected_and_state_kept() {
        let calculator = CalculatorState::default();
        update_input(&calculator, &reference_form(), 5).unwrap();

        let bad = PricingForm {
            commission_percent: "150".to_string(),
            ..reference_form()
        };
        let err = update_input(&calculator, &bad, 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let (input, result) = calculator.snapshot();
        assert_eq!(input.commission_percent, Some(20.into()));
        assert!(result.is_some());
    }

    #[test]
    fn test_oversized_amount_is_rejected() {
        let calculator = CalculatorState::default();
        let huge = PricingForm {
            listed_price: "79228162514264337593543950335".to_string(),
            ..reference_form()
        };

        let err = update_input(&calculator, &huge, 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("listed price must be between"));
        assert!(calculator.snapshot().1.is_none());
    }

    #[test]
    fn test_configured_margin_applies_when_unset() {
        let calculator = CalculatorState::default();
        let result = update_input(&calculator, &reference_form(), 10).unwrap().unwrap();
        assert_eq!(result.recommended_price, Money::from_rupees(181));

        let explicit = PricingForm {
            profit_margin_percent: Some(5),
            ..reference_form()
        };
        let result = update_input(&calculator, &explicit, 10).unwrap().unwrap();
        assert_eq!(result.recommended_price, Money::from_rupees(173));
    }

    #[tokio::test]
    async fn test_save_requires_result() {
        let db = db_state().await;
        let calculator = CalculatorState::default();
        let records = RecordsState::new();

        let err = save_analysis(&db, &calculator, &records, "Zomato Express", "Thali")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::IncompleteInput);
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_save_requires_names() {
        let db = db_state().await;
        let calculator = CalculatorState::default();
        update_input(&calculator, &reference_form(), 5).unwrap();

        let err = save_analysis(&db, &calculator, &RecordsState::new(), "  ", "Thali")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_save_persists_and_prepends() {
        let db = db_state().await;
        let calculator = CalculatorState::default();
        let records = RecordsState::new();
        update_input(&calculator, &reference_form(), 5).unwrap();

        let record = save_analysis(&db, &calculator, &records, " Zomato Express ", "Thali")
            .await
            .unwrap();

        assert_eq!(record.restaurant_name, "Zomato Express");
        assert_eq!(record.recommended_price, Money::from_rupees(173));
        assert_eq!(records.len(), 1);

        let stored = db.inner().analyses().get_by_id(&record.id).await.unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn test_save_failure_is_generic_and_leaves_state() {
        let db = db_state().await;
        let calculator = CalculatorState::default();
        let records = RecordsState::new();
        update_input(&calculator, &reference_form(), 5).unwrap();
        db.inner().close().await;

        let err = save_analysis(&db, &calculator, &records, "Zomato Express", "Thali")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::PersistenceFailure);
        assert_eq!(err.message, "Failed to save analysis");
        assert!(records.is_empty());
        assert!(calculator.snapshot().1.is_some());
    }
}
