//! # Analysis Repository
//!
//! Database operations for saved pricing analyses.
//!
//! ## Key Operations
//! - Insert a flattened comparison (id and timestamp assigned here)
//! - List newest first, optionally filtered by restaurant name
//! - Fetch one record, delete one record
//!
//! ## Name Filter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "zom"                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Escape LIKE wildcards:  "50%_off" → "50\%\_off"                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  restaurant_name LIKE '%zom%' ESCAPE '\'   (ASCII case-insensitive)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "Zomato Express" ✓     "Biryani House" ✗                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use tumdum_core::{AnalysisRecord, Money, NewAnalysis, SavedAnalysis};

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        restaurant_name,
        dish_name,
        menu_price,
        listed_price,
        commission_percent,
        discount,
        distance_km,
        delivery_fee_override,
        gold_enabled,
        profit_margin_percent,
        recommended_price,
        competitor_customer_price,
        competitor_restaurant_earning,
        competitor_delivery_fee,
        competitor_platform_fee,
        competitor_gst,
        competitor_effective_commission_percent,
        alternative_customer_price,
        alternative_restaurant_earning,
        alternative_delivery_fee,
        alternative_platform_fee,
        alternative_gst,
        saved_at
    FROM analysis_history
"#;

/// Repository for analysis history operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = AnalysisRepository::new(pool);
///
/// let saved = repo.insert(&new_analysis).await?;
/// let matches = repo.list(Some("zom")).await?;
/// let removed = repo.delete(&saved.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisRepository {
    pool: SqlitePool,
}

impl AnalysisRepository {
    /// Creates a new AnalysisRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AnalysisRepository { pool }
    }

    /// Writes one flattened analysis.
    ///
    /// ## Returns
    /// The generated id (UUID v4) and the save timestamp.
    pub async fn insert(&self, analysis: &NewAnalysis) -> DbResult<SavedAnalysis> {
        let id = Uuid::new_v4().to_string();
        // Stored with microsecond precision; truncate so the caller sees
        // exactly what a later read returns.
        let saved_at = Utc::now().trunc_subsecs(6);

        let competitor = &analysis.comparison.competitor;
        let alternative = &analysis.comparison.alternative;

        debug!(
            id = %id,
            restaurant = %analysis.restaurant_name,
            dish = %analysis.dish_name,
            "Inserting analysis"
        );

        sqlx::query(
            r#"
            INSERT INTO analysis_history (
                id, restaurant_name, dish_name,
                menu_price, listed_price, commission_percent, discount,
                distance_km, delivery_fee_override, gold_enabled,
                profit_margin_percent, recommended_price,
                competitor_customer_price, competitor_restaurant_earning,
                competitor_delivery_fee, competitor_platform_fee, competitor_gst,
                competitor_effective_commission_percent,
                alternative_customer_price, alternative_restaurant_earning,
                alternative_delivery_fee, alternative_platform_fee, alternative_gst,
                saved_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24
            )
            "#,
        )
        .bind(&id)
        .bind(&analysis.restaurant_name)
        .bind(&analysis.dish_name)
        .bind(money_text(analysis.menu_price))
        .bind(money_text(analysis.listed_price))
        .bind(decimal_text(analysis.commission_percent))
        .bind(analysis.discount.map(money_text))
        .bind(decimal_text(analysis.distance_km))
        .bind(analysis.delivery_fee_override.map(money_text))
        .bind(analysis.gold_enabled)
        .bind(i64::from(analysis.profit_margin_percent))
        .bind(money_text(analysis.comparison.recommended_price))
        .bind(money_text(competitor.customer_price))
        .bind(money_text(competitor.restaurant_earning))
        .bind(money_text(competitor.delivery_fee))
        .bind(money_text(competitor.platform_fee))
        .bind(money_text(competitor.gst))
        .bind(decimal_text(competitor.effective_commission_percent))
        .bind(money_text(alternative.customer_price))
        .bind(money_text(alternative.restaurant_earning))
        .bind(money_text(alternative.delivery_fee))
        .bind(money_text(alternative.platform_fee))
        .bind(money_text(alternative.gst))
        .bind(timestamp_text(saved_at))
        .execute(&self.pool)
        .await?;

        info!(id = %id, "Analysis saved");
        Ok(SavedAnalysis { id, saved_at })
    }

    /// Lists saved analyses, most recently saved first.
    ///
    /// ## Arguments
    /// * `filter` - Case-insensitive substring of the restaurant name.
    ///   `None` or a blank string lists everything.
    pub async fn list(&self, filter: Option<&str>) -> DbResult<Vec<AnalysisRecord>> {
        let pattern = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(like_pattern);

        debug!(filter = ?pattern, "Listing analyses");

        let sql = format!(
            r#"{SELECT_COLUMNS}
            WHERE ?1 IS NULL OR restaurant_name LIKE ?1 ESCAPE '\'
            ORDER BY saved_at DESC, rowid DESC
            "#
        );

        let rows: Vec<AnalysisRow> = sqlx::query_as(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "Listed analyses");
        rows.into_iter().map(AnalysisRecord::try_from).collect()
    }

    /// Gets one analysis by id.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - Found
    /// * `Ok(None)` - No such id
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<AnalysisRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");

        let row: Option<AnalysisRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AnalysisRecord::try_from).transpose()
    }

    /// Deletes one analysis.
    ///
    /// ## Returns
    /// `true` if a row was removed, `false` if it was already gone.
    /// Repeated or concurrent deletes of the same id are not errors.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM analysis_history WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            info!(id = %id, "Analysis deleted");
        } else {
            debug!(id = %id, "Delete found no analysis");
        }
        Ok(removed)
    }

    /// Counts saved analyses.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM analysis_history")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw `analysis_history` row; amounts are still text.
#[derive(Debug, sqlx::FromRow)]
struct AnalysisRow {
    id: String,
    restaurant_name: String,
    dish_name: String,
    menu_price: String,
    listed_price: String,
    commission_percent: String,
    discount: Option<String>,
    distance_km: String,
    delivery_fee_override: Option<String>,
    gold_enabled: bool,
    profit_margin_percent: i64,
    recommended_price: String,
    competitor_customer_price: String,
    competitor_restaurant_earning: String,
    competitor_delivery_fee: String,
    competitor_platform_fee: String,
    competitor_gst: String,
    competitor_effective_commission_percent: String,
    alternative_customer_price: String,
    alternative_restaurant_earning: String,
    alternative_delivery_fee: String,
    alternative_platform_fee: String,
    alternative_gst: String,
    saved_at: String,
}

impl TryFrom<AnalysisRow> for AnalysisRecord {
    type Error = DbError;

    fn try_from(row: AnalysisRow) -> DbResult<Self> {
        let money = |column: &str, text: &str| parse_decimal(column, text).map(Money::new);
        let optional_money = |column: &str, text: Option<&str>| {
            text.map(|t| money(column, t)).transpose()
        };

        let profit_margin_percent = u8::try_from(row.profit_margin_percent).map_err(|_| {
            DbError::invalid_data("profit_margin_percent", row.profit_margin_percent.to_string())
        })?;

        let saved_at = DateTime::parse_from_rfc3339(&row.saved_at)
            .map_err(|_| DbError::invalid_data("saved_at", row.saved_at.as_str()))?
            .with_timezone(&Utc);

        Ok(AnalysisRecord {
            menu_price: money("menu_price", &row.menu_price)?,
            listed_price: money("listed_price", &row.listed_price)?,
            commission_percent: parse_decimal("commission_percent", &row.commission_percent)?,
            discount: optional_money("discount", row.discount.as_deref())?,
            distance_km: parse_decimal("distance_km", &row.distance_km)?,
            delivery_fee_override: optional_money(
                "delivery_fee_override",
                row.delivery_fee_override.as_deref(),
            )?,
            gold_enabled: row.gold_enabled,
            profit_margin_percent,
            recommended_price: money("recommended_price", &row.recommended_price)?,
            competitor_customer_price: money(
                "competitor_customer_price",
                &row.competitor_customer_price,
            )?,
            competitor_restaurant_earning: money(
                "competitor_restaurant_earning",
                &row.competitor_restaurant_earning,
            )?,
            competitor_delivery_fee: money("competitor_delivery_fee", &row.competitor_delivery_fee)?,
            competitor_platform_fee: money("competitor_platform_fee", &row.competitor_platform_fee)?,
            competitor_gst: money("competitor_gst", &row.competitor_gst)?,
            competitor_effective_commission_percent: parse_decimal(
                "competitor_effective_commission_percent",
                &row.competitor_effective_commission_percent,
            )?,
            alternative_customer_price: money(
                "alternative_customer_price",
                &row.alternative_customer_price,
            )?,
            alternative_restaurant_earning: money(
                "alternative_restaurant_earning",
                &row.alternative_restaurant_earning,
            )?,
            alternative_delivery_fee: money(
                "alternative_delivery_fee",
                &row.alternative_delivery_fee,
            )?,
            alternative_platform_fee: money(
                "alternative_platform_fee",
                &row.alternative_platform_fee,
            )?,
            alternative_gst: money("alternative_gst", &row.alternative_gst)?,
            saved_at,
            id: row.id,
            restaurant_name: row.restaurant_name,
            dish_name: row.dish_name,
        })
    }
}

fn parse_decimal(column: &str, text: &str) -> DbResult<Decimal> {
    Decimal::from_str(text).map_err(|_| DbError::invalid_data(column, text))
}

/// Stored without trailing zeros so every column shares one scale.
fn decimal_text(value: Decimal) -> String {
    value.normalize().to_string()
}

fn money_text(value: Money) -> String {
    decimal_text(value.amount())
}

fn timestamp_text(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Wraps a user filter in `%…%`, escaping LIKE metacharacters.
fn like_pattern(filter: &str) -> String {
    let mut pattern = String::with_capacity(filter.len() + 2);
    pattern.push('%');
    for c in filter.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use rust_decimal_macros::dec;
    use tumdum_core::{compute_comparison, PricingInput};

    async fn setup() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn sample_analysis(restaurant: &str) -> NewAnalysis {
        let input = PricingInput {
            menu_price: Some(Money::from_rupees(150)),
            listed_price: Some(Money::from_rupees(200)),
            commission_percent: Some(dec!(20)),
            distance_km: Some(dec!(5)),
            ..PricingInput::default()
        };
        let comparison = compute_comparison(&input).unwrap();
        NewAnalysis::from_input(restaurant, "Paneer Tikka", &input, &comparison).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = setup().await;
        let repo = db.analyses();

        let new = sample_analysis("Zomato Express");
        let saved = repo.insert(&new).await.unwrap();

        let record = repo.get_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(record, AnalysisRecord::from_saved(&new, saved));
        assert_eq!(record.recommended_price, Money::from_rupees(173));
        assert_eq!(record.alternative_customer_price, Money::from_paise(23165));
    }

    #[tokio::test]
    async fn test_optional_amounts_survive() {
        let db = setup().await;
        let repo = db.analyses();

        let mut new = sample_analysis("Spice Route");
        new.discount = Some(Money::from_paise(1250));
        new.delivery_fee_override = None;
        let saved = repo.insert(&new).await.unwrap();

        let record = repo.get_by_id(&saved.id).await.unwrap().unwrap();
        assert_eq!(record.discount, Some(Money::from_paise(1250)));
        assert_eq!(record.delivery_fee_override, None);
    }

    #[tokio::test]
    async fn test_filter_matches_substring_case_insensitively() {
        let db = setup().await;
        let repo = db.analyses();

        repo.insert(&sample_analysis("Zomato Express")).await.unwrap();
        repo.insert(&sample_analysis("Biryani House")).await.unwrap();

        let matches = repo.list(Some("zom")).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].restaurant_name, "Zomato Express");

        assert_eq!(repo.list(Some("EXPRESS")).await.unwrap().len(), 1);
        assert!(repo.list(Some("xyz")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_filter_lists_everything() {
        let db = setup().await;
        let repo = db.analyses();

        repo.insert(&sample_analysis("Zomato Express")).await.unwrap();
        repo.insert(&sample_analysis("Biryani House")).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some("   ")).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_wildcards_are_literal() {
        let db = setup().await;
        let repo = db.analyses();

        repo.insert(&sample_analysis("Zomato Express")).await.unwrap();
        repo.insert(&sample_analysis("50% Off Pizza")).await.unwrap();

        let matches = repo.list(Some("%")).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].restaurant_name, "50% Off Pizza");

        assert!(repo.list(Some("_")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let db = setup().await;
        let repo = db.analyses();

        let first = repo.insert(&sample_analysis("First Kitchen")).await.unwrap();
        let second = repo.insert(&sample_analysis("Second Kitchen")).await.unwrap();

        let records = repo.list(None).await.unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![second.id.as_str(), first.id.as_str()]);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let db = setup().await;
        let repo = db.analyses();

        let saved = repo.insert(&sample_analysis("Zomato Express")).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        assert!(repo.delete(&saved.id).await.unwrap());
        assert!(!repo.delete(&saved.id).await.unwrap());

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.get_by_id(&saved.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_deletes_remove_once() {
        let db = setup().await;
        let repo = db.analyses();

        let saved = repo.insert(&sample_analysis("Zomato Express")).await.unwrap();

        let (first, second) = tokio::join!(repo.delete(&saved.id), repo.delete(&saved.id));
        let mut outcomes = vec![first.unwrap(), second.unwrap()];
        outcomes.sort();

        assert_eq!(outcomes, vec![false, true]);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_amounts_stored_without_trailing_zeros() {
        let db = setup().await;
        let repo = db.analyses();

        let saved = repo.insert(&sample_analysis("Zomato Express")).await.unwrap();

        let (gst, customer, commission): (String, String, String) = sqlx::query_as(
            "SELECT alternative_gst, alternative_customer_price, competitor_effective_commission_percent \
             FROM analysis_history WHERE id = ?1",
        )
        .bind(&saved.id)
        .fetch_one(db.pool())
        .await
        .unwrap();

        assert_eq!(gst, "8.65");
        assert_eq!(customer, "231.65");
        assert_eq!(commission, "20");
    }

    #[tokio::test]
    async fn test_corrupt_amount_is_invalid_data() {
        let db = setup().await;
        let repo = db.analyses();

        let saved = repo.insert(&sample_analysis("Zomato Express")).await.unwrap();
        sqlx::query("UPDATE analysis_history SET competitor_gst = 'ten' WHERE id = ?1")
            .bind(&saved.id)
            .execute(db.pool())
            .await
            .unwrap();

        let err = repo.get_by_id(&saved.id).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidData { ref column, .. } if column == "competitor_gst"));
    }

    #[test]
    fn test_like_pattern_escapes() {
        assert_eq!(like_pattern("zom"), "%zom%");
        assert_eq!(like_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(like_pattern(r"a\b"), r"%a\\b%");
    }
}
