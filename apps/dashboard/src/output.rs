//! # Terminal Output
//!
//! Text rendering for command results. Every renderer returns a `String`
//! so the layout can be checked without a terminal; `--json` bypasses this
//! module and prints the command's DTO directly.
//!
//! ## Number Formatting
//! - Currency: configured symbol, two decimals (`₹231.65`)
//! - Percentages: one decimal (`20.0%`)
//! - Menu and listed price echoes: as entered (`199.5`)

use colored::Colorize;
use std::fmt::Write;

use crate::commands::calculator::CalculatorView;
use crate::commands::config::DatabaseStatus;
use crate::commands::records::{DeleteOutcome, RecordDetail};
use crate::error::ApiError;
use crate::state::ConfigState;
use tumdum_core::format::{format_percent, format_raw};
use tumdum_core::pricing::GST_RATE;
use tumdum_core::{
    AnalysisRecord, ComparisonResult, ComparisonSummary, Money, OrderVolumeRow, Platform,
};

const LABEL_WIDTH: usize = 22;
const COLUMN_WIDTH: usize = 12;

/// Comparison tables for the calculator, or the placeholder while the form
/// is incomplete.
pub fn render_calculator(config: &ConfigState, view: &CalculatorView) -> String {
    let (Some(result), Some(summary)) = (&view.result, &view.summary) else {
        let missing = view.input.first_missing_field().unwrap_or("order details");
        return format!(
            "{}\n",
            format!("Enter order details to see the comparison (missing: {missing})").yellow()
        );
    };

    let mut out = String::new();
    out.push_str(&render_breakdowns(config, result));
    out.push('\n');
    out.push_str(&render_summary(config, summary));
    if !view.projection.is_empty() {
        out.push('\n');
        out.push_str(&render_projection(config, &view.projection));
    }
    out
}

fn row(out: &mut String, label: &str, competitor: &str, alternative: &str) {
    let _ = writeln!(
        out,
        "{:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
        label, competitor, alternative
    );
}

/// Side-by-side fee breakdown for both platforms.
pub fn render_breakdowns(config: &ConfigState, result: &ComparisonResult) -> String {
    let money = |m: Money| config.format_currency(m);
    let competitor = &result.competitor;
    let alternative = &result.alternative;

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
            "",
            Platform::Competitor.display_name(),
            Platform::Alternative.display_name()
        )
        .bold()
    );

    // Listed price is shown as entered, not padded to two decimals
    row(
        &mut out,
        "Listed price",
        &format!(
            "{}{}",
            config.currency_symbol,
            format_raw(competitor.listed_price.amount())
        ),
        &money(result.recommended_price),
    );
    row(&mut out, "After discount", &money(competitor.discounted_price), "-");
    row(
        &mut out,
        "Delivery fee",
        &money(competitor.delivery_fee),
        &money(alternative.delivery_fee),
    );
    row(
        &mut out,
        "Platform fee",
        &money(competitor.platform_fee),
        &money(alternative.platform_fee),
    );
    row(
        &mut out,
        &format!("GST ({}%)", format_raw(GST_RATE.percentage())),
        &money(competitor.gst),
        &money(alternative.gst),
    );
    row(
        &mut out,
        "Customer pays",
        &money(competitor.customer_price),
        &money(alternative.customer_price),
    );
    row(
        &mut out,
        "Restaurant earns",
        &money(competitor.restaurant_earning),
        &money(alternative.restaurant_earning),
    );
    row(
        &mut out,
        "Effective commission",
        &format!("{}%", format_percent(competitor.effective_commission_percent)),
        "-",
    );

    let _ = writeln!(
        out,
        "\n{} {}",
        "Recommended TumDum price:".bold(),
        money(result.recommended_price).green().bold()
    );
    out
}

/// Headline lines of the results panel.
pub fn render_summary(config: &ConfigState, summary: &ComparisonSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}",
        format!(
            "✓ Earn {} more per order ({}% more)",
            config.format_currency(summary.earning_uplift),
            format_percent(summary.earning_uplift_percent)
        )
        .green()
    );

    if summary.customer_savings.is_negative() {
        let extra = Money::zero() - summary.customer_savings;
        let _ = writeln!(
            out,
            "{}",
            format!("✗ Customer pays {} more", config.format_currency(extra)).red()
        );
    } else {
        let _ = writeln!(
            out,
            "{}",
            format!(
                "✓ Customer pays {} less",
                config.format_currency(summary.customer_savings)
            )
            .green()
        );
    }

    let _ = writeln!(
        out,
        "  Commission: -{}",
        config.format_currency(summary.commission_deduction)
    );
    out
}

/// Profit at each order volume.
pub fn render_projection(config: &ConfigState, rows: &[OrderVolumeRow]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:>8}{:>16}{:>16}{:>14}{:>8}",
            "Orders", "Zomato profit", "TumDum profit", "Difference", "Gain"
        )
        .bold()
    );

    for r in rows {
        let _ = writeln!(
            out,
            "{:>8}{:>16}{:>16}{:>14}{:>8}",
            r.orders,
            config.format_currency(r.competitor_profit),
            config.format_currency(r.alternative_profit),
            config.format_currency(r.profit_difference),
            format!("{}%", r.percentage_gain)
        );
    }
    out
}

/// Records list, newest first.
pub fn render_records(config: &ConfigState, records: &[AnalysisRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", "No saved analyses".dimmed());
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<17} {:<24} {:<20} {:>10} {:>12}  {}",
            "Saved", "Restaurant", "Dish", "Listed", "TumDum", "Id"
        )
        .bold()
    );

    for record in records {
        let _ = writeln!(
            out,
            "{:<17} {:<24} {:<20} {:>10} {:>12}  {}",
            record.saved_at.format("%Y-%m-%d %H:%M"),
            truncate(&record.restaurant_name, 24),
            truncate(&record.dish_name, 20),
            record.listed_price_display(),
            config.format_currency(record.recommended_price),
            record.id.dimmed()
        );
    }
    let _ = writeln!(out, "\n{} record(s)", records.len());
    out
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

/// One saved analysis in full.
pub fn render_record(config: &ConfigState, detail: &RecordDetail) -> String {
    let record = &detail.record;
    let money = |m: Money| config.format_currency(m);
    let optional = |m: Option<Money>| m.map_or_else(|| "-".to_string(), money);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} · {}",
        record.restaurant_name.bold(),
        record.dish_name
    );
    let _ = writeln!(
        out,
        "{}\n",
        format!("{} · saved {}", record.id, record.saved_at.to_rfc3339()).dimmed()
    );

    let _ = writeln!(out, "Menu price:      {}", record.menu_price_display());
    let _ = writeln!(out, "Listed price:    {}", record.listed_price_display());
    let _ = writeln!(out, "Commission:      {}%", format_raw(record.commission_percent));
    let _ = writeln!(out, "Discount:        {}", optional(record.discount));
    let _ = writeln!(out, "Distance:        {} km", format_raw(record.distance_km));
    let _ = writeln!(out, "Delivery fee:    {}", optional(record.delivery_fee_override));
    let _ = writeln!(out, "Gold:            {}", if record.gold_enabled { "yes" } else { "no" });
    let _ = writeln!(out, "Profit margin:   {}%\n", record.profit_margin_percent);

    let _ = writeln!(
        out,
        "{}",
        format!(
            "{:<LABEL_WIDTH$}{:>COLUMN_WIDTH$}{:>COLUMN_WIDTH$}",
            "",
            Platform::Competitor.display_name(),
            Platform::Alternative.display_name()
        )
        .bold()
    );
    row(
        &mut out,
        "Listed price",
        &format!("{}{}", config.currency_symbol, record.listed_price_display()),
        &money(record.recommended_price),
    );
    row(
        &mut out,
        "Delivery fee",
        &money(record.competitor_delivery_fee),
        &money(record.alternative_delivery_fee),
    );
    row(
        &mut out,
        "Platform fee",
        &money(record.competitor_platform_fee),
        &money(record.alternative_platform_fee),
    );
    row(
        &mut out,
        "GST",
        &money(record.competitor_gst),
        &money(record.alternative_gst),
    );
    row(
        &mut out,
        "Customer pays",
        &money(record.competitor_customer_price),
        &money(record.alternative_customer_price),
    );
    row(
        &mut out,
        "Restaurant earns",
        &money(record.competitor_restaurant_earning),
        &money(record.alternative_restaurant_earning),
    );
    row(
        &mut out,
        "Effective commission",
        &format!(
            "{}%",
            format_percent(record.competitor_effective_commission_percent)
        ),
        "-",
    );

    out.push('\n');
    out.push_str(&render_summary(config, &detail.summary));
    out
}

/// Confirmation after a save.
pub fn render_saved(config: &ConfigState, record: &AnalysisRecord) -> String {
    format!(
        "{} {} · {} at {}\n  id {}\n",
        "✓ Saved".green().bold(),
        record.restaurant_name,
        record.dish_name,
        config.format_currency(record.recommended_price),
        record.id
    )
}

/// Confirmation after a delete.
pub fn render_deleted(outcome: &DeleteOutcome) -> String {
    if outcome.removed {
        format!("{} {}\n", "✓ Deleted".green().bold(), outcome.id)
    } else {
        format!("{} {}\n", "Already deleted".yellow(), outcome.id)
    }
}

/// Effective configuration and database health.
pub fn render_config(config: &ConfigState, status: &DatabaseStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Configuration".bold());
    let _ = writeln!(
        out,
        "  Database:        {}",
        config
            .database_path
            .as_ref()
            .map_or_else(|| "(platform data directory)".to_string(), |p| p.display().to_string())
    );
    let _ = writeln!(
        out,
        "  Default margin:  {}%",
        config.default_profit_margin_percent
    );
    let _ = writeln!(out, "  Currency:        {}", config.currency_symbol);
    let _ = writeln!(out, "  Max connections: {}", config.db_max_connections);

    let health = if status.healthy {
        "healthy".green()
    } else {
        "unreachable".red()
    };
    let _ = writeln!(out, "\n{}", "Database".bold());
    let _ = writeln!(out, "  Status:          {}", health);
    let _ = writeln!(
        out,
        "  Migrations:      {}/{}",
        status.migrations_applied, status.migrations_total
    );
    let _ = writeln!(out, "  Saved analyses:  {}", status.record_count);
    out
}

/// Error line for stderr.
pub fn render_error(err: &ApiError) -> String {
    format!("{} {}", "error:".red().bold(), err.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::calculator::{get_calculator, update_input, PricingForm};
    use crate::state::CalculatorState;

    fn reference_view() -> CalculatorView {
        colored::control::set_override(false);
        let calculator = CalculatorState::default();
        let form = PricingForm {
            menu_price: "150".to_string(),
            listed_price: "200".to_string(),
            commission_percent: "20".to_string(),
            distance_km: "5".to_string(),
            ..PricingForm::default()
        };
        update_input(&calculator, &form, 5).unwrap();
        get_calculator(&calculator, Some(&[100]))
    }

    #[test]
    fn test_calculator_tables() {
        let out = render_calculator(&ConfigState::default(), &reference_view());

        assert!(out.contains("Zomato"));
        assert!(out.contains("TumDum"));
        assert!(out.contains("₹255.00"));
        assert!(out.contains("₹231.65"));
        assert!(out.contains("GST (5%)"));
        assert!(out.contains("20.0%"));
        assert!(out.contains("Recommended TumDum price: ₹173.00"));
        assert!(out.contains("✓ Earn ₹8.00 more per order (5.0% more)"));
        assert!(out.contains("✓ Customer pays ₹23.35 less"));
        assert!(out.contains("Commission: -₹40.00"));
        assert!(out.contains("₹16000.00"));
        assert!(out.contains("5.0%"));
    }

    #[test]
    fn test_listed_price_shown_as_entered() {
        let out = render_calculator(&ConfigState::default(), &reference_view());
        let listed = out
            .lines()
            .find(|line| line.starts_with("Listed price"))
            .unwrap();

        assert!(listed.contains("₹200 "));
        assert!(!listed.contains("₹200.00"));
        assert!(listed.contains("₹173.00"));
    }

    #[test]
    fn test_placeholder_names_missing_field() {
        colored::control::set_override(false);
        let view = get_calculator(&CalculatorState::default(), None);
        let out = render_calculator(&ConfigState::default(), &view);
        assert!(out.contains("Enter order details"));
        assert!(out.contains("menu price"));
    }

    #[test]
    fn test_dearer_alternative_is_flagged() {
        colored::control::set_override(false);
        let summary = ComparisonSummary {
            earning_uplift: Money::from_rupees(8),
            earning_uplift_percent: 5.into(),
            customer_savings: Money::from_paise(-1250),
            commission_deduction: Money::from_rupees(40),
        };
        let out = render_summary(&ConfigState::default(), &summary);
        assert!(out.contains("✗ Customer pays ₹12.50 more"));
    }

    #[test]
    fn test_empty_records() {
        colored::control::set_override(false);
        assert_eq!(
            render_records(&ConfigState::default(), &[]),
            "No saved analyses\n"
        );
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Dosa", 10), "Dosa");
        assert_eq!(truncate("Hyderabadi Biryani", 8), "Hyderab…");
    }

    #[test]
    fn test_deleted_wording() {
        colored::control::set_override(false);
        let removed = DeleteOutcome {
            id: "abc".to_string(),
            removed: true,
        };
        let gone = DeleteOutcome {
            id: "abc".to_string(),
            removed: false,
        };
        assert_eq!(render_deleted(&removed), "✓ Deleted abc\n");
        assert_eq!(render_deleted(&gone), "Already deleted abc\n");
    }
}
