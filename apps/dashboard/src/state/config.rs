//! # Configuration State
//!
//! Stores dashboard configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TUMDUM_*`)
//! 2. Defaults (this file)
//!
//! | Variable                        | Default                      |
//! |---------------------------------|------------------------------|
//! | `TUMDUM_DB_PATH`                | platform data dir/tumdum.db  |
//! | `TUMDUM_DEFAULT_PROFIT_MARGIN`  | 5 (must be 1–30)             |
//! | `TUMDUM_CURRENCY_SYMBOL`        | ₹                            |
//! | `TUMDUM_DB_MAX_CONNECTIONS`     | 5                            |
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex needed.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tumdum_core::validation::validate_profit_margin;
use tumdum_core::{Money, CURRENCY_SYMBOL, DEFAULT_PROFIT_MARGIN_PERCENT};

/// Dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Explicit database file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Margin pre-selected for new calculations (1–30)
    pub default_profit_margin_percent: u8,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Maximum connections in the SQLite pool
    pub db_max_connections: u32,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Could not determine app data directory")]
    NoDataDirectory,

    #[error("Could not create data directory: {0}")]
    DataDirectory(#[from] std::io::Error),
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState {
            database_path: None,
            default_profit_margin_percent: DEFAULT_PROFIT_MARGIN_PERCENT,
            currency_symbol: CURRENCY_SYMBOL.to_string(),
            db_max_connections: 5,
        }
    }
}

impl ConfigState {
    /// Loads configuration from `TUMDUM_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = ConfigState::default();

        if let Some(path) = get("TUMDUM_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(margin) = get("TUMDUM_DEFAULT_PROFIT_MARGIN") {
            let margin: u8 = margin.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("TUMDUM_DEFAULT_PROFIT_MARGIN".to_string())
            })?;
            validate_profit_margin(margin).map_err(|_| {
                ConfigError::InvalidValue("TUMDUM_DEFAULT_PROFIT_MARGIN".to_string())
            })?;
            config.default_profit_margin_percent = margin;
        }

        if let Some(symbol) = get("TUMDUM_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(max) = get("TUMDUM_DB_MAX_CONNECTIONS") {
            config.db_max_connections = max
                .trim()
                .parse()
                .ok()
                .filter(|n: &u32| *n > 0)
                .ok_or_else(|| ConfigError::InvalidValue("TUMDUM_DB_MAX_CONNECTIONS".to_string()))?;
        }

        Ok(config)
    }

    /// Formats an amount with the configured symbol and two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use tumdum_core::Money;
    /// use tumdum_dashboard::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_paise(23165)), "₹231.65");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ConfigState::default());
        assert_eq!(config.default_profit_margin_percent, 5);
        assert_eq!(config.currency_symbol, "₹");
    }

    #[test]
    fn test_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("TUMDUM_DB_PATH", "/tmp/tumdum-test.db"),
            ("TUMDUM_DEFAULT_PROFIT_MARGIN", "12"),
            ("TUMDUM_CURRENCY_SYMBOL", "Rs. "),
            ("TUMDUM_DB_MAX_CONNECTIONS", "2"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/tumdum-test.db")));
        assert_eq!(config.default_profit_margin_percent, 12);
        assert_eq!(config.db_max_connections, 2);
        assert_eq!(config.format_currency(Money::from_rupees(10)), "Rs. 10.00");
    }

    #[test]
    fn test_invalid_margin_rejected() {
        for bad in ["0", "31", "five"] {
            let err =
                ConfigState::from_lookup(lookup(&[("TUMDUM_DEFAULT_PROFIT_MARGIN", bad)]))
                    .unwrap_err();
            assert!(matches!(err, ConfigError::InvalidValue(ref v) if v == "TUMDUM_DEFAULT_PROFIT_MARGIN"));
        }
    }

    #[test]
    fn test_zero_connections_rejected() {
        assert!(ConfigState::from_lookup(lookup(&[("TUMDUM_DB_MAX_CONNECTIONS", "0")])).is_err());
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_paise(-2335)), "-₹23.35");
    }
}
