//! # State Module
//!
//! Application state for the dashboard, split into focused types so each
//! command takes only what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Dashboard State                                     │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────────┐ ┌──────────────┐ ┌────────────┐ │
//! │  │   DbState    │ │ CalculatorState  │ │ RecordsState │ │ConfigState │ │
//! │  │              │ │                  │ │              │ │            │ │
//! │  │ • Database   │ │ • Input snapshot │ │ • Listed     │ │ • DB path  │ │
//! │  │   pool       │ │ • Last result    │ │   records    │ │ • Margin   │ │
//! │  │              │ │                  │ │ • Rollback   │ │ • Currency │ │
//! │  └──────────────┘ └──────────────────┘ └──────────────┘ └────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod calculator;
mod config;
mod db;
mod records;

pub use calculator::{Calculator, CalculatorState};
pub use config::{ConfigError, ConfigState};
pub use db::DbState;
pub use records::{PendingRemoval, RecordsState};
