//! # tumdum-db: Database Layer for TumDum
//!
//! Persists saved pricing analyses in SQLite.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tumdum-db                                      │
//! │                                                                         │
//! │  ┌──────────────┐     ┌──────────────────┐     ┌───────────────────┐   │
//! │  │   Database   │────►│ AnalysisRepository│────►│ analysis_history  │   │
//! │  │  (pool.rs)   │     │  insert / list    │     │  (SQLite table)   │   │
//! │  └──────┬───────┘     │  get / delete     │     └───────────────────┘   │
//! │         │             └──────────────────┘                              │
//! │         ▼                                                               │
//! │  ┌──────────────┐                                                       │
//! │  │ migrations   │  embedded from migrations/sqlite                      │
//! │  └──────────────┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! let db = Database::new(DbConfig::new("./tumdum.db")).await?;
//! let records = db.analyses().list(Some("zom")).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::analysis::AnalysisRepository;
