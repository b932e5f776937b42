//! # Repositories
//!
//! One repository per table, each holding a clone of the pool.
//!
//! ```text
//! Database::analyses() ──► AnalysisRepository ──► analysis_history
//! ```

pub mod analysis;
