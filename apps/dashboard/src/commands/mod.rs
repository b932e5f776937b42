//! # Dashboard Commands
//!
//! Every operation the command line can trigger.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── calculator.rs  ◄─── Form input, comparison, save
//! ├── records.rs     ◄─── List, view, delete saved analyses
//! └── config.rs      ◄─── Configuration and database status
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the calculator
//! fn update_input(calculator: &CalculatorState, form: &PricingForm, margin: u8)
//!
//! // Needs the database and the listed records
//! async fn delete_record(db: &DbState, records: &RecordsState, id: &str)
//! ```
//!
//! Commands return `Result<T, ApiError>`; `T` and `ApiError` both serialize
//! to camelCase JSON for `--json` output.

pub mod calculator;
pub mod config;
pub mod records;
