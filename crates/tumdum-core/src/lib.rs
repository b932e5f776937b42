//! # tumdum-core: Pure Pricing Logic for TumDum
//!
//! This crate holds the pricing rules that compare a commission-based
//! delivery platform (Zomato) with TumDum's flat-fee model. Everything here
//! is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       TumDum Pricing Dashboard                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    tumdum (CLI / dashboard)                     │   │
//! │  │     compare ──► save ──► records ──► show ──► delete           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tumdum-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │  pricing  │  │   money   │  │ projection │  │ validation│  │   │
//! │  │   │  engine   │  │   Money   │  │  volumes   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   tumdum-db (Database Layer)                    │   │
//! │  │          SQLite analysis history, migrations, repository        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pricing`] - The comparison engine and its fee constants
//! - [`projection`] - Order-volume profit table
//! - [`types`] - Domain types (PricingInput, breakdowns, AnalysisRecord)
//! - [`money`] - Exact decimal rupee amounts
//! - [`validation`] - Form input checks
//! - [`format`] - Display rounding rules
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use tumdum_core::{compute_comparison, Money, PricingInput};
//!
//! let input = PricingInput {
//!     menu_price: Some(Money::from_rupees(150)),
//!     listed_price: Some(Money::from_rupees(200)),
//!     commission_percent: Some(Decimal::from(20)),
//!     distance_km: Some(Decimal::from(5)),
//!     ..PricingInput::default()
//! };
//!
//! let result = compute_comparison(&input).unwrap();
//! assert_eq!(result.recommended_price, Money::from_rupees(173));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod format;
pub mod money;
pub mod pricing;
pub mod projection;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::compute_comparison;
pub use projection::{project, project_default, Projection, DEFAULT_ORDER_VOLUMES};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Symbol used by `Money`'s `Display` impl.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Profit margin pre-selected on the slider.
pub const DEFAULT_PROFIT_MARGIN_PERCENT: u8 = 5;

/// Lowest margin the slider allows.
pub const MIN_PROFIT_MARGIN_PERCENT: u8 = 1;

/// Highest margin the slider allows.
pub const MAX_PROFIT_MARGIN_PERCENT: u8 = 30;

/// Largest amount, in rupees, accepted for any price, discount or fee.
pub const MAX_AMOUNT_RUPEES: i64 = 10_000_000;

/// Largest delivery distance accepted.
pub const MAX_DISTANCE_KM: i64 = 1_000;

/// Maximum length of restaurant and dish names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of the records search filter.
pub const MAX_FILTER_LENGTH: usize = 100;
