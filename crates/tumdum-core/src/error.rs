//! # Error Types
//!
//! Domain-specific error types for tumdum-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tumdum-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tumdum-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Dashboard errors (in app)                                             │
//! │  └── ApiError         - What the user sees (serialized)                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → User                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! The pricing engine never fails. Missing input yields "no result"
//! (`None`), and every division is guarded to a defined value.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A save was requested before the engine produced a result.
    ///
    /// ## When This Occurs
    /// - Menu price, listed price, commission or distance still empty
    /// - User hits "Save" on the placeholder view
    #[error("Enter order details before saving: {field} is missing")]
    IncompleteInput { field: String },

    /// A saved analysis cannot be found.
    #[error("Analysis not found: {0}")]
    RecordNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the engine runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// One amount exceeds another it is bounded by.
    ///
    /// ## When This Occurs
    /// - Discount larger than the listed price
    #[error("{field} cannot exceed {limit}")]
    Exceeds { field: String, limit: String },

    /// Invalid format (e.g., not a number, invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IncompleteInput {
            field: "distance".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Enter order details before saving: distance is missing"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "profit margin".to_string(),
            min: 1,
            max: 30,
        };
        assert_eq!(err.to_string(), "profit margin must be between 1 and 30");

        let err = ValidationError::Exceeds {
            field: "discount".to_string(),
            limit: "listed price".to_string(),
        };
        assert_eq!(err.to_string(), "discount cannot exceed listed price");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "restaurant name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
