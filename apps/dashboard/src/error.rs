//! # API Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Dashboard                          │
//! │                                                                         │
//! │  Command Function → Result<T, ApiError>                                 │
//! │         │                                                               │
//! │         ├── ValidationError / CoreError ──► message shown as-is         │
//! │         │                                                               │
//! │         └── DbError ──► tracing::error!(detail)                         │
//! │                         message: "Failed to save analysis" (generic)   │
//! │                                                                         │
//! │  The engine itself never errors; only input checks and persistence do. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tumdum_core::{CoreError, ValidationError};
use tumdum_db::DbError;

/// Error returned from dashboard commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PERSISTENCE_FAILURE",
///   "message": "Failed to delete record"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Save requested before every required field was entered
    IncompleteInput,

    /// Save, list or delete against the store failed
    PersistenceFailure,

    /// Database unavailable (connection, migrations)
    DatabaseError,
}

/// Generic user-facing messages for store failures.
pub const SAVE_FAILED: &str = "Failed to save analysis";
pub const LOAD_FAILED: &str = "Failed to load records";
pub const DELETE_FAILED: &str = "Failed to delete record";

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Converts a store failure into a generic message.
    ///
    /// The underlying error is logged, never shown.
    pub fn persistence(message: &'static str, err: DbError) -> Self {
        tracing::error!(error = %err, "{}", message);
        ApiError::new(ErrorCode::PersistenceFailure, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::UniqueViolation { field, .. } => {
                tracing::error!("Unique constraint failed on {}", field);
                ApiError::new(ErrorCode::DatabaseError, "Record already exists")
            }
            DbError::InvalidData { column, value } => {
                tracing::error!(column = %column, value = %value, "Unreadable stored value");
                ApiError::new(ErrorCode::DatabaseError, "Stored record is unreadable")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::IncompleteInput { .. } => {
                ApiError::new(ErrorCode::IncompleteInput, err.to_string())
            }
            CoreError::RecordNotFound(id) => ApiError::not_found("Analysis", &id),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persistence_message_is_generic() {
        let err = ApiError::persistence(
            DELETE_FAILED,
            DbError::QueryFailed("database is locked".to_string()),
        );
        assert_eq!(err.code, ErrorCode::PersistenceFailure);
        assert_eq!(err.message, "Failed to delete record");
    }

    #[test]
    fn test_incomplete_input_keeps_field() {
        let err: ApiError = CoreError::IncompleteInput {
            field: "distance".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::IncompleteInput);
        assert!(err.message.contains("distance"));
    }

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Analysis", "abc");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Analysis not found: abc");
    }
}
