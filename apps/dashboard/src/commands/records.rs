//! # Records Commands
//!
//! Listing, viewing and deleting saved analyses.
//!
//! ## Delete Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete_record(id)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_uuid ──► RecordsState::remove_optimistic (hide at once)       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AnalysisRepository::delete                                             │
//! │       ├── Ok(_)  ──► DeleteOutcome                                      │
//! │       └── Err(e) ──► restore the record ──► "Failed to delete record"   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ApiError, DELETE_FAILED, LOAD_FAILED};
use crate::state::{DbState, RecordsState};
use tumdum_core::validation::{validate_name_filter, validate_uuid};
use tumdum_core::{AnalysisRecord, ComparisonSummary, CoreError};

/// A saved analysis with its headline numbers recomputed for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordDetail {
    #[serde(flatten)]
    pub record: AnalysisRecord,
    pub summary: ComparisonSummary,
}

/// Result of a delete request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOutcome {
    pub id: String,
    /// `false` when the store had no such record (already deleted).
    pub removed: bool,
}

/// Loads saved analyses, newest first.
///
/// ## Arguments
/// * `filter` - Case-insensitive substring of the restaurant name; blank
///   lists everything
///
/// ## Errors
/// `PersistenceFailure` with "Failed to load records"; the listed records
/// are left as they were.
pub async fn load_records(
    db: &DbState,
    records: &RecordsState,
    filter: &str,
) -> Result<Vec<AnalysisRecord>, ApiError> {
    let filter = validate_name_filter(filter)?;
    debug!(?filter, "load_records command");

    let loaded = db
        .inner()
        .analyses()
        .list(filter.as_deref())
        .await
        .map_err(|e| ApiError::persistence(LOAD_FAILED, e))?;

    records.replace(loaded.clone());
    Ok(loaded)
}

/// Gets one saved analysis with its summary.
pub async fn get_record(db: &DbState, id: &str) -> Result<RecordDetail, ApiError> {
    validate_uuid(id)?;
    let id = id.trim();
    debug!(id, "get_record command");

    let record = db
        .inner()
        .analyses()
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::persistence(LOAD_FAILED, e))?
        .ok_or_else(|| CoreError::RecordNotFound(id.to_string()))?;

    let summary = record.summary();
    Ok(RecordDetail { record, summary })
}

/// Deletes a saved analysis.
///
/// The record leaves the local list before the store is asked, and comes
/// back at its old position if the store fails. Deleting an id that is
/// already gone succeeds with `removed: false`.
pub async fn delete_record(
    db: &DbState,
    records: &RecordsState,
    id: &str,
) -> Result<DeleteOutcome, ApiError> {
    validate_uuid(id)?;
    let id = id.trim();

    let pending = records.remove_optimistic(id);

    match db.inner().analyses().delete(id).await {
        Ok(removed) => {
            if removed {
                info!(id, "Record deleted");
            } else {
                debug!(id, "Record was already deleted");
            }
            Ok(DeleteOutcome {
                id: id.to_string(),
                removed,
            })
        }
        Err(e) => {
            if let Some(pending) = pending {
                warn!(id = pending.id(), "Delete failed, restoring record");
                records.restore(pending);
            }
            Err(ApiError::persistence(DELETE_FAILED, e))
        }
    }
}
