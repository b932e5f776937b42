//! # Config Commands
//!
//! Configuration and database status.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, DbState};

/// Gets the current dashboard configuration.
///
/// ## Returns
/// Complete configuration state (read-only)
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Database health as shown by `tumdum config`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub healthy: bool,
    pub migrations_applied: usize,
    pub migrations_total: usize,
    pub record_count: i64,
}

/// Checks connectivity and reports migration and record counts.
pub async fn get_database_status(db: &DbState) -> Result<DatabaseStatus, ApiError> {
    debug!("get_database_status command");
    let database = db.inner();

    let healthy = database.health_check().await;
    let (migrations_total, migrations_applied) = database.migration_status().await?;
    let record_count = database.analyses().count().await?;

    Ok(DatabaseStatus {
        healthy,
        migrations_applied,
        migrations_total,
        record_count,
    })
}
