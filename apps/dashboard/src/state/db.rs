//! # Database State
//!
//! Wraps the `Database` handle built once at startup.
//!
//! ## Thread Safety
//! `Database` holds a `SqlitePool`, which is already safe to share. Save,
//! list and delete can run concurrently without extra locking.

use tumdum_db::Database;

/// Wrapper around `Database` handed to commands.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
