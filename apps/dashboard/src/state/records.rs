//! # Records State
//!
//! The saved analyses currently listed on the records view.
//!
//! ## Optimistic Delete
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  delete(id)                                                             │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  remove_optimistic(id) ──► PendingRemoval { index, record }             │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  store.delete(id)                                                       │
//! │     ├── Ok  ──► drop PendingRemoval                                     │
//! │     └── Err ──► restore(PendingRemoval) ──► record back at its index    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tumdum_core::AnalysisRecord;

/// A record taken out of the local list while its delete is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRemoval {
    index: usize,
    record: AnalysisRecord,
}

impl PendingRemoval {
    /// Id of the removed record.
    pub fn id(&self) -> &str {
        &self.record.id
    }
}

/// Shared list of records, newest first.
#[derive(Debug, Clone, Default)]
pub struct RecordsState {
    records: Arc<Mutex<Vec<AnalysisRecord>>>,
}

impl RecordsState {
    /// Creates an empty records list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the list.
    pub fn with_records<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[AnalysisRecord]) -> R,
    {
        let records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        f(&records)
    }

    /// Replaces the list with a freshly loaded one.
    pub fn replace(&self, records: Vec<AnalysisRecord>) {
        *self.records.lock().unwrap_or_else(PoisonError::into_inner) = records;
    }

    /// Puts a just-saved record at the top.
    pub fn prepend(&self, record: AnalysisRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(0, record);
    }

    /// Removes a record ahead of the store confirming the delete.
    ///
    /// Returns `None` when the record is not listed (never loaded, or a
    /// delete for it is already in flight).
    pub fn remove_optimistic(&self, id: &str) -> Option<PendingRemoval> {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        let index = records.iter().position(|r| r.id == id)?;
        let record = records.remove(index);
        Some(PendingRemoval { index, record })
    }

    /// Undoes an optimistic removal after the store rejected the delete.
    ///
    /// The record goes back at its old position, or at the end if the list
    /// has shrunk since.
    pub fn restore(&self, pending: PendingRemoval) {
        let mut records = self.records.lock().unwrap_or_else(PoisonError::into_inner);
        if records.iter().any(|r| r.id == pending.record.id) {
            return;
        }
        let index = pending.index.min(records.len());
        records.insert(index, pending.record);
    }

    /// Number of listed records.
    pub fn len(&self) -> usize {
        self.with_records(<[AnalysisRecord]>::len)
    }

    /// Checks if nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use tumdum_core::{compute_comparison, Money, NewAnalysis, PricingInput, SavedAnalysis};

    fn record(id: &str, restaurant: &str) -> AnalysisRecord {
        let input = PricingInput {
            menu_price: Some(Money::from_rupees(150)),
            listed_price: Some(Money::from_rupees(200)),
            commission_percent: Some(dec!(20)),
            distance_km: Some(dec!(5)),
            ..PricingInput::default()
        };
        let comparison = compute_comparison(&input).unwrap();
        let new = NewAnalysis::from_input(restaurant, "Thali", &input, &comparison).unwrap();
        let saved = SavedAnalysis {
            id: id.to_string(),
            saved_at: Utc::now(),
        };
        AnalysisRecord::from_saved(&new, saved)
    }

    fn ids(state: &RecordsState) -> Vec<String> {
        state.with_records(|r| r.iter().map(|r| r.id.clone()).collect())
    }

    #[test]
    fn test_failed_delete_restores_original_position() {
        let state = RecordsState::new();
        state.replace(vec![
            record("a", "Zomato Express"),
            record("b", "Biryani House"),
            record("c", "Dosa Corner"),
        ]);

        let pending = state.remove_optimistic("b").unwrap();
        assert_eq!(pending.id(), "b");
        assert_eq!(ids(&state), vec!["a", "c"]);

        state.restore(pending);
        assert_eq!(ids(&state), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_second_removal_of_same_id_is_none() {
        let state = RecordsState::new();
        state.replace(vec![record("a", "Zomato Express")]);

        assert!(state.remove_optimistic("a").is_some());
        assert!(state.remove_optimistic("a").is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_restore_into_shrunk_list_appends() {
        let state = RecordsState::new();
        state.replace(vec![record("a", "A"), record("b", "B"), record("c", "C")]);

        let pending = state.remove_optimistic("c").unwrap();
        state.replace(vec![record("a", "A")]);
        state.restore(pending);

        assert_eq!(ids(&state), vec!["a", "c"]);
    }

    #[test]
    fn test_prepend_puts_newest_first() {
        let state = RecordsState::new();
        state.replace(vec![record("old", "Old Kitchen")]);
        state.prepend(record("new", "New Kitchen"));

        assert_eq!(ids(&state), vec!["new", "old"]);
        assert_eq!(state.len(), 2);
    }
}
