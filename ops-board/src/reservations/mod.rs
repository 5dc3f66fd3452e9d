//! Reservation cache
//!
//! Snapshot-replace only; reservations carry no derived state.

use shared::ReservationRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationStore {
    records: Vec<ReservationRecord>,
    loaded: bool,
}

impl ReservationStore {
    /// Replace the cached list with a fetched snapshot
    pub fn replace(&mut self, snapshot: Vec<ReservationRecord>) {
        self.records = snapshot;
        self.loaded = true;
    }

    pub fn records(&self) -> &[ReservationRecord] {
        &self.records
    }

    /// Whether any fetch has succeeded yet
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
