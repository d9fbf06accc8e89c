//! Store — the ordered, ephemeral sequence of records from one feed fetch.
//!
//! The store keeps arrival order and never re-sorts. It lives for a single
//! fetch-and-derive pass; nothing is carried across fetches.

use std::ops::Deref;

use serde::Serialize;

use crate::types::RealtimeRecord;

/// Records from one fetch, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RecordStore {
    records: Vec<RealtimeRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<RealtimeRecord>) -> Self {
        Self { records }
    }

    pub fn as_slice(&self) -> &[RealtimeRecord] {
        &self.records
    }

    /// The most recent `n` records, or all of them when the store is shorter.
    pub fn window(&self, n: usize) -> &[RealtimeRecord] {
        crate::window::last(&self.records, n)
    }

    pub fn into_inner(self) -> Vec<RealtimeRecord> {
        self.records
    }
}

impl Deref for RecordStore {
    type Target = [RealtimeRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl FromIterator<RealtimeRecord> for RecordStore {
    fn from_iter<I: IntoIterator<Item = RealtimeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<RealtimeRecord>> for RecordStore {
    fn from(records: Vec<RealtimeRecord>) -> Self {
        Self::new(records)
    }
}
