//! Pass-through of the raw record sequence with fetch metadata.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{iso_millis, RealtimeRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Realtime<'a> {
    pub source: &'a str,
    pub fetched_at: String,
    pub count: usize,
    pub records: &'a [RealtimeRecord],
}

pub fn derive<'a>(
    records: &'a [RealtimeRecord],
    source: &'a str,
    fetched_at: DateTime<Utc>,
) -> Realtime<'a> {
    Realtime {
        source,
        fetched_at: iso_millis(fetched_at),
        count: records.len(),
        records,
    }
}
