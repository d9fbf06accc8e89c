//! Suffix windows and neighbour lookups shared by the derivation functions.

use crate::types::RealtimeRecord;

/// The last `n` items of `items`, or all of them when there are fewer.
pub fn last<T>(items: &[T], n: usize) -> &[T] {
    &items[items.len().saturating_sub(n)..]
}

/// The record before `index`, falling back to the record itself at index 0.
///
/// Using the record itself makes the first delta in any window zero.
pub fn previous_or_self(records: &[RealtimeRecord], index: usize) -> &RealtimeRecord {
    index
        .checked_sub(1)
        .and_then(|i| records.get(i))
        .unwrap_or(&records[index])
}

/// Temperature change from the previous record (zero for the first).
pub fn delta_at(records: &[RealtimeRecord], index: usize) -> f64 {
    records[index].temperature - previous_or_self(records, index).temperature
}
