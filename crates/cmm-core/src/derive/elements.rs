//! Structural-element rollups.
//!
//! Records in the window are spread over the element types by position, so
//! each bucket sees every seventh reading.

use serde::Serialize;

use super::round_half_up;
use crate::labels::LabelTable;
use crate::types::RealtimeRecord;
use crate::window::last;

pub const ELEMENT_TYPES: LabelTable<7> = LabelTable::new([
    "Slab",
    "Beam",
    "Column",
    "Shear Wall",
    "Footing",
    "Post-Tension",
    "Precast",
]);

/// Readings per element type in the window.
pub const READINGS_PER_ELEMENT: usize = 8;
pub const WINDOW: usize = 7 * READINGS_PER_ELEMENT;

/// Maturity above which the earlier strip estimate applies.
pub const EARLY_STRIP_MATURITY: f64 = 600.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Elements {
    pub elements: Vec<ElementSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSummary {
    pub name: &'static str,
    pub active: f64,
    pub avg_temp: f64,
    pub maturity: f64,
    pub strip_eta: &'static str,
    pub compliance: f64,
    #[serde(skip)]
    pub count: usize,
}

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    count: usize,
    total_temp: f64,
}

pub fn derive(records: &[RealtimeRecord]) -> Elements {
    let mut buckets = [Bucket::default(); 7];
    for (i, record) in last(records, WINDOW).iter().enumerate() {
        let bucket = &mut buckets[LabelTable::<7>::bucket(i)];
        bucket.count += 1;
        bucket.total_temp += record.temperature;
    }

    let elements = buckets
        .iter()
        .zip(ELEMENT_TYPES.labels())
        .enumerate()
        .map(|(i, (bucket, &name))| {
            let maturity = round_half_up(bucket.total_temp * 4.0);
            ElementSummary {
                name,
                active: round_half_up(bucket.count as f64 / 4.0).max(1.0),
                avg_temp: if bucket.count > 0 {
                    bucket.total_temp / bucket.count as f64
                } else {
                    0.0
                },
                maturity,
                strip_eta: if maturity > EARLY_STRIP_MATURITY {
                    "5h 45m"
                } else {
                    "6h 20m"
                },
                compliance: compliance(i),
                count: bucket.count,
            }
        })
        .collect();

    Elements { elements }
}

/// `0.92 + ((bucket + 1) × 0.01) mod 0.04`
pub fn compliance(bucket: usize) -> f64 {
    0.92 + ((bucket + 1) as f64 * 0.01) % 0.04
}
