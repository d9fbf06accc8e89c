//! Firmware release rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::round_half_up;
use crate::labels::LabelTable;
use crate::types::{serialize_iso, RealtimeRecord};
use crate::window::last;

pub const WINDOW: usize = 3;

pub const CHANNELS: LabelTable<3> = LabelTable::new(["stable", "canary", "archive"]);
pub const RELEASE_STATES: LabelTable<3> = LabelTable::new(["Healthy", "Monitoring", "Retired"]);
pub const COHORTS: LabelTable<3> = LabelTable::new(["All", "Tower A", "Legacy"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ota {
    pub releases: Vec<Release>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub version: String,
    pub channel: &'static str,
    pub cohort: &'static str,
    #[serde(serialize_with = "serialize_iso")]
    pub promoted: Option<DateTime<Utc>>,
    pub status: &'static str,
}

/// `v{2+i}.{|round(t)| mod 5}.{i}`. A non-finite temperature gives minor 0.
pub fn version(index: usize, temperature: f64) -> String {
    let rounded = round_half_up(temperature).abs();
    let minor = if rounded.is_finite() {
        (rounded % 5.0) as u8
    } else {
        0
    };
    format!("v{}.{minor}.{index}", 2 + index)
}

pub fn derive(records: &[RealtimeRecord]) -> Ota {
    let releases = last(records, WINDOW)
        .iter()
        .enumerate()
        .map(|(i, record)| Release {
            version: version(i, record.temperature),
            channel: CHANNELS.for_index(i),
            cohort: COHORTS.for_index(i),
            promoted: record.timestamp,
            status: RELEASE_STATES.for_index(i),
        })
        .collect();
    Ota { releases }
}
