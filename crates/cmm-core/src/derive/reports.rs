//! Generated report rows.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::pours::pour_id;
use crate::labels::{suffix, LabelTable};
use crate::types::{serialize_iso, RealtimeRecord};
use crate::window::last;

pub const WINDOW: usize = 8;

pub const REPORT_TYPES: LabelTable<4> =
    LabelTable::new(["PT Strip", "Daily Summary", "Cube Equivalence", "Mass Concrete"]);
pub const REPORT_STATES: LabelTable<4> =
    LabelTable::new(["Signed", "Ready", "Delivered", "Pending Approval"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reports {
    pub reports: Vec<Report>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub pour: String,
    #[serde(serialize_with = "serialize_iso")]
    pub generated: Option<DateTime<Utc>>,
    pub status: &'static str,
}

pub fn derive(records: &[RealtimeRecord]) -> Reports {
    let reports = last(records, WINDOW)
        .iter()
        .enumerate()
        .map(|(i, record)| Report {
            id: format!("RPT-{}", suffix(&record.sequence, 4)),
            kind: REPORT_TYPES.for_index(i),
            pour: pour_id(&record.sequence),
            generated: record.timestamp,
            status: REPORT_STATES.for_index(i),
        })
        .collect();
    Reports { reports }
}
