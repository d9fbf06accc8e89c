//! Maturity-curve calibration runs and their certificates.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::round_to;
use crate::labels::{suffix, LabelTable};
use crate::types::{serialize_iso, RealtimeRecord};
use crate::window::last;

pub const WINDOW: usize = 9;
/// Runs that are issued a certificate.
pub const CERTIFICATE_COUNT: usize = 5;
/// Certificates still active; the rest are revoked.
pub const ACTIVE_CERTIFICATES: usize = 2;

pub const MIXES: LabelTable<2> = LabelTable::new(["PT-65", "Mass-46"]);
pub const LABS: LabelTable<2> = LabelTable::new(["Lab North", "Lab Central"]);
pub const METHODS: LabelTable<2> = LabelTable::new(["Arrhenius", "Nurse-Saul"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    pub runs: Vec<CalibrationRun>,
    pub certificates: Vec<Certificate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalibrationRun {
    pub id: String,
    pub mix: &'static str,
    pub lab: &'static str,
    #[serde(serialize_with = "serialize_iso")]
    pub date: Option<DateTime<Utc>>,
    /// Correlation coefficient of the fitted curve.
    pub r: f64,
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub calibration: String,
    pub version: usize,
    pub signer: &'static str,
    pub status: &'static str,
}

pub fn derive(records: &[RealtimeRecord]) -> Calibration {
    let runs: Vec<CalibrationRun> = last(records, WINDOW)
        .iter()
        .enumerate()
        .map(|(i, record)| CalibrationRun {
            id: format!("CAL-{}", suffix(&record.sequence, 4)),
            mix: MIXES.for_index(i),
            lab: LABS.for_index(i),
            date: record.timestamp,
            r: round_to(0.985 + (record.temperature % 3.0) * 0.004, 3),
            method: METHODS.for_index(i),
        })
        .collect();

    let certificates = runs
        .iter()
        .take(CERTIFICATE_COUNT)
        .enumerate()
        .map(|(i, run)| Certificate {
            id: format!("CERT-{}-{}", run.mix, i + 1),
            calibration: run.id.clone(),
            version: i + 1,
            signer: "QA Ops",
            status: if i < ACTIVE_CERTIFICATES {
                "Active"
            } else {
                "Revoked"
            },
        })
        .collect();

    Calibration { runs, certificates }
}
