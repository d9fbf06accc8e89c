//! Derivation functions — one pure function per projection.
//!
//! Every function borrows the full record sequence of one fetch, takes the
//! suffix window it documents, and returns a fresh projection value. None of
//! them hold state, read another projection's output, or fail on short or
//! empty input; they degrade to zero counts, empty lists and placeholder
//! strings instead.
//!
//! | Projection | Window |
//! |---|---|
//! | [`dashboard`] | all records (timeline: last 4) |
//! | [`timeline`] | events: every 5th of the last 20; chart: last 24 |
//! | [`analytics`] | trends: last 56; control: last 12 of those |
//! | [`elements`] | last 7×8 |
//! | [`mass_concrete`] | last 40 |
//! | [`pours`] | last 15 |
//! | [`sensors`] | last 18 |
//! | [`reports`] | last 8 |
//! | [`calibration`] | last 9 |
//! | [`ota`] | last 3 |
//! | [`admin`] | last 8 |
//! | [`maturity`] | all records with a timestamp |

pub mod admin;
pub mod analytics;
pub mod calibration;
pub mod dashboard;
pub mod elements;
pub mod mass_concrete;
pub mod maturity;
pub mod ota;
pub mod pours;
pub mod realtime;
pub mod reports;
pub mod sensors;
pub mod timeline;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::MaturityConfig;
use crate::types::RealtimeRecord;

/// Round to the nearest integer, halves toward positive infinity.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to `digits` decimal places, halves away from zero.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Arithmetic mean, zero for empty input. `NaN` inputs propagate.
pub fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    values.sum::<f64>() / len.max(1) as f64
}

/// Every projection computed from the same record sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projections {
    pub dashboard: dashboard::Dashboard,
    pub timeline: timeline::Timeline,
    pub analytics: analytics::Analytics,
    pub elements: elements::Elements,
    pub mass_concrete: mass_concrete::MassConcrete,
    pub pours: pours::Pours,
    pub sensors: sensors::Sensors,
    pub reports: reports::Reports,
    pub calibration: calibration::Calibration,
    pub ota: ota::Ota,
    pub admin: admin::Admin,
    pub maturity: maturity::Maturity,
}

impl Projections {
    /// Run every derivation over `records`.
    ///
    /// `now` is only read by projections that stamp a wall-clock instant.
    pub fn compute(
        records: &[RealtimeRecord],
        now: DateTime<Utc>,
        maturity_params: &MaturityConfig,
    ) -> Self {
        Self {
            dashboard: dashboard::derive(records),
            timeline: timeline::derive(records),
            analytics: analytics::derive(records),
            elements: elements::derive(records),
            mass_concrete: mass_concrete::derive(records),
            pours: pours::derive(records),
            sensors: sensors::derive(records),
            reports: reports::derive(records),
            calibration: calibration::derive(records),
            ota: ota::derive(records),
            admin: admin::derive(records, now),
            maturity: maturity::derive(records, maturity_params, None),
        }
    }
}
