//! Dashboard KPIs and the short live timeline.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{mean, round_half_up, round_to};
use crate::labels::prefix;
use crate::types::{serialize_iso, RealtimeRecord};
use crate::window::last;

/// Records shown in the dashboard's live strip.
pub const TIMELINE_WINDOW: usize = 4;

/// Fleet size outside the sampled feed, added to the distinct-device estimate.
pub const BASE_DEVICE_COUNT: usize = 120;

/// Characters of `sequence` that identify a device.
pub const DEVICE_PREFIX_LEN: usize = 3;

/// Upper bound of the health score.
pub const HEALTH_CEILING: f64 = 99.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub timeline: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub devices: usize,
    pub maturity_checks: f64,
    pub health_score: f64,
    pub alerts_resolved: usize,
    pub avg_temperature: f64,
    pub delta_positive: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePoint {
    #[serde(serialize_with = "serialize_iso")]
    pub time: Option<DateTime<Utc>>,
    pub temperature: f64,
    pub status: String,
}

pub fn derive(records: &[RealtimeRecord]) -> Dashboard {
    Dashboard {
        stats: stats(records),
        timeline: last(records, TIMELINE_WINDOW)
            .iter()
            .map(|r| TimelinePoint {
                time: r.timestamp,
                temperature: r.temperature,
                status: r.status.clone(),
            })
            .collect(),
    }
}

pub fn stats(records: &[RealtimeRecord]) -> DashboardStats {
    let avg_temperature = mean(records.iter().map(|r| r.temperature));

    let devices: HashSet<&str> = records
        .iter()
        .map(|r| prefix(&r.sequence, DEVICE_PREFIX_LEN))
        .collect();

    let delta_positive = records
        .windows(2)
        .filter(|pair| pair[1].temperature - pair[0].temperature > 0.0)
        .count();

    DashboardStats {
        devices: devices.len() + BASE_DEVICE_COUNT,
        maturity_checks: round_half_up(3200.0 + avg_temperature * 40.0),
        health_score: health_score(avg_temperature),
        alerts_resolved: records.iter().filter(|r| r.is_clear()).count(),
        avg_temperature,
        delta_positive,
    }
}

/// Monotone in the mean temperature, capped at [`HEALTH_CEILING`]. `NaN` in,
/// `NaN` out.
pub fn health_score(avg_temperature: f64) -> f64 {
    let score = round_to(92.0 + avg_temperature / 10.0, 1);
    if score.is_nan() {
        score
    } else {
        score.min(HEALTH_CEILING)
    }
}
