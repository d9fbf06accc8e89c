//! Timeline events and the comparison chart.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::labels::suffix;
use crate::types::{serialize_iso, RealtimeRecord};
use crate::window::{delta_at, last, previous_or_self};

/// How far back from the newest record event sampling looks.
pub const EVENT_SCAN: usize = 20;
/// Sampling stride when walking back through the scan range.
pub const EVENT_STRIDE: usize = 5;
/// Maximum number of events returned.
pub const EVENT_CAP: usize = 12;
/// Records plotted on the chart.
pub const CHART_WINDOW: usize = 24;

/// Delta magnitude (°C) beyond which a sample is no longer `green`.
pub const DELTA_THRESHOLD: f64 = 1.5;

/// Traffic-light state of a sample relative to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventState {
    Green,
    Amber,
    Red,
}

impl EventState {
    /// `delta > 1.5` is amber, `delta < -1.5` is red, anything else (including
    /// `NaN`) is green.
    pub fn classify(delta: f64) -> Self {
        if delta > DELTA_THRESHOLD {
            EventState::Amber
        } else if delta < -DELTA_THRESHOLD {
            EventState::Red
        } else {
            EventState::Green
        }
    }
}

/// Event headline by the sign of the delta.
pub fn title_for(delta: f64) -> &'static str {
    if delta > 0.0 {
        "Temperature ramp"
    } else if delta < 0.0 {
        "Cooling phase"
    } else {
        "Stable trend"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub events: Vec<TimelineEvent>,
    pub chart: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: String,
    pub title: &'static str,
    #[serde(serialize_with = "serialize_iso")]
    pub time: Option<DateTime<Utc>>,
    pub status: EventState,
    pub summary: String,
    pub sensor_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    /// `HH:MM` (UTC), or `--:--` without a timestamp.
    pub time: String,
    pub temperature: f64,
    pub previous: f64,
    pub baseline: f64,
}

pub fn derive(records: &[RealtimeRecord]) -> Timeline {
    Timeline {
        events: events(records),
        chart: chart(records),
    }
}

/// Every fifth record walking back from the newest, within the last
/// [`EVENT_SCAN`] records. Newest first.
pub fn events(records: &[RealtimeRecord]) -> Vec<TimelineEvent> {
    let Some(newest) = records.len().checked_sub(1) else {
        return Vec::new();
    };
    let oldest = records.len().saturating_sub(EVENT_SCAN);

    (oldest..=newest)
        .rev()
        .step_by(EVENT_STRIDE)
        .take(EVENT_CAP)
        .map(|i| {
            let record = &records[i];
            let delta = delta_at(records, i);
            TimelineEvent {
                id: record.sequence.clone(),
                title: title_for(delta),
                time: record.timestamp,
                status: EventState::classify(delta),
                summary: format!(
                    "Δ {delta:.2} °C since last sample, status {}.",
                    record.status
                ),
                sensor_count: sensor_count(&record.sequence),
            }
        })
        .collect()
}

/// Six sensors plus the last hex digit of the sequence modulo 4.
///
/// A sequence that does not end in a hex digit reports the base six.
pub fn sensor_count(sequence: &str) -> u32 {
    let digit = suffix(sequence, 1)
        .chars()
        .next()
        .and_then(|c| c.to_digit(16))
        .unwrap_or(0);
    6 + digit % 4
}

pub fn chart(records: &[RealtimeRecord]) -> Vec<ChartPoint> {
    let window = last(records, CHART_WINDOW);
    let Some(first) = window.first() else {
        return Vec::new();
    };

    window
        .iter()
        .enumerate()
        .map(|(i, record)| ChartPoint {
            time: record
                .timestamp
                .map(|ts| ts.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string()),
            temperature: record.temperature,
            previous: previous_or_self(window, i).temperature,
            baseline: first.temperature,
        })
        .collect()
}
