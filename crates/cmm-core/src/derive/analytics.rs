//! Analytics: maturity trends, mix cohorts, X̄/R control series and insights.

use serde::Serialize;

use crate::labels::LabelTable;
use crate::types::RealtimeRecord;
use crate::window::{last, previous_or_self};

/// Records in the trend series.
pub const TREND_WINDOW: usize = 56;
/// Trend records per reported day.
pub const RECORDS_PER_DAY: usize = 8;
/// Batches in the control chart, taken from the end of the trend window.
pub const CONTROL_WINDOW: usize = 12;
/// Constant added to every range value.
pub const RANGE_OFFSET: f64 = 3.0;

pub const COHORTS: LabelTable<4> = LabelTable::new(["Mix A", "Mix B", "Mix C", "Mix D"]);

const COHORT_CURRENT_DEFAULT: f64 = 28.0;
const COHORT_PREVIOUS_DEFAULT: f64 = 27.0;
const COHORT_BASELINE: f64 = 26.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub trends: Vec<TrendPoint>,
    pub cohorts: Vec<Cohort>,
    pub control: Vec<ControlPoint>,
    pub insights: Vec<Insight>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub label: String,
    pub current: f64,
    pub previous: f64,
    pub previous_previous: f64,
    pub cooldown: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cohort {
    pub mix: &'static str,
    pub current: f64,
    pub previous: f64,
    pub baseline: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ControlPoint {
    pub batch: usize,
    pub xbar: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub title: &'static str,
    pub detail: String,
}

pub fn derive(records: &[RealtimeRecord]) -> Analytics {
    let recent = last(records, TREND_WINDOW);
    Analytics {
        trends: trends(recent),
        cohorts: cohorts(records),
        control: control(recent),
        insights: insights(recent),
    }
}

/// Maturity index per record: current ×20, previous record ×18, window
/// start ×16. Grouped into days of [`RECORDS_PER_DAY`].
pub fn trends(recent: &[RealtimeRecord]) -> Vec<TrendPoint> {
    let Some(first) = recent.first() else {
        return Vec::new();
    };
    recent
        .iter()
        .enumerate()
        .map(|(i, record)| TrendPoint {
            label: format!("Day {}", i / RECORDS_PER_DAY + 1),
            current: record.temperature * 20.0,
            previous: previous_or_self(recent, i).temperature * 18.0,
            previous_previous: first.temperature * 16.0,
            cooldown: cooldown_hours(record.temperature),
        })
        .collect()
}

/// `max(12, 25 - t/2)`. `NaN` in, `NaN` out.
fn cooldown_hours(temperature: f64) -> f64 {
    let hours = 25.0 - temperature / 2.0;
    if hours.is_nan() {
        hours
    } else {
        hours.max(12.0)
    }
}

/// Cohorts are paired positionally with the oldest records of the full
/// sequence: cohort `i` reads record `i` and record `i + 4`.
pub fn cohorts(records: &[RealtimeRecord]) -> Vec<Cohort> {
    let temperature_at = |i: usize, default: f64| records.get(i).map_or(default, |r| r.temperature);
    COHORTS
        .labels()
        .iter()
        .enumerate()
        .map(|(i, &mix)| Cohort {
            mix,
            current: temperature_at(i, COHORT_CURRENT_DEFAULT),
            previous: temperature_at(i + COHORTS.len(), COHORT_PREVIOUS_DEFAULT),
            baseline: COHORT_BASELINE + i as f64,
        })
        .collect()
}

/// X̄ is the batch temperature; R is half the distance to the record at the
/// same index from the start of the trend window, plus [`RANGE_OFFSET`].
pub fn control(recent: &[RealtimeRecord]) -> Vec<ControlPoint> {
    last(recent, CONTROL_WINDOW)
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let reference = recent.get(i).unwrap_or(record);
            ControlPoint {
                batch: i + 1,
                xbar: record.temperature,
                r: (record.temperature - reference.temperature).abs() / 2.0 + RANGE_OFFSET,
            }
        })
        .collect()
}

pub fn insights(recent: &[RealtimeRecord]) -> Vec<Insight> {
    let latest = recent.last();
    let temperature_from_end = |back: usize| {
        recent
            .len()
            .checked_sub(back)
            .map_or(0.0, |i| recent[i].temperature)
    };
    let deviation = temperature_from_end(1) - temperature_from_end(2);
    let sequence = latest.map_or("--", |r| r.sequence.as_str());

    vec![
        Insight {
            title: "Anomaly detected",
            detail: format!(
                "Seq {sequence} deviated {deviation:.2} °C compared to previous sample."
            ),
        },
        Insight {
            title: "Forecast strip ETA",
            detail: "Latest maturity slope indicates PT strip window 65 minutes earlier than baseline."
                .to_string(),
        },
        Insight {
            title: "Sensor drift",
            detail: "Automated drift compensation scheduled for devices exceeding ±0.8 °C bias."
                .to_string(),
        },
    ]
}
