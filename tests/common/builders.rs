//! Test builders — ergonomic constructors for feed lines and records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use chrono::{DateTime, Duration, TimeZone, Utc};
use cmm_core::{parse_feed, parse_line, RealtimeRecord, RecordStore};

// ---------------------------------------------------------------------------
// FeedLineBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for one whitespace-separated feed line.
///
/// # Example
///
/// ```rust
/// let line = FeedLineBuilder::new("3C8A01")
///     .at(ts(2025, 3, 5, 14, 30, 0))
///     .temperature("28.4")
///     .status("1")
///     .extra("battery=3.6")
///     .build();
/// ```
pub struct FeedLineBuilder {
    sequence: String,
    date: String,
    time: String,
    temperature: String,
    status: String,
    extra: Vec<String>,
}

impl FeedLineBuilder {
    pub fn new(sequence: impl Into<String>) -> Self {
        Self {
            sequence: sequence.into(),
            date: "05-03-25".to_string(),
            time: "14:30:00".to_string(),
            temperature: "25.0".to_string(),
            status: "0".to_string(),
            extra: Vec::new(),
        }
    }

    /// Set the date and time tokens from an instant (`DD-MM-YY HH:MM:SS`).
    pub fn at(mut self, instant: DateTime<Utc>) -> Self {
        self.date = instant.format("%d-%m-%y").to_string();
        self.time = instant.format("%H:%M:%S").to_string();
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = time.into();
        self
    }

    pub fn temperature(mut self, token: impl ToString) -> Self {
        self.temperature = token.to_string();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn extra(mut self, token: impl Into<String>) -> Self {
        self.extra.push(token.into());
        self
    }

    pub fn build(self) -> String {
        let mut tokens = vec![
            self.sequence,
            self.date,
            self.time,
            self.temperature,
            self.status,
        ];
        tokens.extend(self.extra);
        tokens.join(" ")
    }

    /// Build and parse; panics if the line is rejected.
    pub fn record(self) -> RealtimeRecord {
        let line = self.build();
        parse_line(&line).unwrap_or_else(|e| panic!("builder produced a rejected line {line:?}: {e}"))
    }
}

// ---------------------------------------------------------------------------
// Series helpers
// ---------------------------------------------------------------------------

/// Build a UTC instant, panicking on invalid components.
pub fn ts(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
        .single()
        .expect("valid test timestamp")
}

/// Start of the default series, 2025-03-05 08:00:00 UTC.
pub fn series_start() -> DateTime<Utc> {
    ts(2025, 3, 5, 8, 0, 0)
}

/// Feed text with one line per temperature, ten minutes apart. Sequences are
/// `S000`, `S001`, …; every fifth reading carries status `1`.
pub fn feed_text(temperatures: &[f64]) -> String {
    temperatures
        .iter()
        .enumerate()
        .map(|(i, &t)| {
            FeedLineBuilder::new(format!("S{i:03}"))
                .at(series_start() + Duration::minutes(10 * i as i64))
                .temperature(t)
                .status(if i % 5 == 4 { "1" } else { "0" })
                .build()
                + "\n"
        })
        .collect()
}

/// Parsed form of [`feed_text`].
pub fn store_of(temperatures: &[f64]) -> RecordStore {
    parse_feed(&feed_text(temperatures))
}

/// `n` temperatures following a warm-up, plateau and cool-down curve.
pub fn curing_curve(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64 / n.max(1) as f64;
            let warm = 18.0 + 22.0 * (x * std::f64::consts::PI).sin();
            (warm * 10.0).round() / 10.0
        })
        .collect()
}
