//! Line parser — turns raw feed lines into [`RealtimeRecord`] values.
//!
//! A feed line is `sequence date time temperature status`, separated by runs
//! of whitespace. Extra trailing tokens are ignored. A line with fewer than
//! five tokens is rejected; everything else produces a record, even when the
//! values inside it are unusable:
//!
//! - a non-numeric temperature becomes `NaN`
//! - a date or time token that is not `DD-MM-YY[YY]` / `HH:MM:SS` leaves
//!   the timestamp empty
//! - out-of-range components roll over the way a calendar addition would
//!   (`31-04-25` is the 1st of May)

use std::sync::LazyLock;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use regex::Regex;
use thiserror::Error;

use crate::store::RecordStore;
use crate::types::RealtimeRecord;

/// Minimum number of whitespace-separated tokens in a usable line.
pub const MIN_FIELDS: usize = 5;

static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2})-([0-9]{1,2})-([0-9]{4}|[0-9]{2})$").expect("date regex is valid")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,2}):([0-9]{1,2}):([0-9]{1,2})$").expect("time regex is valid")
});

/// Why a line produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineRejection {
    #[error("line is empty")]
    Empty,
    #[error("expected at least {MIN_FIELDS} fields, found {found}")]
    TooFewFields { found: usize },
}

/// Parse a single feed line.
///
/// The returned record's `raw` is the trimmed input.
pub fn parse_line(line: &str) -> Result<RealtimeRecord, LineRejection> {
    let raw = line.trim();
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    match tokens.len() {
        0 => return Err(LineRejection::Empty),
        found if found < MIN_FIELDS => return Err(LineRejection::TooFewFields { found }),
        _ => {}
    }

    let [sequence, date, time, temperature, status] = [
        tokens[0], tokens[1], tokens[2], tokens[3], tokens[4],
    ];

    Ok(RealtimeRecord {
        sequence: sequence.to_string(),
        timestamp: parse_timestamp(date, time),
        temperature: parse_temperature(temperature),
        status: status.to_string(),
        raw: raw.to_string(),
    })
}

/// Split a feed body into lines and parse each one, dropping rejected lines.
///
/// Accepts `\n` and `\r\n` line endings. Order is preserved; nothing is
/// sorted or deduplicated.
pub fn parse_feed(body: &str) -> RecordStore {
    let mut dropped = 0usize;
    let records: RecordStore = body
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| match parse_line(line) {
            Ok(record) => Some(record),
            Err(reason) => {
                dropped += 1;
                tracing::trace!(%reason, line, "dropping feed line");
                None
            }
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(dropped, kept = records.len(), "feed contained malformed lines");
    }
    records
}

/// Numeric coercion that never rejects: anything unparseable is `NaN`.
///
/// Decimal and exponent forms parse as usual. `Infinity` (optionally signed,
/// exact case) is the only spelling of an infinite value; `inf`, `nan` and
/// friends are `NaN`. Unsigned `0x`, `0o` and `0b` integers are read in
/// their radix.
pub fn parse_temperature(token: &str) -> f64 {
    match token {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    if let Some(value) = parse_radix_integer(token) {
        return value;
    }
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        // digits that overflow are infinite; spelled-out inf/nan are not numbers
        Ok(value) if token.bytes().any(|b| b.is_ascii_digit()) => value,
        _ => f64::NAN,
    }
}

/// `0x1A`, `0o17`, `0b101`. `Some(NaN)` for a prefix without valid digits.
fn parse_radix_integer(token: &str) -> Option<f64> {
    let bytes = token.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &token[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

/// Build a UTC instant from `DD-MM-YY[YY]` and `HH:MM:SS` tokens.
///
/// Two-digit years are `20YY`.
pub fn parse_timestamp(date: &str, time: &str) -> Option<DateTime<Utc>> {
    let d = DATE_RE.captures(date)?;
    let t = TIME_RE.captures(time)?;

    let num = |s: &str| s.parse::<i64>().ok();
    let day = num(&d[1])?;
    let month = num(&d[2])?;
    let year_token = &d[3];
    let year = num(year_token)? + if year_token.len() == 2 { 2000 } else { 0 };

    utc_from_components(year, month, day, num(&t[1])?, num(&t[2])?, num(&t[3])?)
}

/// Calendar addition from the first of the (normalised) month, so that
/// overflowing components carry into the next unit instead of failing.
fn utc_from_components(
    year: i64,
    month: i64,
    day: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
) -> Option<DateTime<Utc>> {
    let month0 = month - 1;
    let first = NaiveDate::from_ymd_opt(
        i32::try_from(year + month0.div_euclid(12)).ok()?,
        u32::try_from(month0.rem_euclid(12) + 1).ok()?,
        1,
    )?
    .and_hms_opt(0, 0, 0)?;

    let offset = Duration::try_days(day - 1)?
        .checked_add(&Duration::try_hours(hours)?)?
        .checked_add(&Duration::try_minutes(minutes)?)?
        .checked_add(&Duration::try_seconds(seconds)?)?;

    first.checked_add_signed(offset).map(|dt| dt.and_utc())
}
