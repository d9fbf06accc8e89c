//! Core types for cmm-core.
//!
//! This module defines the [`RealtimeRecord`] produced by the line parser and
//! consumed by every derivation function.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// One parsed sensor reading from the telemetry feed.
///
/// Records are immutable once built. Derivation functions only ever borrow
/// them and build new projection values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealtimeRecord {
    /// Device-assigned identifier. Opaque and not globally unique.
    pub sequence: String,
    /// Reading instant (UTC). `None` when the date or time token could not be
    /// turned into an instant; serialised as `null`.
    #[serde(serialize_with = "serialize_iso")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Degrees Celsius, read as-is. Non-numeric input becomes `NaN`.
    pub temperature: f64,
    /// Raw status token. `"0"` means no alert.
    pub status: String,
    /// The trimmed source line.
    pub raw: String,
}

impl RealtimeRecord {
    /// Status `"0"` is the device's "no alert" convention.
    pub fn is_clear(&self) -> bool {
        self.status == NO_ALERT_STATUS
    }

    /// Timestamp in the feed's wire form, e.g. `2025-03-05T14:30:00.000Z`.
    pub fn timestamp_iso(&self) -> Option<String> {
        self.timestamp.map(iso_millis)
    }
}

/// Status token meaning "no active alert".
pub const NO_ALERT_STATUS: &str = "0";

/// Format an instant as ISO-8601 with millisecond precision and a `Z` suffix.
pub fn iso_millis(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// serde helper shared by every projection carrying an optional instant.
pub fn serialize_iso<S>(ts: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match ts {
        Some(ts) => serializer.serialize_str(&iso_millis(*ts)),
        None => serializer.serialize_none(),
    }
}
