//! Time-compare scaler.
//!
//! A display-side multiplier selected by comparison window. It is applied by
//! whoever renders a projection, after derivation, to a chosen set of numeric
//! fields. Scaling always starts from the derived base value, so selecting the
//! same window twice yields the same number and switching windows never
//! changes the underlying projection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::derive::{admin::Admin, analytics::Analytics, pours::Pours, round_half_up};

/// Which comparison window the caller is looking at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TimeCompare {
    #[default]
    Current,
    Previous,
    PreviousPrevious,
}

impl TimeCompare {
    pub const ALL: [TimeCompare; 3] = [
        TimeCompare::Current,
        TimeCompare::Previous,
        TimeCompare::PreviousPrevious,
    ];

    pub const fn factor(self) -> f64 {
        match self {
            TimeCompare::Current => 1.0,
            TimeCompare::Previous => 0.94,
            TimeCompare::PreviousPrevious => 0.88,
        }
    }

    /// Scale a derived base value for display.
    pub fn apply(self, base: f64) -> f64 {
        base * self.factor()
    }

    /// Scale and round to the nearest integer, for count-like fields.
    pub fn apply_rounded(self, base: f64) -> f64 {
        round_half_up(self.apply(base))
    }

    pub const fn key(self) -> &'static str {
        match self {
            TimeCompare::Current => "current",
            TimeCompare::Previous => "previous",
            TimeCompare::PreviousPrevious => "previousPrevious",
        }
    }

    pub fn option(self) -> TimeCompareOption {
        let (label, subtitle, delta_label) = match self {
            TimeCompare::Current => ("Current", "Last 24 h", "+4.2% vs prev"),
            TimeCompare::Previous => ("Previous", "24–48 h ago", "-1.1% vs prev-prev"),
            TimeCompare::PreviousPrevious => ("Prev-Prev", "48–72 h ago", "+2.3% vs baseline"),
        };
        TimeCompareOption {
            key: self,
            label,
            subtitle,
            delta_label,
        }
    }
}

impl fmt::Display for TimeCompare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error for an unknown comparison key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown comparison window {0:?} (expected current, previous or previousPrevious)")]
pub struct UnknownCompare(pub String);

impl FromStr for TimeCompare {
    type Err = UnknownCompare;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeCompare::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownCompare(s.to_string()))
    }
}

/// A selectable comparison window as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeCompareOption {
    pub key: TimeCompare,
    pub label: &'static str,
    pub subtitle: &'static str,
    pub delta_label: &'static str,
}

/// The comparison bar: every option plus the factor table and current choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareBar {
    pub selected: TimeCompare,
    pub factor: f64,
    pub options: Vec<TimeCompareOption>,
    pub factors: Factors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Factors {
    pub current: f64,
    pub previous: f64,
    pub previous_previous: f64,
}

impl CompareBar {
    pub fn new(selected: TimeCompare) -> Self {
        Self {
            selected,
            factor: selected.factor(),
            options: TimeCompare::ALL.into_iter().map(TimeCompare::option).collect(),
            factors: Factors {
                current: TimeCompare::Current.factor(),
                previous: TimeCompare::Previous.factor(),
                previous_previous: TimeCompare::PreviousPrevious.factor(),
            },
        }
    }
}

/// A projection whose display fields follow the selected comparison window.
///
/// `scaled` reads the derived base and returns a new value, so the base is
/// never touched and repeated selections agree.
pub trait CompareScaled {
    fn scaled(&self, compare: TimeCompare) -> Self;
}

/// Cohort `current` and control `xbar`.
impl CompareScaled for Analytics {
    fn scaled(&self, compare: TimeCompare) -> Self {
        let mut out = self.clone();
        for cohort in &mut out.cohorts {
            cohort.current = compare.apply(cohort.current);
        }
        for point in &mut out.control {
            point.xbar = compare.apply(point.xbar);
        }
        out
    }
}

/// Pour `progress`, rounded.
impl CompareScaled for Pours {
    fn scaled(&self, compare: TimeCompare) -> Self {
        let mut out = self.clone();
        for pour in &mut out.pours {
            pour.progress = compare.apply_rounded(pour.progress);
        }
        out
    }
}

/// Licence seats in use, rounded.
impl CompareScaled for Admin {
    fn scaled(&self, compare: TimeCompare) -> Self {
        let mut out = self.clone();
        out.license.in_use = compare.apply_rounded(self.license.in_use as f64) as usize;
        out
    }
}
