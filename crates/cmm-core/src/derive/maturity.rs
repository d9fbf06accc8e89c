//! Concrete maturity from the temperature history.
//!
//! Two standard maturity functions are computed over every record that has a
//! timestamp, in time order:
//!
//! - Nurse-Saul temperature-time factor, `Σ (T - T0) · Δt` in °C·h
//! - Arrhenius equivalent age, `Σ exp(-Ea/R · (1/T - 1/Tr)) · Δt` in hours
//!
//! Each interval uses the temperature at its start. Intervals of zero or
//! negative length are skipped. Fewer than two samples gives zero.
//!
//! An optional strength curve turns either maturity into a predicted
//! compressive strength with a 95% band.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MaturityConfig;
use crate::types::RealtimeRecord;

/// Gas constant, J/(mol·K).
pub const GAS_CONSTANT: f64 = 8.314;
const KELVIN_OFFSET: f64 = 273.15;
const SECONDS_PER_HOUR: f64 = 3600.0;
/// Two-sided 95% z-score.
const Z_95: f64 = 1.96;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maturity {
    /// Nurse-Saul maturity, °C·h.
    pub ttf_c_h: f64,
    /// Equivalent age at the reference temperature, hours.
    pub eq_age_h: f64,
    /// Samples that contributed (records with a timestamp).
    pub samples: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_ttf: Option<StrengthEstimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_eq: Option<StrengthEstimate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthEstimate {
    pub mean: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lower: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    pub units: &'static str,
}

/// Strength-maturity relationship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrengthCurve {
    /// `a · ln(max(m, min_maturity)) + b`
    Log { a: f64, b: f64, min_maturity: f64 },
    /// `f_u · (1 - exp(-k · m))`
    Asymptotic { f_u: f64, k: f64 },
}

/// A strength curve plus its optional standard error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrengthModel {
    pub curve: StrengthCurve,
    pub sigma: Option<f64>,
}

/// Query-string spelling: `log` or `asymptotic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveType {
    Log,
    Asymptotic,
}

/// Loose curve parameters as they arrive from a caller.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CurveParams {
    pub a: Option<f64>,
    pub b: Option<f64>,
    pub f_u: Option<f64>,
    pub k: Option<f64>,
    pub sigma: Option<f64>,
    pub min_maturity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurveError {
    #[error("log model requires 'a' and 'b' parameters")]
    MissingLogParams,
    #[error("asymptotic model requires 'f_u' and 'k' parameters")]
    MissingAsymptoticParams,
}

impl CurveParams {
    pub fn model(&self, curve_type: CurveType) -> Result<StrengthModel, CurveError> {
        let curve = match curve_type {
            CurveType::Log => StrengthCurve::Log {
                a: self.a.ok_or(CurveError::MissingLogParams)?,
                b: self.b.ok_or(CurveError::MissingLogParams)?,
                min_maturity: self.min_maturity.unwrap_or(1.0),
            },
            CurveType::Asymptotic => StrengthCurve::Asymptotic {
                f_u: self.f_u.ok_or(CurveError::MissingAsymptoticParams)?,
                k: self.k.ok_or(CurveError::MissingAsymptoticParams)?,
            },
        };
        Ok(StrengthModel {
            curve,
            sigma: self.sigma,
        })
    }
}

impl StrengthModel {
    pub fn predict(&self, maturity: f64) -> StrengthEstimate {
        let mean = match self.curve {
            StrengthCurve::Log { a, b, min_maturity } => {
                let floored = if maturity.is_nan() {
                    maturity
                } else {
                    maturity.max(min_maturity.max(1e-9))
                };
                a * floored.ln() + b
            }
            StrengthCurve::Asymptotic { f_u, k } => f_u * (1.0 - (-k * maturity).exp()),
        };
        let band = self.sigma.map(|sigma| Z_95 * sigma);
        StrengthEstimate {
            mean,
            lower: band.map(|d| mean - d),
            upper: band.map(|d| mean + d),
            units: "MPa",
        }
    }
}

pub fn derive(
    records: &[RealtimeRecord],
    params: &MaturityConfig,
    model: Option<&StrengthModel>,
) -> Maturity {
    let samples = ordered_samples(records);
    let ttf_c_h = ttf_maturity(&samples, params.datum_c);
    let eq_age_h = equivalent_age(&samples, params.activation_energy, params.reference_c);

    Maturity {
        ttf_c_h,
        eq_age_h,
        samples: samples.len(),
        strength_ttf: model.map(|m| m.predict(ttf_c_h)),
        strength_eq: model.map(|m| m.predict(eq_age_h)),
    }
}

/// `(instant, °C)` pairs for records with a timestamp, sorted by instant.
/// The sort is stable, so equal instants keep feed order.
pub fn ordered_samples(records: &[RealtimeRecord]) -> Vec<(DateTime<Utc>, f64)> {
    let mut samples: Vec<_> = records
        .iter()
        .filter_map(|r| r.timestamp.map(|ts| (ts, r.temperature)))
        .collect();
    samples.sort_by_key(|(ts, _)| *ts);
    samples
}

fn intervals(samples: &[(DateTime<Utc>, f64)]) -> impl Iterator<Item = (f64, f64)> + '_ {
    samples.windows(2).filter_map(|pair| {
        let hours = (pair[1].0 - pair[0].0).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_HOUR;
        (hours > 0.0).then_some((pair[0].1, hours))
    })
}

/// Nurse-Saul maturity in °C·h with datum temperature `datum_c`.
pub fn ttf_maturity(samples: &[(DateTime<Utc>, f64)], datum_c: f64) -> f64 {
    intervals(samples)
        .map(|(temp_c, hours)| (temp_c - datum_c) * hours)
        .sum()
}

/// Arrhenius equivalent age in hours at `reference_c`.
pub fn equivalent_age(
    samples: &[(DateTime<Utc>, f64)],
    activation_energy: f64,
    reference_c: f64,
) -> f64 {
    let reference_k = reference_c + KELVIN_OFFSET;
    intervals(samples)
        .map(|(temp_c, hours)| {
            let temp_k = temp_c + KELVIN_OFFSET;
            let exponent = -activation_energy / GAS_CONSTANT * (1.0 / temp_k - 1.0 / reference_k);
            hours * exponent.exp()
        })
        .sum()
}
