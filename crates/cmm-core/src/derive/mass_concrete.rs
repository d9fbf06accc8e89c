//! Mass-concrete thermal profile: core versus modelled surface temperature.

use serde::Serialize;

use super::round_half_up;
use crate::types::RealtimeRecord;
use crate::window::last;

pub const WINDOW: usize = 40;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MassConcrete {
    pub profile: Vec<ProfilePoint>,
    pub gradients: Vec<GradientPoint>,
    pub overview: Overview,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePoint {
    pub hour: usize,
    pub core: f64,
    pub surface: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientPoint {
    pub hour: usize,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub peak: f64,
    pub gradient: f64,
    pub cooldown: f64,
}

/// Surface lags the core by 2 °C plus a slow sinusoidal swing.
pub fn surface_temperature(core: f64, hour: usize) -> f64 {
    core - 2.0 - (hour as f64 / 5.0).sin() * 1.5
}

pub fn derive(records: &[RealtimeRecord]) -> MassConcrete {
    let profile: Vec<ProfilePoint> = last(records, WINDOW)
        .iter()
        .enumerate()
        .map(|(hour, record)| ProfilePoint {
            hour,
            core: record.temperature,
            surface: surface_temperature(record.temperature, hour),
        })
        .collect();

    let gradients: Vec<GradientPoint> = profile
        .iter()
        .map(|p| GradientPoint {
            hour: p.hour,
            delta: p.core - p.surface,
        })
        .collect();

    let peak = max_or_zero(profile.iter().map(|p| p.core));
    let gradient = max_or_zero(gradients.iter().map(|g| g.delta));

    MassConcrete {
        profile,
        gradients,
        overview: Overview {
            peak,
            gradient,
            cooldown: round_half_up(peak / 3.0 + 10.0),
        },
    }
}

/// Maximum of the values; zero when there are none. Any `NaN` makes the
/// result `NaN`.
fn max_or_zero(values: impl Iterator<Item = f64>) -> f64 {
    values
        .reduce(|acc, v| if acc.is_nan() || v.is_nan() { f64::NAN } else { acc.max(v) })
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;

    fn series(temps: &[f64]) -> Vec<RealtimeRecord> {
        temps
            .iter()
            .map(|t| parse_line(&format!("M1 05-03-25 10:00:00 {t} 0")).unwrap())
            .collect()
    }

    #[test]
    fn first_hour_gradient_is_two() {
        let mc = derive(&series(&[30.0]));
        assert_eq!(mc.profile[0].surface, 28.0);
        assert_eq!(mc.gradients[0].delta, 2.0);
        assert_eq!(mc.overview.peak, 30.0);
        assert_eq!(mc.overview.gradient, 2.0);
        assert_eq!(mc.overview.cooldown, 20.0);
    }

    #[test]
    fn window_is_last_40() {
        let temps: Vec<f64> = (0..50).map(f64::from).collect();
        let mc = derive(&series(&temps));
        assert_eq!(mc.profile.len(), WINDOW);
        assert_eq!(mc.profile[0].core, 10.0);
        assert_eq!(mc.profile[39].hour, 39);
        assert_eq!(mc.overview.peak, 49.0);
        let expected_gradient = (0..WINDOW)
            .map(|h| 2.0 + (h as f64 / 5.0).sin() * 1.5)
            .fold(f64::MIN, f64::max);
        assert!((mc.overview.gradient - expected_gradient).abs() < 1e-9);
    }

    #[test]
    fn empty_overview_is_zeroed() {
        let mc = derive(&[]);
        assert!(mc.profile.is_empty());
        assert_eq!(mc.overview.peak, 0.0);
        assert_eq!(mc.overview.gradient, 0.0);
        assert_eq!(mc.overview.cooldown, 10.0);
    }

    #[test]
    fn nan_peak_propagates() {
        let mut records = series(&[20.0, 25.0]);
        records[0].temperature = f64::NAN;
        assert!(derive(&records).overview.peak.is_nan());
    }
}
