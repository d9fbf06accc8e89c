//! Pour schedule rows.

use serde::Serialize;

use super::round_half_up;
use crate::labels::{letter, suffix, LabelTable};
use crate::types::RealtimeRecord;
use crate::window::last;

pub const WINDOW: usize = 15;

pub const STAGES: LabelTable<3> = LabelTable::new(["planning", "inProgress", "curing"]);
pub const MIXES: LabelTable<3> = LabelTable::new(["PT-65", "Mass-46", "Core-52"]);

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pours {
    pub pours: Vec<Pour>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pour {
    pub id: String,
    pub location: String,
    pub mix: &'static str,
    pub progress: f64,
    pub eta: String,
    pub status: &'static str,
}

/// Pour id shared with the reports projection.
pub fn pour_id(sequence: &str) -> String {
    format!("CMM-{}", suffix(sequence, 3))
}

/// `min(100, |3t|)`. `NaN` in, `NaN` out.
fn progress(temperature: f64) -> f64 {
    let progress = (temperature * 3.0).abs();
    if progress.is_nan() {
        progress
    } else {
        progress.min(100.0)
    }
}

pub fn derive(records: &[RealtimeRecord]) -> Pours {
    let pours = last(records, WINDOW)
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let t = record.temperature;
            Pour {
                id: pour_id(&record.sequence),
                location: format!("Zone {} - Level {}", letter(i % 5), 10 + i % 4),
                mix: MIXES.for_index(i),
                progress: progress(t),
                eta: format!("{}h", round_half_up(12.0 - t / 3.0).max(2.0)),
                status: STAGES.for_index(i),
            }
        })
        .collect();
    Pours { pours }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_line;
    use pretty_assertions::assert_eq;

    fn record(seq: &str, temp: f64) -> RealtimeRecord {
        parse_line(&format!("{seq} 05-03-25 10:00:00 {temp} 0")).unwrap()
    }

    #[test]
    fn row_shape() {
        let pours = derive(&[record("3C8A1F", 21.0), record("3C8A20", 40.0)]).pours;
        assert_eq!(pours[0].id, "CMM-A1F");
        assert_eq!(pours[0].location, "Zone A - Level 10");
        assert_eq!(pours[0].mix, "PT-65");
        assert_eq!(pours[0].progress, 63.0);
        assert_eq!(pours[0].eta, "5h");
        assert_eq!(pours[0].status, "planning");
        assert_eq!(pours[1].location, "Zone B - Level 11");
        assert_eq!(pours[1].progress, 100.0);
        assert_eq!(pours[1].eta, "2h");
        assert_eq!(pours[1].status, "inProgress");
    }

    #[test]
    fn nan_reading_leaves_progress_unusable() {
        let mut records = vec![record("3C8A1F", 21.0)];
        records[0].temperature = f64::NAN;
        let pours = derive(&records).pours;
        assert!(pours[0].progress.is_nan());
        assert_eq!(pours[0].eta, "2h");
    }

    #[test]
    fn window_and_rotation() {
        let records: Vec<_> = (0..20).map(|i| record(&format!("S{i:02}"), 10.0)).collect();
        let pours = derive(&records).pours;
        assert_eq!(pours.len(), WINDOW);
        assert_eq!(pours[0].id, "CMM-S05");
        assert_eq!(pours[5].location, "Zone A - Level 11");
        assert_eq!(pours[5].mix, "Core-52");
    }
}
