//! Sensor inventory rows.

use serde::Serialize;

use super::round_to;
use crate::labels::{letter, prefix, LabelTable};
use crate::types::RealtimeRecord;
use crate::window::last;

pub const WINDOW: usize = 18;

pub const SENSOR_TYPES: LabelTable<3> = LabelTable::new(["Temperature", "Humidity", "Strain"]);

/// Every third sensor is reported offline; the rest follow the record status.
pub const OFFLINE_SLOT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorStatus {
    Online,
    Maintenance,
    Offline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensors {
    pub sensors: Vec<Sensor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: String,
    pub device: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub location: String,
    pub status: SensorStatus,
    pub drift: f64,
}

pub fn derive(records: &[RealtimeRecord]) -> Sensors {
    let sensors = last(records, WINDOW)
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let device = format!("D-{}", prefix(&record.sequence, 3));
            Sensor {
                id: format!("{device}-{i:02}"),
                device,
                kind: SENSOR_TYPES.for_index(i),
                location: format!("Area {} - Block {}", letter(i % 5), i % 7),
                status: status_for(i, record),
                drift: round_to((i as f64).sin() * 0.5 + 0.3, 2),
            }
        })
        .collect();
    Sensors { sensors }
}

fn status_for(index: usize, record: &RealtimeRecord) -> SensorStatus {
    if index % SENSOR_TYPES.len() == OFFLINE_SLOT {
        SensorStatus::Offline
    } else if record.is_clear() {
        SensorStatus::Online
    } else {
        SensorStatus::Maintenance
    }
}
