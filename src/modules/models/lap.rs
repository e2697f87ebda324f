use serde::{Deserialize, Serialize};

use crate::modules::helpers::lookup::{car_name, track_name};
use crate::modules::helpers::sectors::extract_sectors;
use crate::modules::laptimes_api::LapRecord;

/// how a time compares to the best times on its track
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// fastest of all drivers
    Record,
    /// fastest of this driver
    PersonalBest,
    None,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Lap {
    pub driver: String,
    pub track_id: String,
    pub track_name: String,
    pub car_id: String,
    pub car_name: String,
    pub lap_time_ms: Option<u64>,
    pub valid: bool,
    pub cuts: u32,
    pub lap_count: Option<u32>,
    pub date: String,
    pub sectors: Vec<Option<u64>>,
    pub sector_status: Vec<Status>,
    pub lap_status: Status,
}

impl Lap {
    /// # normalize a lap record
    /// resolves the track and car names and extracts the sectors.
    /// all statuses start out as `Status::None` until the lap is classified
    ///
    /// ## Arguments
    /// * `record` - the validated record
    ///
    /// ## Returns
    /// * `Lap` - the normalized lap
    pub fn from_record(record: LapRecord) -> Lap {
        let sectors = extract_sectors(&record.sector_fields);

        Lap {
            track_name: track_name(&record.track_id),
            car_name: car_name(&record.car_id),
            driver: record.driver,
            track_id: record.track_id,
            car_id: record.car_id,
            lap_time_ms: record.lap_time_ms,
            valid: record.valid,
            cuts: record.cuts,
            lap_count: record.lap_count,
            date: record.date,
            sector_status: vec![Status::None; sectors.len()],
            sectors,
            lap_status: Status::None,
        }
    }

    /// # does the lap take part in the lap time bests
    /// only valid laps with a time do
    pub fn counts_for_lap_bests(&self) -> bool {
        self.valid && self.lap_time_ms.is_some()
    }
}
