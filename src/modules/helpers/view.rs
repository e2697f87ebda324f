use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::errors::Error;
use crate::modules::helpers::format::format_ms;
use crate::modules::models::lap::{Lap, Status};

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SectorCell {
    pub time: String,
    pub ms: Option<u64>,
    pub status: Status,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LapRow {
    pub driver: String,
    pub car: String,
    pub track: String,
    pub lap_time: String,
    pub lap_time_ms: Option<u64>,
    pub lap_status: Status,
    pub lap_count: Option<u32>,
    pub cuts: u32,
    pub valid: bool,
    pub date: String,
    pub sectors: Vec<SectorCell>,
    /// `valid` or `invalid`
    pub row_class: &'static str,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FastestLapRow {
    pub driver: String,
    pub track: String,
    pub car: String,
    pub lap_time: String,
    pub lap_time_ms: u64,
    pub date: String,
}

/// what the fastest lap table has one row for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FastestLapGrouping {
    #[default]
    Driver,
    DriverTrack,
}

impl FromStr for FastestLapGrouping {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "driver" => Ok(FastestLapGrouping::Driver),
            "driver-track" => Ok(FastestLapGrouping::DriverTrack),
            _ => Err(Error::InvalidSelectorError { selector: "grouping", value: value.to_string() }),
        }
    }
}

impl fmt::Display for FastestLapGrouping {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FastestLapGrouping::Driver => write!(f, "driver"),
            FastestLapGrouping::DriverTrack => write!(f, "driver-track"),
        }
    }
}

pub fn lap_row(lap: &Lap) -> LapRow {
    let sectors = lap
        .sectors
        .iter()
        .zip(&lap.sector_status)
        .map(|(ms, status)| SectorCell {
            time: format_ms(*ms),
            ms: *ms,
            status: *status,
        })
        .collect();

    LapRow {
        driver: lap.driver.clone(),
        car: lap.car_name.clone(),
        track: lap.track_name.clone(),
        lap_time: format_ms(lap.lap_time_ms),
        lap_time_ms: lap.lap_time_ms,
        lap_status: lap.lap_status,
        lap_count: lap.lap_count,
        cuts: lap.cuts,
        valid: lap.valid,
        date: lap.date.clone(),
        sectors,
        row_class: if lap.valid { "valid" } else { "invalid" },
    }
}

/// # project laps into table rows
/// the rows keep the order of the laps
pub fn lap_rows(laps: &[&Lap]) -> Vec<LapRow> {
    laps.iter().map(|lap| lap_row(lap)).collect()
}

/// # get the fastest valid lap of every group
/// laps without a time or that are invalid are skipped. on equal times the
/// first lap wins. the result is ordered by lap time, then driver, then track.
///
/// ## Arguments
/// * `laps` - the laps to search
/// * `grouping` - one row per driver or per driver and track
///
/// ## Returns
/// * `Vec<&Lap>` - the fastest lap of each group
pub fn fastest_laps(laps: &[Lap], grouping: FastestLapGrouping) -> Vec<&Lap> {
    let mut fastest: HashMap<(&str, Option<&str>), &Lap> = HashMap::new();

    for lap in laps.iter().filter(|lap| lap.counts_for_lap_bests()) {
        let key = match grouping {
            FastestLapGrouping::Driver => (lap.driver.as_str(), None),
            FastestLapGrouping::DriverTrack => (lap.driver.as_str(), Some(lap.track_id.as_str())),
        };

        fastest
            .entry(key)
            .and_modify(|best| {
                if lap.lap_time_ms < best.lap_time_ms {
                    *best = lap;
                }
            })
            .or_insert(lap);
    }

    let mut fastest: Vec<&Lap> = fastest.into_values().collect();
    fastest.sort_by(|a, b| {
        a.lap_time_ms
            .cmp(&b.lap_time_ms)
            .then_with(|| a.driver.cmp(&b.driver))
            .then_with(|| a.track_id.cmp(&b.track_id))
    });
    fastest
}

pub fn fastest_lap_rows(laps: &[Lap], grouping: FastestLapGrouping) -> Vec<FastestLapRow> {
    fastest_laps(laps, grouping)
        .into_iter()
        .filter_map(|lap| {
            lap.lap_time_ms.map(|lap_time_ms| FastestLapRow {
                driver: lap.driver.clone(),
                track: lap.track_name.clone(),
                car: lap.car_name.clone(),
                lap_time: format_ms(Some(lap_time_ms)),
                lap_time_ms,
                date: lap.date.clone(),
            })
        })
        .collect()
}
