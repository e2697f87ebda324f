use crate::modules::models::best_times::BestTimeIndex;
use crate::modules::models::lap::{Lap, Status};

fn status_of(value: u64, global: Option<u64>, personal: Option<u64>) -> Status {
    if global == Some(value) {
        Status::Record
    } else if personal == Some(value) {
        Status::PersonalBest
    } else {
        Status::None
    }
}

pub fn classify_sector(index: &BestTimeIndex, lap: &Lap, sector: usize) -> Status {
    match lap.sectors.get(sector).copied().flatten() {
        Some(ms) => status_of(
            ms,
            index.global_sector(&lap.track_id, sector),
            index.driver_sector(&lap.track_id, &lap.driver, sector),
        ),
        None => Status::None,
    }
}

pub fn classify_lap_time(index: &BestTimeIndex, lap: &Lap) -> Status {
    if !lap.counts_for_lap_bests() {
        return Status::None;
    }
    match lap.lap_time_ms {
        Some(ms) => status_of(
            ms,
            index.global_lap(&lap.track_id),
            index.driver_lap(&lap.track_id, &lap.driver),
        ),
        None => Status::None,
    }
}

/// # classify a lap
/// tags every sector and the lap time as record, personal best or none.
/// a time that is both the record and the personal best is a record.
///
/// ## Arguments
/// * `lap` - the normalized lap
/// * `index` - the best times of the snapshot the lap belongs to
///
/// ## Returns
/// * `Lap` - the lap with its statuses filled in
pub fn classify(lap: Lap, index: &BestTimeIndex) -> Lap {
    let sector_status = (0..lap.sectors.len())
        .map(|sector| classify_sector(index, &lap, sector))
        .collect();
    let lap_status = classify_lap_time(index, &lap);

    Lap {
        sector_status,
        lap_status,
        ..lap
    }
}
