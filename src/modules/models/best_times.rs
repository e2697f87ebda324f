use std::collections::HashMap;
use std::hash::Hash;

use crate::modules::models::lap::Lap;

/// # the best times of a snapshot
/// global and per driver minimums of every sector and of the lap time,
/// all keyed by track. built in one pass with `BestTimeIndex::build`.
///
/// sector bests take every lap with sector data into account, lap time
/// bests only the valid laps.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BestTimeIndex {
    global_sector: HashMap<(String, usize), u64>,
    driver_sector: HashMap<(String, String, usize), u64>,
    global_lap: HashMap<String, u64>,
    driver_lap: HashMap<(String, String), u64>,
}

fn update_min<K: Hash + Eq>(map: &mut HashMap<K, u64>, key: K, value: u64) {
    map.entry(key)
        .and_modify(|min| {
            if value < *min {
                *min = value;
            }
        })
        .or_insert(value);
}

impl BestTimeIndex {
    /// # build the index
    /// laps without any sector data are left out completely
    ///
    /// ## Arguments
    /// * `laps` - all normalized laps of the snapshot
    ///
    /// ## Returns
    /// * `BestTimeIndex` - the best times
    pub fn build(laps: &[Lap]) -> BestTimeIndex {
        let mut index = BestTimeIndex::default();

        for lap in laps.iter().filter(|lap| !lap.sectors.is_empty()) {
            for (sector, value) in lap.sectors.iter().enumerate() {
                let Some(ms) = *value else { continue };

                update_min(&mut index.global_sector, (lap.track_id.clone(), sector), ms);
                update_min(
                    &mut index.driver_sector,
                    (lap.track_id.clone(), lap.driver.clone(), sector),
                    ms,
                );
            }

            if !lap.counts_for_lap_bests() {
                continue;
            }
            if let Some(ms) = lap.lap_time_ms {
                update_min(&mut index.global_lap, lap.track_id.clone(), ms);
                update_min(&mut index.driver_lap, (lap.track_id.clone(), lap.driver.clone()), ms);
            }
        }

        index
    }

    pub fn global_sector(&self, track: &str, sector: usize) -> Option<u64> {
        self.global_sector.get(&(track.to_string(), sector)).copied()
    }

    pub fn driver_sector(&self, track: &str, driver: &str, sector: usize) -> Option<u64> {
        self.driver_sector
            .get(&(track.to_string(), driver.to_string(), sector))
            .copied()
    }

    pub fn global_lap(&self, track: &str) -> Option<u64> {
        self.global_lap.get(track).copied()
    }

    pub fn driver_lap(&self, track: &str, driver: &str) -> Option<u64> {
        self.driver_lap.get(&(track.to_string(), driver.to_string())).copied()
    }
}
