use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use serde::Serialize;
use tokio::sync::RwLock;

use crate::errors::CustomResult;
use crate::modules::helpers::classifier::classify;
use crate::modules::helpers::filter::{apply_filters, FilterSelection};
use crate::modules::helpers::sort::{sort_laps, SortState};
use crate::modules::helpers::view::{lap_rows, LapRow};
use crate::modules::laptimes_api::{LapRecord, LapSource};
use crate::modules::models::best_times::BestTimeIndex;
use crate::modules::models::lap::Lap;

/// # one refresh worth of laps
/// built in full from the records of a single fetch, never updated afterwards
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub laps: Vec<Lap>,
    pub index: BestTimeIndex,
    pub fetched_at: Option<DateTime<Utc>>,
}

/// the lap table for one filter and sort selection
#[derive(Debug, Clone, PartialEq)]
pub struct LapTable {
    pub rows: Vec<LapRow>,
    pub driver_options: Vec<String>,
    pub selection: FilterSelection,
    pub sort: SortState,
}

impl Snapshot {
    /// # build a snapshot
    /// normalizes the records, builds the best times and classifies every lap
    ///
    /// ## Arguments
    /// * `records` - the validated records of one fetch
    /// * `fetched_at` - when the records were fetched
    pub fn build(records: Vec<LapRecord>, fetched_at: DateTime<Utc>) -> Snapshot {
        let laps: Vec<Lap> = records.into_iter().map(Lap::from_record).collect();
        let index = BestTimeIndex::build(&laps);
        let laps = laps.into_iter().map(|lap| classify(lap, &index)).collect();

        Snapshot {
            laps,
            index,
            fetched_at: Some(fetched_at),
        }
    }

    /// # get the lap table
    /// filters, sorts and projects the laps. only fails when sorting on a
    /// date that can not be parsed.
    pub fn table(&self, selection: &FilterSelection, sort: &SortState) -> CustomResult<LapTable> {
        let outcome = apply_filters(&self.laps, selection);
        let laps = sort_laps(outcome.laps, sort)?;

        Ok(LapTable {
            rows: lap_rows(&laps),
            driver_options: outcome.driver_options,
            selection: outcome.selection,
            sort: *sort,
        })
    }
}

/// how the last refreshes went
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct Health {
    /// the last refresh failed and the laps shown are older
    pub stale: bool,
    pub last_success: Option<DateTime<Utc>>,
    pub last_attempt: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Updated { laps: usize },
    /// another refresh was still running
    Skipped,
}

#[derive(Debug, Default)]
struct BoardState {
    snapshot: Arc<Snapshot>,
    health: Health,
}

/// # the current laps and how fresh they are
/// a successful refresh replaces the snapshot as a whole. a failed one only
/// marks the board stale. only one refresh runs at a time, triggers that
/// come in while one runs are dropped.
#[derive(Debug, Default)]
pub struct LapBoard {
    state: RwLock<BoardState>,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl LapBoard {
    pub fn new() -> LapBoard {
        LapBoard::default()
    }

    pub async fn snapshot(&self) -> Arc<Snapshot> {
        self.state.read().await.snapshot.clone()
    }

    pub async fn health(&self) -> Health {
        self.state.read().await.health.clone()
    }

    /// # refresh the laps
    /// fetches a new snapshot from the source. on failure the old snapshot
    /// stays and the board is marked stale.
    ///
    /// ## Arguments
    /// * `source` - where to get the laps from
    ///
    /// ## Returns
    /// * `RefreshOutcome` - whether the snapshot was replaced or the refresh skipped
    pub async fn refresh(&self, source: &dyn LapSource) -> CustomResult<RefreshOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(target: "board:refresh", "refresh from {} skipped, one is already running", source.describe());
            return Ok(RefreshOutcome::Skipped);
        }
        let _in_flight = InFlight(&self.in_flight);

        let attempted_at = Utc::now();
        let records = match source.fetch_laps().await {
            Ok(records) => records,
            Err(err) => {
                error!(target: "board:refresh", "refresh from {} failed, keeping previous laps: {}", source.describe(), err);
                let mut state = self.state.write().await;
                state.health.stale = true;
                state.health.last_attempt = Some(attempted_at);
                state.health.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        let snapshot = Snapshot::build(records, attempted_at);
        let laps = snapshot.laps.len();
        debug!(target: "board:refresh", "built snapshot with {} laps", laps);

        *self.state.write().await = BoardState {
            snapshot: Arc::new(snapshot),
            health: Health {
                stale: false,
                last_success: Some(attempted_at),
                last_attempt: Some(attempted_at),
                last_error: None,
            },
        };

        info!(target: "board:refresh", "loaded {} laps from {}", laps, source.describe());
        Ok(RefreshOutcome::Updated { laps })
    }
}
