use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::errors::{CustomResult, Error};
use crate::modules::board::{LapBoard, RefreshOutcome};
use crate::modules::laptimes_api::LapSource;

/// # refresh the board once
/// failures are logged and kept on the board, never returned
pub async fn refresh_laps(board: &LapBoard, source: &dyn LapSource) {
    match board.refresh(source).await {
        Ok(RefreshOutcome::Updated { laps }) => {
            info!(target: "cron_jobs:refresh_laps", "board refreshed with {} laps", laps);
        }
        Ok(RefreshOutcome::Skipped) => {
            info!(target: "cron_jobs:refresh_laps", "refresh skipped, previous one still running");
        }
        Err(err) => {
            warn!(target: "cron_jobs:refresh_laps", "refresh failed, board is stale: {}", err);
        }
    }
}

fn scheduler_error<E: std::fmt::Debug>(err: E) -> Error {
    Error::SchedulerError { reason: format!("{err:?}") }
}

/// # poll the lap source
/// refreshes the board every `interval`
///
/// ## Arguments
/// * `board` - the board to keep up to date
/// * `source` - where the laps come from
/// * `interval` - time between two refreshes
///
/// ## Returns
/// * `JobScheduler` - the started scheduler
pub async fn register_cron_jobs(
    board: Arc<LapBoard>,
    source: Arc<dyn LapSource>,
    interval: Duration,
) -> CustomResult<JobScheduler> {
    let scheduler = JobScheduler::new().await.map_err(scheduler_error)?;

    let job = Job::new_repeated_async(interval, move |_uuid, _l| {
        let board = board.clone();
        let source = source.clone();
        Box::pin(async move {
            refresh_laps(&board, source.as_ref()).await;
        })
    })
    .map_err(scheduler_error)?;

    scheduler.add(job).await.map_err(scheduler_error)?;
    scheduler.start().await.map_err(scheduler_error)?;

    info!(target: "cron_jobs:register_cron_jobs", "refreshing laps every {} seconds", interval.as_secs());
    Ok(scheduler)
}
