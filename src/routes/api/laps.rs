use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{error, warn};
use rocket::get;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde::Serialize;

use crate::errors::{CustomResult, Error};
use crate::macros::http_error_handler::handle_error_http;
use crate::modules::board::LapBoard;
use crate::modules::config::Config;
use crate::modules::helpers::filter::{track_options, FilterSelection, TrackOption, TrackSelector};
use crate::modules::helpers::sort::{SortDirection, SortField, SortState};
use crate::modules::helpers::view::{fastest_lap_rows, FastestLapRow, LapRow};

/**************************************************************************************************/
/**************** ROUTES **************************************************************************/
/**************************************************************************************************/

/// # get the lap table
/// every selector is optional. a missing track uses the configured default
/// track, the others default to all. a driver that has no laps left after the
/// track and validity filters is reset to all.
#[get("/laps?<track>&<validity>&<driver>&<sort>&<direction>")]
pub async fn get_laps(
    board: &State<Arc<LapBoard>>,
    config: &State<Config>,
    track: Option<&str>,
    validity: Option<&str>,
    driver: Option<&str>,
    sort: Option<&str>,
    direction: Option<&str>,
) -> Result<Json<LapTableResponse>, Status> {
    let selection = handle_error_http!(
        selection_from_query(config, track, validity, driver),
        "routes/api/laps:get_laps"
    );
    let sort = handle_error_http!(sort_from_query(sort, direction), "routes/api/laps:get_laps");

    let snapshot = board.snapshot().await;
    let health = board.health().await;
    let table = handle_error_http!(snapshot.table(&selection, &sort), "routes/api/laps:get_laps");

    Ok(Json(LapTableResponse {
        rows: table.rows,
        driver_options: table.driver_options,
        track: table.selection.track.to_string(),
        validity: table.selection.validity.to_string(),
        driver: table.selection.driver.to_string(),
        sort: table.sort,
        stale: health.stale,
        fetched_at: snapshot.fetched_at,
    }))
}

/// # get the fastest valid laps
/// one row per driver, or per driver and track, depending on the config
#[get("/laps/fastest")]
pub async fn get_fastest(board: &State<Arc<LapBoard>>, config: &State<Config>) -> Json<Vec<FastestLapRow>> {
    let snapshot = board.snapshot().await;
    Json(fastest_lap_rows(&snapshot.laps, config.fastest_lap_grouping))
}

#[get("/tracks")]
pub async fn get_tracks(board: &State<Arc<LapBoard>>) -> Json<Vec<TrackOption>> {
    let snapshot = board.snapshot().await;
    Json(track_options(&snapshot.laps))
}

/**************************************************************************************************/
/**************** HELPERS *************************************************************************/
/**************************************************************************************************/

fn parse_or<T: FromStr<Err = Error>>(value: Option<&str>, default: T) -> CustomResult<T> {
    match value {
        Some(value) => value.parse(),
        None => Ok(default),
    }
}

fn selection_from_query(
    config: &Config,
    track: Option<&str>,
    validity: Option<&str>,
    driver: Option<&str>,
) -> CustomResult<FilterSelection> {
    let default_track = match &config.default_track {
        Some(track_id) => TrackSelector::Track(track_id.clone()),
        None => TrackSelector::All,
    };

    Ok(FilterSelection {
        track: parse_or(track, default_track)?,
        validity: parse_or(validity, Default::default())?,
        driver: parse_or(driver, Default::default())?,
    })
}

fn sort_from_query(sort: Option<&str>, direction: Option<&str>) -> CustomResult<SortState> {
    Ok(SortState {
        field: sort.map(SortField::from_str).transpose()?,
        direction: parse_or(direction, SortDirection::Asc)?,
    })
}

/**************************************************************************************************/
/**************** STRUCTS *************************************************************************/
/**************************************************************************************************/

#[derive(Serialize, Debug)]
pub struct LapTableResponse {
    pub rows: Vec<LapRow>,
    pub driver_options: Vec<String>,
    pub track: String,
    pub validity: String,
    /// `all` when the requested driver was not an option
    pub driver: String,
    pub sort: SortState,
    pub stale: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}
