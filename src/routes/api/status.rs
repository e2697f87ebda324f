use std::sync::Arc;

use rocket::get;
use rocket::serde::json::Json;
use rocket::State;

use crate::modules::board::{Health, LapBoard};

/// # how fresh the laps are
/// `stale` is set when the last refresh failed
#[get("/status")]
pub async fn get_status(board: &State<Arc<LapBoard>>) -> Json<Health> {
    Json(board.health().await)
}
