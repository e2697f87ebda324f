use std::sync::Arc;

use rocket::{routes, Build, Rocket};

use crate::modules::board::LapBoard;
use crate::modules::config::Config;

pub mod cron_jobs;
pub mod errors;
pub mod modules;

pub(crate) mod macros {
    pub mod http_error_handler;
}

pub mod routes {
    pub mod api {
        pub mod laps;
        pub mod status;
    }
}

/// # build the web server
/// serves the board under `/api`
///
/// ## Arguments
/// * `board` - the board holding the current laps
/// * `config` - the loaded config
pub fn build_rocket(board: Arc<LapBoard>, config: Config) -> Rocket<Build> {
    use crate::routes::api;

    rocket::build()
        .manage(board)
        .manage(config)
        .mount(
            "/api",
            routes![
                // laps
                api::laps::get_laps,
                api::laps::get_fastest,
                api::laps::get_tracks,
                // board
                api::status::get_status,
            ],
        )
}
