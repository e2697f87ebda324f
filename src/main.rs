use std::sync::Arc;

use log::info;
use rocket::{launch, Build, Rocket};

use racing_laptimes_analytics::build_rocket;
use racing_laptimes_analytics::cron_jobs::{refresh_laps, register_cron_jobs};
use racing_laptimes_analytics::modules::board::LapBoard;
use racing_laptimes_analytics::modules::config::Config;
use racing_laptimes_analytics::modules::helpers::logging::setup_logging;
use racing_laptimes_analytics::modules::laptimes_api::{HttpLapSource, LapSource};

#[launch]
async fn rocket() -> Rocket<Build> {
    let config = Config::from_env().expect("Failed to load config");
    setup_logging(&config).expect("Failed to setup logging");

    let board = Arc::new(LapBoard::new());
    let source: Arc<dyn LapSource> = Arc::new(
        HttpLapSource::new(&config.api_url, config.fetch_timeout).expect("Failed to create http client"),
    );

    // load the first snapshot before serving, a failure leaves the board empty and stale
    refresh_laps(&board, source.as_ref()).await;

    // keep polling in the background
    register_cron_jobs(board.clone(), source, config.refresh_interval)
        .await
        .expect("Failed to register cron jobs");

    info!(target: "main", "serving laps from {}", config.api_url);
    build_rocket(board, config)
}
