use log::{error, info};

use racing_laptimes_analytics::modules::board::LapBoard;
use racing_laptimes_analytics::modules::config::Config;
use racing_laptimes_analytics::modules::helpers::logging::setup_logging;
use racing_laptimes_analytics::modules::helpers::view::fastest_lap_rows;
use racing_laptimes_analytics::modules::laptimes_api::HttpLapSource;

/// fetch the laps once and log the fastest lap table
#[tokio::main]
async fn main() {
    let config = Config::from_env().expect("Failed to load config");
    setup_logging(&config).expect("failed to setup logging");

    let source = match HttpLapSource::new(&config.api_url, config.fetch_timeout) {
        Ok(source) => source,
        Err(err) => {
            error!(target: "print_fastest_laps", "could not create http client: {}", err);
            return;
        }
    };

    let board = LapBoard::new();
    if let Err(err) = board.refresh(&source).await {
        error!(target: "print_fastest_laps", "failed loading laps from {}: {}", config.api_url, err);
        return;
    }

    let snapshot = board.snapshot().await;
    info!(target: "print_fastest_laps", "fastest laps by {}", config.fastest_lap_grouping);
    for (position, row) in fastest_lap_rows(&snapshot.laps, config.fastest_lap_grouping).iter().enumerate() {
        info!(
            target: "print_fastest_laps",
            "{:>3}. {:<24} {:<28} {:>10} {}",
            position + 1,
            row.driver,
            row.track,
            row.lap_time,
            row.date
        );
    }
}
