use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use log::LevelFilter;

use crate::errors::{CustomResult, Error};
use crate::modules::helpers::logging::parse_level;
use crate::modules::helpers::view::FastestLapGrouping;

pub const DEFAULT_API_URL: &str = "https://api.racinggamers.se/laptimes.json";
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5 * 60;
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
const DEFAULT_LOG_FILE: &str = "program.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub refresh_interval: Duration,
    pub fetch_timeout: Duration,
    pub fastest_lap_grouping: FastestLapGrouping,
    /// track shown when a request does not pick one
    pub default_track: Option<String>,
    pub logging_level: LevelFilter,
    pub log_file: String,
}

impl Config {
    /// # load the config
    /// reads the `.env` file if there is one, then the environment
    pub fn from_env() -> CustomResult<Config> {
        dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    /// # load the config from a lookup function
    ///
    /// ## Arguments
    /// * `lookup` - returns the value of a variable, `None` when it is not set
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> CustomResult<Config> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let fastest_lap_grouping = match read("FASTEST_LAP_GROUPING") {
            Some(value) => value.parse::<FastestLapGrouping>().map_err(|_| Error::ConfigError {
                key: "FASTEST_LAP_GROUPING",
                reason: format!("expected driver or driver-track, got {value:?}"),
            })?,
            None => FastestLapGrouping::default(),
        };

        Ok(Config {
            api_url: read("LAPTIMES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            refresh_interval: seconds(
                "REFRESH_INTERVAL_SECS",
                read("REFRESH_INTERVAL_SECS"),
                DEFAULT_REFRESH_INTERVAL_SECS,
            )?,
            fetch_timeout: seconds("FETCH_TIMEOUT_SECS", read("FETCH_TIMEOUT_SECS"), DEFAULT_FETCH_TIMEOUT_SECS)?,
            fastest_lap_grouping,
            default_track: read("DEFAULT_TRACK"),
            logging_level: read("LOGGING_LEVEL")
                .map(|level| parse_level(&level))
                .unwrap_or(LevelFilter::Info),
            log_file: read("LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }
}

fn seconds(key: &'static str, value: Option<String>, default: u64) -> CustomResult<Duration> {
    let secs = match value {
        Some(value) => value.trim().parse::<u64>().map_err(|err| Error::ConfigError {
            key,
            reason: format!("{value:?} is not a number of seconds: {err}"),
        })?,
        None => default,
    };

    if secs == 0 {
        return Err(Error::ConfigError { key, reason: "must be at least one second".to_string() });
    }
    Ok(Duration::from_secs(secs))
}
