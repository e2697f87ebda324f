use fern::Dispatch;
use log::LevelFilter;

use crate::modules::config::Config;

/// unknown levels fall back to info
pub fn parse_level(level: &str) -> LevelFilter {
    match level.trim().to_uppercase().as_str() {
        "OFF" => LevelFilter::Off,
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub fn setup_logging(config: &Config) -> Result<(), fern::InitError> {
    let base_config = Dispatch::new()
        .level(config.logging_level)
        // rocket is chatty on info
        .level_for("rocket", LevelFilter::Warn)
        .level_for("_", LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        });

    base_config
        .chain(std::io::stdout())
        .chain(fern::log_file(&config.log_file)?)
        .apply()?;

    Ok(())
}
