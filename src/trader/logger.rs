//! Logging setup for the chart application.

use chrono::Local;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use super::setting::Settings;
use super::utility::get_folder_path;
use crate::error::{ChartError, Result};

/// Log level constants (compatible with Python logging module)
pub const DEBUG: i32 = 10;
pub const INFO: i32 = 20;
pub const WARNING: i32 = 30;
pub const ERROR: i32 = 40;
pub const CRITICAL: i32 = 50;

/// Convert integer log level to tracing Level
pub fn level_from_int(level: i32) -> Level {
    match level {
        i32::MIN..=10 => Level::DEBUG,
        11..=20 => Level::INFO,
        21..=30 => Level::WARN,
        _ => Level::ERROR,
    }
}

/// Initialize the global subscriber from `log.*` settings
pub fn init_logger(settings: &Settings) -> Result<()> {
    if !settings.get_bool("log.active").unwrap_or(true) {
        return Ok(());
    }

    let log_level = settings.get_int("log.level").unwrap_or(i64::from(INFO));
    let level = level_from_int(i32::try_from(log_level).unwrap_or(INFO));
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let console_layer = settings
        .get_bool("log.console")
        .unwrap_or(true)
        .then(|| fmt::layer().with_target(true).with_ansi(true));

    let file_layer = if settings.get_bool("log.file").unwrap_or(false) {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(get_log_file_path()?)?;
        Some(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false).boxed())
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| ChartError::Logger(e.to_string()))
}

/// Get the log file path for today
fn get_log_file_path() -> Result<PathBuf> {
    let log_folder = get_folder_path("log")?;
    let today = Local::now().format("%Y%m%d").to_string();
    Ok(log_folder.join(format!("kline_{}.log", today)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_int() {
        assert_eq!(level_from_int(DEBUG), Level::DEBUG);
        assert_eq!(level_from_int(INFO), Level::INFO);
        assert_eq!(level_from_int(WARNING), Level::WARN);
        assert_eq!(level_from_int(ERROR), Level::ERROR);
        assert_eq!(level_from_int(CRITICAL), Level::ERROR);
    }

    #[test]
    fn test_inactive_logger_is_noop() {
        let settings = Settings::with_defaults();
        settings.set("log.active", crate::trader::setting::SettingValue::Bool(false));
        assert!(init_logger(&settings).is_ok());
    }
}
