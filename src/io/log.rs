use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::io::config_io::ConfigError;

/// Where log lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Append to a file (TUI sessions, which own the terminal)
    File(&'a Path),
    Stderr,
    /// No subscriber at all
    Off,
}

/// Build the filter from a config directive such as `"info"` or `"taskpad=debug"`
pub fn build_filter(level: &str) -> Result<EnvFilter, ConfigError> {
    EnvFilter::try_new(level).map_err(|_| ConfigError::InvalidLogLevel(level.to_string()))
}

/// Install the global tracing subscriber
pub fn init(level: &str, target: LogTarget<'_>) -> Result<(), Box<dyn Error>> {
    let filter = build_filter(level)?;
    match target {
        LogTarget::Off => {}
        LogTarget::Stderr => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| e as Box<dyn Error>)?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| e as Box<dyn Error>)?;
        }
    }
    Ok(())
}
