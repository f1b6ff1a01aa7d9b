use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::{Config, SeedTask, default_seed};
use crate::ops::task_ops::{Store, TaskError};

/// Config file looked up in the working directory when `--config` is not given
pub const CONFIG_FILE_NAME: &str = "taskpad.toml";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid seed task #{index}: {source}")]
    InvalidSeed { index: usize, source: TaskError },
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
}

/// Parse a config document
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate_seed(config.seed.as_deref().unwrap_or_default())?;
    Ok(config)
}

/// Read the config from an explicit path
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&text, path)
}

/// The config file to read: the explicit path if given, else `taskpad.toml`
/// in `dir` when it exists. `None` means built-in defaults.
pub fn resolve_config_path(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = dir.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Load the config: the explicit path if given (must exist), else
/// `taskpad.toml` in `dir` if present, else defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<Config, ConfigError> {
    match resolve_config_path(explicit, dir) {
        Some(path) => read_config(&path),
        None => Ok(Config::default()),
    }
}

/// The seed tasks the config asks for (the built-in seed when it names none)
pub fn seed_tasks(config: &Config) -> Vec<SeedTask> {
    config.seed.clone().unwrap_or_else(default_seed)
}

/// Build the starting store. `empty` skips the seed entirely.
pub fn initial_store(config: &Config, empty: bool) -> Result<Store, ConfigError> {
    if empty {
        return Ok(Store::new());
    }
    Store::with_seed(&seed_tasks(config)).map_err(|e| ConfigError::InvalidSeed {
        index: e.index,
        source: e.source,
    })
}

fn validate_seed(seed: &[SeedTask]) -> Result<(), ConfigError> {
    for (i, entry) in seed.iter().enumerate() {
        if !entry.fields().has_title() {
            return Err(ConfigError::InvalidSeed {
                index: i + 1,
                source: TaskError::EmptyTitle,
            });
        }
    }
    Ok(())
}
