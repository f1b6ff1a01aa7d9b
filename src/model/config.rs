use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::task::{Priority, TaskFields};

/// Configuration from taskpad.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
    /// Initial tasks, top to bottom. `None` means the built-in seed.
    #[serde(default)]
    pub seed: Option<Vec<SeedTask>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Theme slot overrides, `"#RRGGBB"` values
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// EnvFilter directive, e.g. `"info"` or `"taskpad=debug"`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file for the TUI. Without one the TUI does not log.
    #[serde(default)]
    pub file: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
            file: None,
        }
    }
}

/// A `[[seed]]` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
}

impl SeedTask {
    pub fn fields(&self) -> TaskFields {
        TaskFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
        }
    }
}

/// The seed used when the config names none
pub fn default_seed() -> Vec<SeedTask> {
    vec![SeedTask {
        title: "Design the new homepage".into(),
        description: String::new(),
        due_date: None,
        priority: Priority::High,
        completed: false,
    }]
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".into()
}
