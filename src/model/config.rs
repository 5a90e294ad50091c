use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration from taskbook.toml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON file of tasks loaded at startup (read-only)
    #[serde(default)]
    pub tasks_file: Option<PathBuf>,
    /// Default: see `default_log_level`
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub filters: FilterConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tasks_file: None,
            log_level: default_log_level(),
            filters: FilterConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Filters active at startup, in their display form (e.g. `not-done`, `tag:work`)
    #[serde(default)]
    pub default: Vec<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}
