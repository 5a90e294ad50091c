use std::fs;
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::model::config::Config;
use crate::model::filter::{FilterError, TaskFilter};

pub const CONFIG_FILE_NAME: &str = "taskbook.toml";

/// Error type for config loading
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
    #[error("bad default filter {spec:?}: {source}")]
    FilterError { spec: String, source: FilterError },
    #[error("bad log_level {level:?}: {reason}")]
    LogLevelError { level: String, reason: String },
}

/// Read the config at `path`. A missing file yields the defaults; any other
/// read failure is an error.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse the configured startup filters.
pub fn default_filters(config: &Config) -> Result<Vec<TaskFilter>, ConfigError> {
    config
        .filters
        .default
        .iter()
        .map(|spec| {
            spec.parse().map_err(|e| ConfigError::FilterError {
                spec: spec.clone(),
                source: e,
            })
        })
        .collect()
}

/// Build the log filter from `log_level`. A bare word must name a level;
/// anything with `=` or `,` is taken as an `EnvFilter` directive list.
pub fn log_filter(config: &Config) -> Result<EnvFilter, ConfigError> {
    let level = config.log_level.trim();
    let invalid = |reason: String| ConfigError::LogLevelError {
        level: level.to_string(),
        reason,
    };
    if !level.contains(['=', ',']) {
        level
            .parse::<LevelFilter>()
            .map_err(|e| invalid(e.to_string()))?;
    }
    EnvFilter::try_new(level).map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log_level, "warn");
        assert!(default_filters(&config).unwrap().is_empty());
    }

    #[test]
    fn reads_all_keys() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"tasks_file = "tasks.json"
log_level = "debug"

[filters]
default = ["not-done", "tag:work"]
"#,
        )
        .unwrap();

        let config = read_config(&path).unwrap();
        assert_eq!(config.tasks_file, Some(PathBuf::from("tasks.json")));
        assert_eq!(config.log_level, "debug");
        let filters = default_filters(&config).unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0], TaskFilter::NotDone);
        assert_eq!(filters[1].to_string(), "tag:work");
    }

    #[test]
    fn bad_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "log_level = [").unwrap();
        assert!(matches!(read_config(&path), Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn bad_filter_spec_is_an_error() {
        let config = Config {
            filters: crate::model::config::FilterConfig {
                default: vec!["someday".into()],
            },
            ..Config::default()
        };
        assert!(matches!(
            default_filters(&config),
            Err(ConfigError::FilterError { .. })
        ));
    }

    #[test]
    fn log_level_must_be_valid() {
        let with_level = |level: &str| Config {
            log_level: level.into(),
            ..Config::default()
        };
        assert!(log_filter(&Config::default()).is_ok());
        assert!(log_filter(&with_level("taskbook=debug,warn")).is_ok());
        assert!(matches!(
            log_filter(&with_level("loud")),
            Err(ConfigError::LogLevelError { .. })
        ));
        assert!(matches!(
            log_filter(&with_level("taskbook=loud")),
            Err(ConfigError::LogLevelError { .. })
        ));
    }
}
