use std::fs;
use std::path::{Path, PathBuf};

use crate::model::task::Task;

/// Error type for reading the task seed file
#[derive(Debug, thiserror::Error)]
pub enum TaskFileError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load tasks from a JSON array. Every entry is validated like user input.
pub fn load_tasks(path: &Path) -> Result<Vec<Task>, TaskFileError> {
    let text = fs::read_to_string(path).map_err(|e| TaskFileError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let tasks: Vec<Task> = serde_json::from_str(&text).map_err(|e| TaskFileError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(count = tasks.len(), path = %path.display(), "tasks loaded");
    Ok(tasks)
}
