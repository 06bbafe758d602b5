//! Persistent storage
//!
//! This module handles persistence of the client settings.

pub mod settings;

use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Could not determine a data directory for this platform")]
    NoDataDir,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Platform data directory, e.g. `~/.local/share/grocerygo` on Linux
pub fn get_data_dir() -> Result<PathBuf, StorageError> {
    ProjectDirs::from("com", "GroceryGo", "grocerygo")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(StorageError::NoDataDir)
}
