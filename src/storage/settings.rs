//! Settings storage
//!
//! Manages persistence of the prediction service connection settings.

use crate::storage::{get_data_dir, StorageError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Base URL of the prediction service
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Request timeout in seconds; `None` waits as long as the connection lives
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: None,
        }
    }
}

impl AppSettings {
    /// Validate settings values
    ///
    /// Falls back to the default URL for anything that is not http(s).
    pub fn validate(&mut self) {
        let url = self.server_url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            self.server_url = url.to_string();
        } else {
            tracing::warn!(
                "Invalid server URL {:?}, using {}",
                self.server_url,
                DEFAULT_SERVER_URL
            );
            self.server_url = default_server_url();
        }

        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// Get the settings file path
fn get_settings_path() -> Result<PathBuf, StorageError> {
    Ok(get_data_dir()?.join("settings.json"))
}

/// Load settings from disk
///
/// Returns default settings if the file is unreadable or corrupted. A missing
/// file is created with the defaults.
pub fn load_settings() -> AppSettings {
    match get_settings_path().and_then(|path| load_or_create_settings(&path)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!("Failed to load settings, using defaults: {}", e);
            AppSettings::default()
        }
    }
}

pub fn load_or_create_settings(path: &Path) -> Result<AppSettings, StorageError> {
    if !path.exists() {
        tracing::info!("Settings file not found, writing defaults to {:?}", path);
        let settings = AppSettings::default();
        save_settings_to(&settings, path)?;
        return Ok(settings);
    }
    load_settings_from(path)
}

pub fn load_settings_from(path: &Path) -> Result<AppSettings, StorageError> {
    let json = fs::read_to_string(path)?;
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.validate();

    tracing::debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Save settings to disk
pub fn save_settings_to(settings: &AppSettings, path: &Path) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(settings)?;
    fs::write(path, json)?;

    tracing::debug!("Saved settings to {:?}", path);
    Ok(())
}
