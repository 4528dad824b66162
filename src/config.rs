//! Application configuration module
//!
//! This module centralizes all application configuration settings using `confy`
//! for automatic serialization and OS-specific config directory management.

use crate::constant::{
    API_URL_ENV, APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, DEFAULT_REQUEST_TIMEOUT_SECS,
    MAX_RECENT_NOTES,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Confy(#[from] confy::ConfyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct Config {
    pub settings: Settings,
}

impl Config {
    /// Load configuration from disk, creating default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let settings: Settings = confy::load(APP_NAME, None)?;
        info!("Load config from {:?}", Self::config_path()?);
        Ok(Self { settings })
    }

    /// Save current configuration to disk
    pub fn save(&self) -> Result<(), ConfigError> {
        confy::store(APP_NAME, None, &self.settings)?;
        info!("Save config to {:?}", Self::config_path()?);
        Ok(())
    }

    /// Get the application data directory
    /// Falls back to a local "data" directory if platform dirs are unavailable
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.settings.data_dir {
            return dir.clone();
        }
        if let Some(proj_dirs) = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME) {
            proj_dirs.data_dir().to_path_buf()
        } else {
            PathBuf::from("data")
        }
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(confy::get_configuration_file_path(APP_NAME, None)?)
    }

    /// Which backend to talk to. `NOTES_API_URL` wins over the stored setting.
    pub fn backend(&self) -> BackendKind {
        match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => BackendKind::Remote { api_url: url },
            _ => self.settings.backend.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.request_timeout_secs.max(1))
    }

    /// Record a note as recently opened
    pub fn add_recent_note(&mut self, note_id: &str) {
        push_recent(&mut self.settings.recent_notes, note_id);

        // Save changes in background since it's synchronous IO
        let settings = self.settings.clone();
        std::thread::spawn(move || {
            if let Err(e) = confy::store(APP_NAME, None, &settings) {
                tracing::error!("Failed to save recent notes: {}", e);
            }
        });
    }

    /// Forget a note that no longer exists
    pub fn remove_recent_note(&mut self, note_id: &str) {
        self.settings.recent_notes.retain(|id| id != note_id);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default settings: {}", e);
            Self {
                settings: Settings::default(),
            }
        })
    }
}

fn push_recent(recent: &mut Vec<String>, note_id: &str) {
    // Move the id to the front
    recent.retain(|id| id != note_id);
    recent.insert(0, note_id.to_string());
    recent.truncate(MAX_RECENT_NOTES);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BackendKind {
    /// JSON catalog and content-addressed history in the data directory
    #[default]
    Local,
    /// The notes REST API, e.g. `http://localhost:8001`
    Remote { api_url: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub backend: BackendKind,

    /// Overrides the platform data directory for the local backend
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// One of trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Application theme, "light" or "dark"
    #[serde(default)]
    pub theme: String,

    #[serde(default)]
    pub font_size: f32,

    /// Most recently opened note ids, newest first
    #[serde(default)]
    pub recent_notes: Vec<String>,
}

fn default_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Local,
            data_dir: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            log_level: default_log_level(),
            theme: "light".to_string(),
            font_size: 14.0,
            recent_notes: Vec::new(),
        }
    }
}

impl Settings {
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}
