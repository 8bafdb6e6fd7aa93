//! Persistent application configuration.

use dirs_next as dirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::persistence::{JsonFileStore, default_data_dir};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "STRONGME_DATA_DIR";

fn default_rest_seconds() -> u32 {
    90
}

fn default_reps() -> u32 {
    10
}

fn default_true() -> bool {
    true
}

/// Configuration stored as JSON in the user's config directory.
///
/// Every field is `#[serde(default)]` so a partial or older file still
/// loads, with missing values taking their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_rest_seconds")]
    pub default_rest_seconds: u32,
    /// Reps pre-filled on new sets.
    #[serde(default = "default_reps")]
    pub default_reps: u32,
    /// Insert the sample history and profile into an empty store.
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            default_rest_seconds: default_rest_seconds(),
            default_reps: default_reps(),
            seed_sample_data: true,
        }
    }
}

impl Settings {
    const FILE: &'static str = "strongme_settings.json";

    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(Self::FILE))
    }

    /// Load settings, falling back to defaults when the file is missing or
    /// unreadable.
    pub fn load() -> Self {
        if let Some(path) = Self::path() {
            if let Ok(data) = std::fs::read_to_string(&path) {
                match serde_json::from_str(&data) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("Ignoring invalid settings in {}: {e}", path.display()),
                }
            }
        }
        Self::default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::path() {
            if let Err(e) = crate::persistence::write_json(self, &path) {
                log::error!("Failed to save settings: {e}");
            }
        }
    }

    /// Directory holding the persisted collections.
    ///
    /// `STRONGME_DATA_DIR` takes precedence over the configured value, which
    /// in turn overrides the platform default.
    pub fn resolve_data_dir(&self) -> Option<PathBuf> {
        std::env::var_os(DATA_DIR_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| self.data_dir.clone())
            .or_else(default_data_dir)
    }

    /// File-backed persistence rooted at [`Settings::resolve_data_dir`].
    pub fn file_store(&self) -> Option<JsonFileStore> {
        self.resolve_data_dir().map(JsonFileStore::new)
    }
}
