use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Goal data file used when none is given on the command line.
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Actor whose goals are shown when none is given on the command line.
    #[serde(default)]
    pub owner_id: Option<Uuid>,

    /// Revert optimistic board changes when the store rejects a write.
    #[serde(default)]
    pub rollback_on_failure: bool,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/goalboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("goalboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("goalboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Reads a config file, falling back to defaults when it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Data file to open: the configured one, else the platform data directory.
    pub fn effective_data_file(&self) -> Option<PathBuf> {
        self.data_file.clone().or_else(|| {
            dirs::data_dir().map(|data| data.join("goalboard").join("goals.json"))
        })
    }
}
