// SPDX-License-Identifier: GPL-3.0-only

//! User configuration handling
//!
//! The configuration is persisted as JSON under the user config directory.
//! Missing or unreadable files fall back to defaults; the booth never fails
//! to start because of a bad config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Name of the config file inside the config directory
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mirror the camera preview horizontally (selfie mode). Applied to
    /// captured stills as well so exports match the preview.
    pub mirror_preview: bool,
    /// Override for the photo save directory
    pub save_dir: Option<PathBuf>,
    /// Preferred camera device path (e.g. /dev/video0)
    pub camera_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mirror_preview: true, // Default to mirrored (selfie mode)
            save_dir: None,
            camera_path: None,
        }
    }
}

impl Config {
    /// Path of the config file (~/.config/photobooth/config.json)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("photobooth").join(CONFIG_FILE))
    }

    /// Load the configuration, falling back to defaults on any failure
    pub fn load() -> Self {
        let Some(path) = Self::path() else {
            warn!("No config directory available, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded configuration");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Invalid config file, using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Persist the configuration
    pub fn save(&self) -> Result<(), String> {
        let path = Self::path().ok_or_else(|| "No config directory available".to_string())?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }
        let contents = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        std::fs::write(&path, contents).map_err(|e| e.to_string())
    }
}
