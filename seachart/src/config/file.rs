//! Configuration file handling for ~/.seachart/config.ini.
//!
//! Loads and saves user configuration with sensible defaults.
//! Settings structs live in [`super::settings`], constants in [`super::defaults`],
//! parsing in [`super::parser`], and serialization in [`super::writer`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use super::settings::ConfigFile;
use crate::follow::{FixLimits, FollowConfig};
use crate::render::CoordinatorConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.seachart/config.ini).
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load() -> Result<Self, ConfigFileError> {
        let path = config_file_path();
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.seachart/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        let path = config_file_path();
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = self.to_ini_string();
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Render as the commented INI text that [`save_to`](Self::save_to) writes.
    pub fn to_ini_string(&self) -> String {
        super::writer::to_config_string(self)
    }

    /// Create the default config file if it doesn't exist.
    ///
    /// Returns the path to the config file.
    pub fn ensure_exists() -> Result<PathBuf, ConfigFileError> {
        let path = config_file_path();
        Self::ensure_exists_at(&path)?;
        Ok(path)
    }

    /// Create a default config file at `path` unless one is already there.
    ///
    /// Returns true if a file was written.
    pub fn ensure_exists_at(path: &Path) -> Result<bool, ConfigFileError> {
        if path.exists() {
            return Ok(false);
        }
        Self::default().save_to(path)?;
        Ok(true)
    }

    /// Follow controller tuning from the `[follow]` section.
    pub fn follow_config(&self) -> FollowConfig {
        FollowConfig {
            suppression: Duration::from_millis(self.follow.suppression_ms),
            fix_limits: FixLimits {
                max_accuracy_m: self.follow.max_accuracy_m,
                max_age: Duration::from_secs(self.follow.max_fix_age_secs),
            },
            course_min_speed_knots: self.follow.course_min_speed_kn,
        }
    }

    /// Runtime configuration for the render coordinator.
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig {
            follow: self.follow_config(),
            programmatic_window: Duration::from_millis(self.follow.programmatic_window_ms),
            max_zoom: self.follow.max_zoom as f64,
            recolor_interval: Duration::from_secs(self.annotations.recolor_interval_secs),
            overlay_opacity: self.tiles.overlay_opacity,
        }
    }
}

/// Get the path to the config directory (~/.seachart).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".seachart")
}

/// Get the path to the config file (~/.seachart/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}
