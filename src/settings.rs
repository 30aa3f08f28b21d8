//! Volume settings consulted on each playback
//!
//! Supports saving and loading in RON (Rusty Object Notation) and JSON
//! formats so a game can persist the player's mixer preferences.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Effect and background-music volumes (0.0 = silent, 1.0 = normal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Volume applied to one-shot effects at playback time
    pub effect_volume: f32,
    /// Volume applied to the background-music channel
    pub bgm_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            effect_volume: 1.0,
            bgm_volume: 1.0,
        }
    }
}

impl AudioSettings {
    /// Set the effect volume (clamped non-negative)
    #[must_use]
    pub fn with_effect_volume(mut self, volume: f32) -> Self {
        self.effect_volume = volume.max(0.0);
        self
    }

    /// Set the background-music volume (clamped non-negative)
    #[must_use]
    pub fn with_bgm_volume(mut self, volume: f32) -> Self {
        self.bgm_volume = volume.max(0.0);
        self
    }

    /// Save settings to a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails
    pub fn save_ron(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let ron_string = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| SettingsError::SerializeError(e.to_string()))?;
        fs::write(path, ron_string).map_err(|e| SettingsError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load settings from a RON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_ron(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|e| SettingsError::IoError(e.to_string()))?;
        let settings =
            ron::from_str(&content).map_err(|e| SettingsError::DeserializeError(e.to_string()))?;
        Ok(settings)
    }

    /// Save settings to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json_string = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::SerializeError(e.to_string()))?;
        fs::write(path, json_string).map_err(|e| SettingsError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Load settings from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path).map_err(|e| SettingsError::IoError(e.to_string()))?;
        let settings = serde_json::from_str(&content)
            .map_err(|e| SettingsError::DeserializeError(e.to_string()))?;
        Ok(settings)
    }
}

/// Errors that can occur during settings operations
#[derive(Debug, Clone)]
pub enum SettingsError {
    /// IO error reading or writing file
    IoError(String),
    /// Error serializing settings
    SerializeError(String),
    /// Error deserializing settings
    DeserializeError(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoError(e) => write!(f, "IO error: {e}"),
            Self::SerializeError(e) => write!(f, "Serialize error: {e}"),
            Self::DeserializeError(e) => write!(f, "Deserialize error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}
