//! Game settings and preferences
//!
//! Read from an optional `pong.json` next to the binary's working directory.
//! Every field has a default, so a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Key;
use crate::timing::Cadence;

pub use crate::sim::{RespawnPolicy, Tuning};

/// Which keys drive which paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub left_up: Key,
    pub left_down: Key,
    pub right_up: Key,
    pub right_down: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_up: Key::Char('w'),
            left_down: Key::Char('s'),
            right_up: Key::Up,
            right_down: Key::Down,
        }
    }
}

/// Terminal backend options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalSettings {
    /// Presents per second
    pub frame_cap_hz: u32,
    /// How long a key counts as held after its last press/repeat when the
    /// terminal does not report releases
    pub hold_ms: u64,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self {
            frame_cap_hz: 60,
            hold_ms: 150,
        }
    }
}

/// Failure to read or parse a settings file
#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Could not read settings file : {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings JSON : {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub bindings: KeyBindings,
    /// Update cadence
    pub cadence: Cadence,
    /// Ball velocity handling after a point
    pub respawn: RespawnPolicy,
    pub tuning: Tuning,
    /// Seed for the match RNG
    pub seed: u64,
    pub terminal: TerminalSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bindings: KeyBindings::default(),
            cadence: Cadence::default(),
            respawn: RespawnPolicy::default(),
            tuning: Tuning::default(),
            seed: 0x5EED,
            terminal: TerminalSettings::default(),
        }
    }
}

impl Settings {
    /// Settings file looked up in the working directory
    pub const FILE_NAME: &'static str = "pong.json";

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load `pong.json` if present, falling back to defaults
    pub fn load() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            log::info!("No {} found, using default settings", Self::FILE_NAME);
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Self::FILE_NAME);
                settings
            }
            Err(e) => {
                log::error!("{} ignored: {}", Self::FILE_NAME, e);
                Self::default()
            }
        }
    }
}
