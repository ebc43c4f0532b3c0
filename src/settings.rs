//! Player audio preferences
//!
//! Handed to the game by the host; nothing here is written back anywhere.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to parse settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Engine tone volume (0.0 - 1.0)
    pub engine_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            engine_volume: 1.0,
            muted: false,
        }
    }
}

impl Settings {
    /// Parse settings, clamping volumes into range
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let mut settings: Settings = serde_json::from_str(json)?;
        settings.clamp();
        Ok(settings)
    }

    fn clamp(&mut self) {
        self.master_volume = unit(self.master_volume);
        self.sfx_volume = unit(self.sfx_volume);
        self.engine_volume = unit(self.engine_volume);
    }

    /// Gain multiplier for one-shot effects
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Gain multiplier for the continuous engine tone
    pub fn effective_engine_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.engine_volume
        }
    }
}

fn unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
