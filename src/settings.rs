//! Run settings
//!
//! Loaded from an optional JSON file; missing fields fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::spawn::Population;

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Arena ===
    pub width: f32,
    pub height: f32,

    // === Population ===
    pub population: Population,
    /// RNG seed for the initial layout
    pub seed: u64,

    // === Runner ===
    /// Pause between ticks in the native runner (ms)
    pub tick_interval_ms: u64,
    /// Give up after this many ticks (None = run until no Regular is left)
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,

            population: Population::new(20, 3, 5),
            seed: 12345,

            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            max_ticks: None,
        }
    }
}

impl Settings {
    /// Check arena dimensions; every other field is valid by type
    pub fn validate(&self) -> Result<()> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(SimError::InvalidSettings(format!(
                "arena must be positive and finite, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
