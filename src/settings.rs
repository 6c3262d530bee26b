//! Session configuration
//!
//! Field dimensions and population are the only inputs the simulation takes;
//! the rest drives the headless runner. Loaded from a JSON file, with every
//! missing field taking its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::Field;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Field ===
    /// Field width in world units
    pub width: f32,
    /// Field height in world units
    pub height: f32,
    /// AI characters alive at any time
    pub num_characters: usize,

    // === Simulation ===
    /// RNG seed (same seed + same input = same session)
    pub seed: u64,
    /// Ticks per simulated second
    pub fps: u32,

    // === Headless runner ===
    /// Stop after this many ticks if nobody has won or lost
    pub max_ticks: u64,
    /// Emit a snapshot every N ticks (0 = never)
    pub snapshot_every: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_FIELD_WIDTH,
            height: DEFAULT_FIELD_HEIGHT,
            num_characters: DEFAULT_NUM_CHARACTERS,

            seed: 0,
            fps: (1.0 / SIM_DT).round() as u32,

            max_ticks: 30 * 60 * 5,
            snapshot_every: 0,
        }
    }
}

impl GameConfig {
    /// Parse a JSON document; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Load from a JSON file, falling back to defaults when it is missing or malformed
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring malformed config {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("No config at {} ({}), using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Fixed timestep in seconds (`fps` of zero falls back to the default)
    pub fn sim_dt(&self) -> f32 {
        if self.fps == 0 {
            SIM_DT
        } else {
            1.0 / self.fps as f32
        }
    }

    /// Build the seeded field this configuration describes
    pub fn build_field(&self) -> Result<Field, GameError> {
        Field::new(self.width, self.height, self.num_characters, self.seed)
    }
}
