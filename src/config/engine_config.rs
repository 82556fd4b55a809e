use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::model::{LaneLayout, NoteGeometry};
use crate::play::run_state::{MAX_HEALTH, MIN_HEALTH};
use crate::util::error::EngineError;

/// Session settings supplied at session start.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Lane keys, indexed by lane.
    pub lanes: LaneLayout,
    /// Travel position of the hit zone.
    pub hit_zone_center: f64,
    pub initial_health: f64,
    pub geometry: NoteGeometry,
    /// Song length in seconds. The session finishes when it elapses.
    pub song_length: Option<f64>,
    /// End the session when health reaches zero.
    pub fail_on_zero_health: bool,
    /// Starting complexity (0-100). Can be changed during play.
    pub complexity: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lanes: LaneLayout::default(),
            hit_zone_center: 0.0,
            initial_health: MAX_HEALTH,
            geometry: NoteGeometry::default(),
            song_length: None,
            fail_on_zero_health: true,
            complexity: 30.0,
        }
    }
}

impl EngineConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Saves config to a specified path.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.lanes.validate()?;
        if !self.hit_zone_center.is_finite() {
            return Err(EngineError::InvalidConfig(format!(
                "hit_zone_center must be finite, got {}",
                self.hit_zone_center
            )));
        }
        if !(MIN_HEALTH..=MAX_HEALTH).contains(&self.initial_health) {
            return Err(EngineError::InvalidConfig(format!(
                "initial_health must be within {MIN_HEALTH}..={MAX_HEALTH}, got {}",
                self.initial_health
            )));
        }
        let NoteGeometry {
            tap_height,
            beat_length,
        } = self.geometry;
        if !(tap_height.is_finite() && tap_height >= 0.0)
            || !(beat_length.is_finite() && beat_length >= 0.0)
        {
            return Err(EngineError::InvalidConfig(format!(
                "note geometry must be finite and non-negative, got {:?}",
                self.geometry
            )));
        }
        if let Some(length) = self.song_length
            && !(length.is_finite() && length > 0.0)
        {
            return Err(EngineError::InvalidConfig(format!(
                "song_length must be positive, got {length}"
            )));
        }
        Ok(())
    }
}
