//! Tunables for the overlay loop, with TOML loading.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::tracker::{DEFAULT_MAX_LOST_FRAMES, PinPolicy};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the interaction loop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Consecutive empty frames the last marker set is still reported for.
    pub max_lost_frames: u32,
    /// Index-to-middle tip distance (pixels) below which two raised fingers count as a click.
    pub click_distance_threshold: f32,
    /// Cursor smoothing divisor.
    pub smoothening: f32,
    /// Only every n-th frame is processed.
    pub frame_interval: u64,
    /// Camera border (pixels) excluded from the cursor mapping.
    pub frame_margin: f32,
    pub frame_width: u32,
    pub frame_height: u32,
    /// Hands kept from the tracker each frame; 0 disables hand interaction.
    pub max_hands: u32,
    pub pin_policy: PinPolicy,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            max_lost_frames: DEFAULT_MAX_LOST_FRAMES,
            click_distance_threshold: 60.0,
            smoothening: 7.0,
            frame_interval: 2,
            frame_margin: 100.0,
            frame_width: 800,
            frame_height: 600,
            max_hands: 2,
            pin_policy: PinPolicy::PerNewId,
        }
    }
}

impl InteractionConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_interval == 0 {
            return Err(ConfigError::Invalid("frame_interval must be at least 1".into()));
        }
        if !(self.smoothening > 0.0) {
            return Err(ConfigError::Invalid("smoothening must be positive".into()));
        }
        if !(self.click_distance_threshold > 0.0) {
            return Err(ConfigError::Invalid(
                "click_distance_threshold must be positive".into(),
            ));
        }
        let min_side = self.frame_width.min(self.frame_height) as f32;
        if self.frame_margin < 0.0 || 2.0 * self.frame_margin >= min_side {
            return Err(ConfigError::Invalid(format!(
                "frame_margin {} leaves no mapping range in a {}x{} frame",
                self.frame_margin, self.frame_width, self.frame_height
            )));
        }
        Ok(())
    }
}
