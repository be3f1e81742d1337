//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default
//! when missing, so a file only needs the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::InputMapper;

/// Settings errors
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: u32,
    pub field_height: u32,

    // === Match flow ===
    /// Points needed to win
    pub win_score: u32,
    /// Simulation ticks (and frames) per second
    pub tick_rate: u32,
    /// Freeze after each point
    pub score_pause_ms: u64,
    /// How long the victory banner stays up
    pub victory_pause_ms: u64,

    // === Players ===
    pub left_name: String,
    pub right_name: String,
    pub controls: InputMapper,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            win_score: WIN_SCORE,
            tick_rate: TICK_RATE,
            score_pause_ms: SCORE_PAUSE_MS,
            victory_pause_ms: VICTORY_PAUSE_MS,

            left_name: "left player".to_string(),
            right_name: "right player".to_string(),
            controls: InputMapper::default(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings the game can't be played with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.field_width == 0 || self.field_height == 0 {
            return Err(SettingsError::Invalid(format!(
                "field must have positive size, got {}x{}",
                self.field_width, self.field_height
            )));
        }
        if (self.field_height as f32) < PADDLE_HEIGHT {
            return Err(SettingsError::Invalid(format!(
                "field height {} is shorter than a paddle ({})",
                self.field_height, PADDLE_HEIGHT
            )));
        }
        // Both paddles, their margins and room for the ball between them
        let min_width = 2.0 * (PADDLE_MARGIN + PADDLE_WIDTH) + 2.0 * BALL_RADIUS;
        if (self.field_width as f32) <= min_width {
            return Err(SettingsError::Invalid(format!(
                "field width {} leaves no room between the paddles (need more than {})",
                self.field_width, min_width
            )));
        }
        if self.tick_rate == 0 {
            return Err(SettingsError::Invalid("tick rate must be positive".into()));
        }
        if self.win_score == 0 {
            return Err(SettingsError::Invalid("win score must be positive".into()));
        }

        let c = &self.controls;
        let keys = [c.left.up, c.left.down, c.right.up, c.right.down];
        for (i, key) in keys.iter().enumerate() {
            if keys[i + 1..].contains(key) {
                return Err(SettingsError::Invalid(format!(
                    "key {:?} is bound more than once",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Frames to hold the field still after a point
    pub fn score_pause_frames(&self) -> u32 {
        self.ms_to_frames(self.score_pause_ms)
    }

    /// Frames to show the victory banner
    pub fn victory_pause_frames(&self) -> u32 {
        self.ms_to_frames(self.victory_pause_ms)
    }

    /// Convert a duration to whole frames, rounding up. Saturates.
    fn ms_to_frames(&self, ms: u64) -> u32 {
        let frames = ms.saturating_mul(self.tick_rate as u64).div_ceil(1000);
        u32::try_from(frames).unwrap_or(u32::MAX)
    }
}
