//! Game tuning
//!
//! Round length, queue size, patience and scoring knobs. Defaults mirror
//! `crate::consts`; a JSON document can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable round parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Round length in seconds
    pub round_seconds: f32,
    /// Number of customers queued at round start
    pub customers_per_round: usize,

    // === Patience ===
    /// Starting patience for every customer
    pub max_patience: f32,
    /// Patience lost per frame unit
    pub patience_decay_per_frame: f32,

    // === Scoring ===
    /// Score delta when a customer runs out of patience (negative)
    pub timeout_penalty: i32,

    // === Pacing ===
    /// Seconds between resolving a customer and presenting the next
    pub post_serve_delay_secs: f32,
    /// Frame-rate basis used to convert tick deltas to seconds
    pub frame_rate: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_seconds: ROUND_SECONDS,
            customers_per_round: CUSTOMERS_PER_ROUND,

            max_patience: MAX_PATIENCE,
            patience_decay_per_frame: PATIENCE_DECAY_PER_FRAME,

            timeout_penalty: TIMEOUT_PENALTY,

            post_serve_delay_secs: POST_SERVE_DELAY_SECS,
            frame_rate: FRAME_RATE,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Parse a config from JSON, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded game config");
                config
            }
            Err(e) => {
                log::warn!("Invalid game config ({}), using defaults", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Clamp values that would break the round invariants
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.round_seconds > 0.0) {
            log::warn!("round_seconds must be positive, using {}", defaults.round_seconds);
            self.round_seconds = defaults.round_seconds;
        }
        if !(self.max_patience > 0.0) {
            log::warn!("max_patience must be positive, using {}", defaults.max_patience);
            self.max_patience = defaults.max_patience;
        }
        if !(self.frame_rate > 0.0) {
            log::warn!("frame_rate must be positive, using {}", defaults.frame_rate);
            self.frame_rate = defaults.frame_rate;
        }
        self.patience_decay_per_frame = self.patience_decay_per_frame.max(0.0);
        self.post_serve_delay_secs = self.post_serve_delay_secs.max(0.0);
        // A walk-out never rewards the player
        self.timeout_penalty = self.timeout_penalty.min(0);
        self
    }
}
