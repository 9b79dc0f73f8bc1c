//! Falafel King - A falafel-assembly arcade game
//!
//! Core modules:
//! - `sim`: Round simulation (orders, validation, timers, round controller)
//! - `scenes`: Screen lifecycle (menu, game, game over)
//! - `hud`: Presentation helpers derived from simulation output
//! - `settings`: Data-driven game tuning

pub mod hud;
pub mod scenes;
pub mod settings;
pub mod sim;

pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Frame-rate basis for tick deltas (delta 1.0 == one frame at 60 FPS)
    pub const FRAME_RATE: f32 = 60.0;

    /// Round length in seconds
    pub const ROUND_SECONDS: f32 = 150.0;
    /// Customers queued per round
    pub const CUSTOMERS_PER_ROUND: usize = 5;

    /// Starting (and maximum) customer patience
    pub const MAX_PATIENCE: f32 = 100.0;
    /// Patience lost per frame unit
    pub const PATIENCE_DECAY_PER_FRAME: f32 = 0.15;

    /// Score applied when a customer walks out
    pub const TIMEOUT_PENALTY: i32 = -20;
    /// Pause between resolving one customer and presenting the next
    pub const POST_SERVE_DELAY_SECS: f32 = 1.5;

    /// Validation scoring
    pub const PERFECT_SCORE: i32 = 100;
    pub const GOOD_ACCURACY: f64 = 0.8;
    pub const GOOD_SCORE_SCALE: f64 = 80.0;
    pub const PARTIAL_ACCURACY: f64 = 0.5;
    pub const PARTIAL_SCORE_SCALE: f64 = 40.0;
}

/// Convert a frame-unit delta into seconds
#[inline]
pub fn frames_to_secs(dt_frames: f32, frame_rate: f32) -> f32 {
    if frame_rate <= 0.0 {
        return 0.0;
    }
    dt_frames / frame_rate
}
