//! Countdown timers
//!
//! Both timers take deltas in frame units (1.0 == one frame at the
//! configured frame rate), matching what the browser render loop hands us.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Remaining time below this is treated as zero (float accumulation residue)
const EXPIRY_EPSILON_SECS: f64 = 1e-4;

/// Per-customer patience meter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatienceTimer {
    patience: f32,
    max_patience: f32,
    decay_per_frame: f32,
}

impl PatienceTimer {
    pub fn new(max_patience: f32, decay_per_frame: f32) -> Self {
        let max_patience = max_patience.max(0.0);
        Self {
            patience: max_patience,
            max_patience,
            decay_per_frame: decay_per_frame.max(0.0),
        }
    }

    /// Drain patience; never drops below zero
    pub fn tick(&mut self, dt_frames: f32) {
        if dt_frames <= 0.0 {
            return;
        }
        self.patience = (self.patience - dt_frames * self.decay_per_frame).max(0.0);
    }

    pub fn is_expired(&self) -> bool {
        self.patience <= 0.0
    }

    pub fn patience(&self) -> f32 {
        self.patience
    }

    pub fn max_patience(&self) -> f32 {
        self.max_patience
    }

    /// Patience as a percentage of the maximum (0-100)
    pub fn percent_remaining(&self) -> f32 {
        if self.max_patience <= 0.0 {
            return 0.0;
        }
        self.patience / self.max_patience * 100.0
    }
}

/// Round countdown with a one-shot expiry callback
pub struct RoundTimer {
    max_time: f32,
    frame_rate: f32,
    /// Elapsed seconds, accumulated in f64 to keep long rounds exact
    elapsed: f64,
    fired: bool,
    on_expire: Option<Box<dyn FnMut()>>,
}

impl fmt::Debug for RoundTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundTimer")
            .field("max_time", &self.max_time)
            .field("time_left", &self.time_left())
            .field("fired", &self.fired)
            .field("has_callback", &self.on_expire.is_some())
            .finish()
    }
}

impl RoundTimer {
    pub fn new(max_time: f32, frame_rate: f32) -> Self {
        Self {
            max_time: max_time.max(0.0),
            frame_rate,
            elapsed: 0.0,
            fired: false,
            on_expire: None,
        }
    }

    /// Register the expiry observer (replaces any previous one)
    pub fn on_expire(&mut self, callback: impl FnMut() + 'static) {
        self.on_expire = Some(Box::new(callback));
    }

    /// Advance the countdown. Returns true only on the tick that expires it.
    pub fn tick(&mut self, dt_frames: f32) -> bool {
        if self.fired || dt_frames <= 0.0 {
            return false;
        }
        if self.frame_rate > 0.0 {
            self.elapsed += f64::from(dt_frames) / f64::from(self.frame_rate);
        }
        if self.remaining() > 0.0 {
            return false;
        }

        self.elapsed = f64::from(self.max_time);
        self.fired = true;
        if let Some(callback) = self.on_expire.as_mut() {
            callback();
        }
        true
    }

    fn remaining(&self) -> f64 {
        let left = f64::from(self.max_time) - self.elapsed;
        if left <= EXPIRY_EPSILON_SECS { 0.0 } else { left }
    }

    /// Seconds remaining, never negative
    pub fn time_left(&self) -> f32 {
        self.remaining() as f32
    }

    pub fn max_time(&self) -> f32 {
        self.max_time
    }

    pub fn is_expired(&self) -> bool {
        self.remaining() <= 0.0
    }

    /// Restore full time and re-arm the callback
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
        self.fired = false;
    }
}
