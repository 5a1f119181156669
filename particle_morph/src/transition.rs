//! Time-driven progress ramp.
//!
//! A [`Transition`] is a plain record; its progress is a pure function of
//! the clock, so there is no animation scheduler to tick or cancel.  A new
//! transition simply replaces the old record.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Easing
// ════════════════════════════════════════════════════════════════════════════

/// Easing curve applied to normalised time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    /// Exponential ease-out: fast start, rate of change decays
    /// exponentially toward the end.
    #[default]
    ExpoOut,
}

impl Easing {
    /// Map `t ∈ [0, 1]` to eased progress in `[0, 1]`.  Input outside the
    /// unit interval is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::ExpoOut => {
                if t >= 1.0 { 1.0 } else { 1.0 - 2f32.powf(-10.0 * t) }
            }
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Transition
// ════════════════════════════════════════════════════════════════════════════

/// One in-flight ramp of morph progress from 0 to 1.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Clock reading (seconds) at which the ramp started.  Kept in f64 so a
    /// long-running session still resolves frame-sized steps.
    pub start:    f64,
    /// Length of the ramp in seconds.
    pub duration: f32,
    pub easing:   Easing,
}

impl Transition {
    pub fn new(start: f64, duration: f32, easing: Easing) -> Self {
        Transition { start, duration, easing }
    }

    /// Eased progress at clock reading `now`.  Zero or negative durations
    /// complete immediately.
    pub fn progress_at(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        self.easing.apply(self.elapsed(now) / self.duration)
    }

    pub fn is_complete(&self, now: f64) -> bool {
        self.elapsed(now) >= self.duration
    }

    /// Seconds since the start.  The subtraction happens in f64; only the
    /// small difference is narrowed.
    fn elapsed(&self, now: f64) -> f32 {
        (now - self.start) as f32
    }
}
