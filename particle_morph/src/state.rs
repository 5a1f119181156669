//! The morph state machine.
//!
//! ```text
//!            retarget()                      advance() reaches 1.0
//!  Settled ─────────────▶ Transitioning ────────────────────────▶ Settled
//!     ▲                      │      ▲
//!     └──────────────────────┘      └── retarget() mid-flight: base is
//!          (initial state)              frozen at the displayed position
//! ```
//!
//! Displayed position of particle `i` is `lerp(base[i], target[i], progress)`
//! plus a small decorative drift ([`oscillate`]).

use std::f64::consts::TAU;

use glam::Vec3;
use hand_gesture::GestureCategory;

use crate::error::{MorphError, MorphResult};
use crate::transition::Transition;

const DRIFT_SPEED: f64 = 0.5;
const DRIFT_AMPLITUDE: f32 = 0.05;

/// Coarse lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Settled,
    Transitioning,
}

/// A destination buffer whose length has been checked against a
/// [`MorphState`]'s particle count.
#[derive(Clone, Debug)]
pub struct CheckedTarget(Vec<Vec3>);

impl CheckedTarget {
    pub fn points(&self) -> &[Vec3] { &self.0 }
}

// ════════════════════════════════════════════════════════════════════════════
// MorphState
// ════════════════════════════════════════════════════════════════════════════

/// Base/target buffers plus the progress blending them.
///
/// `base.len() == target.len()` always holds: the only way to replace the
/// target is [`MorphState::retarget`] with a [`CheckedTarget`].  There is
/// no public way to build one without a shape:
///
/// ```compile_fail
/// let state: particle_morph::MorphState = Default::default();
/// ```
#[derive(Clone, Debug)]
pub struct MorphState {
    base:           Vec<Vec3>,
    target:         Vec<Vec3>,
    progress:       f32,
    active_gesture: GestureCategory,
    transition:     Option<Transition>,
}

impl MorphState {
    /// A settled state resting on `shape`, with `Idle` active.
    pub fn new(shape: Vec<Vec3>) -> Self {
        MorphState {
            base:           shape.clone(),
            target:         shape,
            progress:       0.0,
            active_gesture: GestureCategory::Idle,
            transition:     None,
        }
    }

    /// Zero-particle placeholder, used while the engine moves its state
    /// through [`retarget`](Self::retarget).
    pub(crate) fn empty() -> Self {
        MorphState::new(Vec::new())
    }

    pub fn len(&self) -> usize { self.target.len() }
    pub fn is_empty(&self) -> bool { self.target.is_empty() }
    pub fn base(&self) -> &[Vec3] { &self.base }
    pub fn target(&self) -> &[Vec3] { &self.target }
    pub fn progress(&self) -> f32 { self.progress }
    pub fn active_gesture(&self) -> GestureCategory { self.active_gesture }
    pub fn transition(&self) -> Option<&Transition> { self.transition.as_ref() }

    pub fn phase(&self) -> Phase {
        match self.transition {
            Some(_) if self.progress < 1.0 => Phase::Transitioning,
            _ => Phase::Settled,
        }
    }

    /// Validate `points` as a replacement target for this state.
    pub fn check_target(&self, points: Vec<Vec3>) -> MorphResult<CheckedTarget> {
        if points.len() != self.len() {
            return Err(MorphError::LengthMismatch { expected: self.len(), actual: points.len() });
        }
        Ok(CheckedTarget(points))
    }

    /// Start a new transition toward `target`.
    ///
    /// The base buffer is first frozen at the currently displayed blend
    /// (using the progress from the last [`advance`](Self::advance)), so an
    /// interrupted transition continues from where the particles actually
    /// are.  Progress restarts at 0 and `transition` supersedes any ramp
    /// still in flight.
    pub fn retarget(mut self, gesture: GestureCategory, target: CheckedTarget, transition: Transition) -> Self {
        let p = self.progress;
        for (b, t) in self.base.iter_mut().zip(&self.target) {
            *b = b.lerp(*t, p);
        }
        MorphState {
            base:           self.base,
            target:         target.0,
            progress:       0.0,
            active_gesture: gesture,
            transition:     Some(transition),
        }
    }

    /// Move progress along the active ramp to clock reading `now`.
    /// Progress never decreases, even if the clock does.
    pub fn advance(&mut self, now: f64) -> f32 {
        if let Some(tr) = &self.transition {
            let p = tr.progress_at(now);
            if p > self.progress {
                self.progress = p;
            }
        }
        self.progress
    }

    /// Blended position of particle `i`, without drift.
    pub fn blended(&self, i: usize) -> Vec3 {
        self.base[i].lerp(self.target[i], self.progress)
    }

    /// Write every displayed position (blend + drift at `now`) into `out`.
    pub fn evaluate(&self, now: f64, out: &mut Vec<Vec3>) {
        out.clear();
        out.extend(
            self.base
                .iter()
                .zip(&self.target)
                .map(|(b, t)| oscillate(b.lerp(*t, self.progress), now)),
        );
    }
}

/// Decorative drift: x sways with y and time, then y sways with the
/// already-shifted x.
pub fn oscillate(p: Vec3, now: f64) -> Vec3 {
    let phase = ((now * DRIFT_SPEED) % TAU) as f32;
    let mut q = p;
    q.x += (phase + q.y).sin() * DRIFT_AMPLITUDE;
    q.y += (phase + q.x).cos() * DRIFT_AMPLITUDE;
    q
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
