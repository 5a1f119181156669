//! `MorphEngine`: owns the morph state and decides when to retarget.

use glam::{Vec2, Vec3};
use hand_gesture::GestureCategory;
use log::{debug, info};
use particle_shapes::{fist, ShapeParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{MorphError, MorphResult};
use crate::library::{hand_to_scene, ShapeLibrary};
use crate::state::MorphState;
use crate::transition::{Easing, Transition};

pub const DEFAULT_PARTICLE_COUNT: usize = 30_000;
pub const DEFAULT_TRANSITION_SECS: f32 = 1.2;

// ════════════════════════════════════════════════════════════════════════════
// MorphConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    pub particle_count:  usize,
    /// Length of each morph in seconds.
    pub transition_secs: f32,
    pub easing:          Easing,
    /// Seed for every random shape; `None` draws one from the OS.
    pub seed:            Option<u64>,
    pub shapes:          ShapeParams,
}

impl Default for MorphConfig {
    fn default() -> Self {
        MorphConfig {
            particle_count:  DEFAULT_PARTICLE_COUNT,
            transition_secs: DEFAULT_TRANSITION_SECS,
            easing:          Easing::ExpoOut,
            seed:            None,
            shapes:          ShapeParams::default(),
        }
    }
}

impl MorphConfig {
    pub fn validate(&self) -> MorphResult<()> {
        if self.particle_count == 0 {
            return Err(MorphError::InvalidConfig("particle_count must be at least 1".into()));
        }
        if !self.transition_secs.is_finite() || self.transition_secs < 0.0 {
            return Err(MorphError::InvalidConfig(format!(
                "transition_secs must be a non-negative number, got {}",
                self.transition_secs
            )));
        }
        let s = &self.shapes;
        for (name, v) in [
            ("noise_extent", s.noise_extent),
            ("sphere_radius", s.sphere_radius),
            ("heart_scale", s.heart_scale),
            ("fist_extent", s.fist_extent),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(MorphError::InvalidConfig(format!("shapes.{name} must be non-negative, got {v}")));
            }
        }
        Ok(())
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MorphEngine
// ════════════════════════════════════════════════════════════════════════════

/// Drives a [`MorphState`] from (gesture, hand position) updates.
pub struct MorphEngine {
    state:   MorphState,
    library: ShapeLibrary,
    config:  MorphConfig,
    rng:     StdRng,
}

impl MorphEngine {
    /// Precompute every static shape and settle on the idle noise cloud.
    pub fn new(config: MorphConfig) -> MorphResult<Self> {
        config.validate()?;
        let mut rng = config.rng();
        let library = ShapeLibrary::build(&config.shapes, config.particle_count, &mut rng);
        info!(
            "morph engine ready: {} particles, {:.2}s {:?} transitions",
            config.particle_count, config.transition_secs, config.easing
        );
        let state = MorphState::new(library.noise().to_vec());
        Ok(MorphEngine { state, library, config, rng })
    }

    pub fn state(&self) -> &MorphState { &self.state }
    pub fn library(&self) -> &ShapeLibrary { &self.library }
    pub fn config(&self) -> &MorphConfig { &self.config }
    pub fn progress(&self) -> f32 { self.state.progress() }
    pub fn active_gesture(&self) -> GestureCategory { self.state.active_gesture() }
    pub fn particle_count(&self) -> usize { self.state.len() }

    /// A new transition starts on every gesture change, and on every update
    /// while the fist is held (its target follows the hand).
    pub fn should_retarget(&self, gesture: GestureCategory) -> bool {
        gesture != self.state.active_gesture() || gesture == GestureCategory::Fist
    }

    /// Feed one classified observation.  `hand` is the normalised palm
    /// position; it only matters for `Fist`.  Returns `true` when a new
    /// transition started.
    pub fn update(&mut self, gesture: GestureCategory, hand: Vec2, now: f64) -> MorphResult<bool> {
        if !self.should_retarget(gesture) {
            return Ok(false);
        }

        let points = match self.library.for_gesture(gesture) {
            Some(shape) => shape.to_vec(),
            None => {
                let center = hand_to_scene(hand);
                fist(self.config.particle_count, center, self.config.shapes.fist_extent, &mut self.rng)
            }
        };
        let target = self.state.check_target(points)?;

        let previous = std::mem::replace(&mut self.state, MorphState::empty());
        debug!(
            "retarget {} -> {} at t={:.3}s (frozen at progress {:.3})",
            previous.active_gesture(),
            gesture,
            now,
            previous.progress()
        );
        let ramp = Transition::new(now, self.config.transition_secs, self.config.easing);
        self.state = previous.retarget(gesture, target, ramp);
        Ok(true)
    }

    /// Advance the progress ramp to clock reading `now`.
    pub fn advance(&mut self, now: f64) -> f32 {
        self.state.advance(now)
    }

    /// Displayed positions at `now` (blend + drift).
    pub fn evaluate(&self, now: f64, out: &mut Vec<Vec3>) {
        self.state.evaluate(now, out);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;
    use hand_gesture::{classify, pose};
    use particle_shapes::ShapeKind;

    const CENTRE: Vec2 = Vec2::new(0.5, 0.5);

    fn engine(n: usize) -> MorphEngine {
        MorphEngine::new(MorphConfig { particle_count: n, seed: Some(11), ..MorphConfig::default() }).unwrap()
    }

    fn centroid(points: &[Vec3]) -> Vec3 {
        points.iter().copied().sum::<Vec3>() / points.len() as f32
    }

    #[test]
    fn starts_on_idle_noise() {
        let e = engine(200);
        assert_eq!(e.active_gesture(), GestureCategory::Idle);
        assert_eq!(e.progress(), 0.0);
        assert_eq!(e.state().phase(), Phase::Settled);
        assert_eq!(Some(e.state().target()), e.library().shape(ShapeKind::Noise));
    }

    #[test]
    fn victory_pose_summons_heart() {
        let mut e = engine(200);
        let obs = pose::synthetic(GestureCategory::Victory, 0.5, 0.5);
        let g = classify(Some(&obs));
        assert_eq!(g, GestureCategory::Victory);

        assert!(e.update(g, CENTRE, 0.0).unwrap());
        assert_eq!(Some(e.state().target()), e.library().shape(ShapeKind::Heart));
        assert_eq!(e.progress(), 0.0);
        assert_eq!(e.active_gesture(), GestureCategory::Victory);
    }

    #[test]
    fn repeated_static_gesture_does_not_retrigger() {
        let mut e = engine(50);
        assert!(e.update(GestureCategory::ThumbsUp, CENTRE, 0.0).unwrap());
        e.advance(0.5);
        let p = e.progress();
        assert!(!e.update(GestureCategory::ThumbsUp, CENTRE, 0.5).unwrap());
        assert_eq!(e.progress(), p);
    }

    #[test]
    fn held_fist_follows_the_hand() {
        let mut e = engine(2_000);
        assert!(e.update(GestureCategory::Fist, CENTRE, 0.0).unwrap());
        assert!(centroid(e.state().target()).distance(Vec3::ZERO) < 0.05);

        e.advance(0.3);
        assert!(e.update(GestureCategory::Fist, Vec2::new(0.0, 0.0), 0.3).unwrap());
        assert_eq!(e.progress(), 0.0);
        assert!(centroid(e.state().target()).distance(Vec3::new(15.0, 10.0, 0.0)) < 0.05);
    }

    #[test]
    fn ramp_completes_after_duration() {
        let mut e = engine(10);
        e.update(GestureCategory::ILoveYou, CENTRE, 1.0).unwrap();
        assert!(e.advance(1.6) < 1.0);
        assert_eq!(e.advance(2.5), 1.0);
        assert_eq!(e.state().phase(), Phase::Settled);

        let mut out = Vec::new();
        e.evaluate(2.5, &mut out);
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn particle_count_survives_every_retarget() {
        let mut e = engine(40);
        let mut now = 0.0;
        for g in [GestureCategory::Fist, GestureCategory::Victory, GestureCategory::Fist, GestureCategory::Idle] {
            now += 0.25;
            e.advance(now);
            e.update(g, CENTRE, now).unwrap();
            assert_eq!(e.particle_count(), 40);
            assert_eq!(e.state().base().len(), 40);
        }
    }

    #[test]
    fn rejects_bad_config() {
        let zero = MorphConfig { particle_count: 0, ..MorphConfig::default() };
        assert!(matches!(MorphEngine::new(zero), Err(MorphError::InvalidConfig(_))));
        let nan = MorphConfig { transition_secs: f32::NAN, ..MorphConfig::default() };
        assert!(nan.validate().is_err());
        let neg = MorphConfig { shapes: ShapeParams { sphere_radius: -1.0, ..ShapeParams::default() }, ..MorphConfig::default() };
        assert!(neg.validate().is_err());
    }

    #[test]
    fn seeded_engines_agree() {
        let a = engine(64);
        let b = engine(64);
        assert_eq!(a.state().target(), b.state().target());
    }
}
