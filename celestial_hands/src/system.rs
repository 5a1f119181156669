//! `ParticleSystem`, the facade the render loop talks to.
//!
//! Owns the [`MorphEngine`] plus the per-particle colour and size arrays
//! (assigned once, never re-randomised), classifies incoming observations
//! and keeps the displayed position buffer current.

use glam::{Vec2, Vec3};
use hand_gesture::{classify, GestureCategory};
use log::{error, info};
use particle_morph::{MorphConfig, MorphEngine, MorphResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::provider::ProviderEvent;

/// Purple, spring green, dark turquoise.
pub const PALETTE: [u32; 3] = [0x8A2BE2, 0x00FF7F, 0x00CED1];

pub const MIN_SIZE: f32 = 1.0;
pub const MAX_SIZE: f32 = 3.0;

/// `0xRRGGBB` → linear components in `[0, 1]`.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    )
}

pub struct ParticleSystem {
    engine:    MorphEngine,
    positions: Vec<Vec3>,
    colors:    Vec<Vec3>,
    sizes:     Vec<f32>,
    /// Last known palm position, kept while no hand is visible.
    hand:      Vec2,
    notice:    Option<String>,
}

impl ParticleSystem {
    pub fn new(config: &MorphConfig) -> MorphResult<Self> {
        let engine = MorphEngine::new(config.clone())?;
        let n = engine.particle_count();

        // Styling uses its own stream so it does not shift the shapes.
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };
        let colors = (0..n).map(|_| rgb(PALETTE[rng.gen_range(0..PALETTE.len())])).collect();
        let sizes = (0..n).map(|_| rng.gen_range(MIN_SIZE..MAX_SIZE)).collect();

        let mut positions = Vec::with_capacity(n);
        engine.evaluate(0.0, &mut positions);

        info!("particle system: {n} particles");
        Ok(ParticleSystem {
            engine,
            positions,
            colors,
            sizes,
            hand: Vec2::new(0.5, 0.5),
            notice: None,
        })
    }

    /// Feed one provider event at clock reading `now`.  Returns `true` when a
    /// new transition started.
    pub fn on_event(&mut self, event: ProviderEvent, now: f64) -> MorphResult<bool> {
        match event {
            ProviderEvent::Hand(obs) => {
                let palm = obs.palm();
                self.hand = Vec2::new(palm.x, palm.y);
                self.engine.update(classify(Some(&obs)), self.hand, now)
            }
            ProviderEvent::NoHand => self.engine.update(GestureCategory::Idle, self.hand, now),
            ProviderEvent::Failed(msg) => {
                error!("hand tracking unavailable: {msg}");
                self.notice = Some(format!("HAND TRACKING UNAVAILABLE: {msg}"));
                self.engine.update(GestureCategory::Idle, self.hand, now)
            }
        }
    }

    /// Advance the morph and refresh the displayed positions.
    pub fn tick(&mut self, now: f64) {
        self.engine.advance(now);
        self.engine.evaluate(now, &mut self.positions);
    }

    // ── Accessors for the renderer ────────────────────────────────────────

    /// `3N` floats, xyz per particle.
    pub fn positions(&self) -> &[f32] { bytemuck::cast_slice(&self.positions) }
    /// `3N` floats, rgb per particle.
    pub fn colors(&self) -> &[f32] { bytemuck::cast_slice(&self.colors) }
    pub fn sizes(&self) -> &[f32] { &self.sizes }

    pub fn points(&self) -> &[Vec3] { &self.positions }
    pub fn point_colors(&self) -> &[Vec3] { &self.colors }

    pub fn len(&self) -> usize { self.positions.len() }
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }
    pub fn progress(&self) -> f32 { self.engine.progress() }
    pub fn gesture(&self) -> GestureCategory { self.engine.active_gesture() }
    pub fn hand(&self) -> Vec2 { self.hand }
    pub fn notice(&self) -> Option<&str> { self.notice.as_deref() }
    pub fn engine(&self) -> &MorphEngine { &self.engine }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::parse_frame;
    use hand_gesture::pose;
    use particle_shapes::ShapeKind;

    fn system(n: usize) -> ParticleSystem {
        ParticleSystem::new(&MorphConfig { particle_count: n, seed: Some(5), ..MorphConfig::default() }).unwrap()
    }

    fn hand(g: GestureCategory, x: f32, y: f32) -> ProviderEvent {
        ProviderEvent::Hand(pose::synthetic(g, x, y))
    }

    #[test]
    fn buffers_have_renderer_shapes() {
        let s = system(120);
        assert_eq!(s.positions().len(), 360);
        assert_eq!(s.colors().len(), 360);
        assert_eq!(s.sizes().len(), 120);
        assert_eq!(s.gesture(), GestureCategory::Idle);
        assert_eq!(s.progress(), 0.0);
        assert!(s.notice().is_none());
    }

    #[test]
    fn styling_comes_from_the_palette() {
        let s = system(300);
        let palette: Vec<Vec3> = PALETTE.iter().map(|&h| rgb(h)).collect();
        assert!(s.point_colors().iter().all(|c| palette.contains(c)));
        assert!(s.sizes().iter().all(|&z| (MIN_SIZE..MAX_SIZE).contains(&z)));
        assert_eq!(rgb(0x8A2BE2), Vec3::new(138.0 / 255.0, 43.0 / 255.0, 226.0 / 255.0));
    }

    #[test]
    fn flat_positions_match_points() {
        let s = system(4);
        let flat = s.positions();
        for (i, p) in s.points().iter().enumerate() {
            assert_eq!(&flat[i * 3..i * 3 + 3], &[p.x, p.y, p.z]);
        }
    }

    #[test]
    fn victory_hand_morphs_to_heart() {
        let mut s = system(200);
        assert!(s.on_event(hand(GestureCategory::Victory, 0.4, 0.4), 0.0).unwrap());
        assert_eq!(s.gesture(), GestureCategory::Victory);
        assert_eq!(Some(s.engine().state().target()), s.engine().library().shape(ShapeKind::Heart));

        s.tick(0.6);
        assert!(s.progress() > 0.9 && s.progress() < 1.0);
        s.tick(5.0);
        assert_eq!(s.progress(), 1.0);
    }

    #[test]
    fn losing_the_hand_returns_to_idle_and_keeps_position() {
        let mut s = system(50);
        s.on_event(hand(GestureCategory::Fist, 0.2, 0.3), 0.0).unwrap();
        assert_eq!(s.gesture(), GestureCategory::Fist);

        assert!(s.on_event(ProviderEvent::NoHand, 0.1).unwrap());
        assert_eq!(s.gesture(), GestureCategory::Idle);
        assert_eq!(s.hand(), Vec2::new(0.2, 0.3));
        assert!(!s.on_event(ProviderEvent::NoHand, 0.2).unwrap());
    }

    #[test]
    fn partial_frame_drops_back_to_idle() {
        let mut s = system(50);
        s.on_event(hand(GestureCategory::Victory, 0.5, 0.5), 0.0).unwrap();
        assert_eq!(s.gesture(), GestureCategory::Victory);

        let line = format!("[{}]", vec!["[0.5,0.5,0]"; 5].join(","));
        let event = match parse_frame(&line).unwrap() {
            Some(obs) => ProviderEvent::Hand(obs),
            None => ProviderEvent::NoHand,
        };
        assert!(s.on_event(event, 0.1).unwrap());
        assert_eq!(s.gesture(), GestureCategory::Idle);
    }

    #[test]
    fn provider_failure_sets_notice_and_forces_idle() {
        let mut s = system(50);
        s.on_event(hand(GestureCategory::ThumbsUp, 0.5, 0.5), 0.0).unwrap();
        s.on_event(ProviderEvent::Failed("camera unplugged".into()), 0.5).unwrap();
        assert_eq!(s.gesture(), GestureCategory::Idle);
        assert!(s.notice().unwrap().contains("camera unplugged"));

        s.tick(1.0);
        assert_eq!(s.len(), 50);
    }
}
