//! Gesture → shape table and the precomputed static shapes.

use glam::{Vec2, Vec3};
use hand_gesture::GestureCategory;
use particle_shapes::{ShapeKind, ShapeParams};
use rand::Rng;

/// Scene-space span covered by the normalised camera frame.
const SCENE_SPAN_X: f32 = 30.0;
const SCENE_SPAN_Y: f32 = 20.0;

/// Which shape each gesture summons.
pub fn shape_for(gesture: GestureCategory) -> ShapeKind {
    match gesture {
        GestureCategory::Idle     => ShapeKind::Noise,
        GestureCategory::Fist     => ShapeKind::Fist,
        GestureCategory::ThumbsUp => ShapeKind::Sphere,
        GestureCategory::Victory  => ShapeKind::Heart,
        GestureCategory::ILoveYou => ShapeKind::Text,
    }
}

/// Map a normalised hand position (camera frame, y down) into scene space.
/// x is mirrored so the cloud follows the hand like a mirror image.
pub fn hand_to_scene(hand: Vec2) -> Vec3 {
    Vec3::new(
        (hand.x - 0.5) * -SCENE_SPAN_X,
        (0.5 - hand.y) * SCENE_SPAN_Y,
        0.0,
    )
}

// ════════════════════════════════════════════════════════════════════════════
// ShapeLibrary
// ════════════════════════════════════════════════════════════════════════════

/// One precomputed buffer per static shape, all of the same length.
///
/// The fist has no entry: its target depends on the hand and is
/// regenerated around it on every update.
#[derive(Clone, Debug)]
pub struct ShapeLibrary {
    noise:  Vec<Vec3>,
    sphere: Vec<Vec3>,
    heart:  Vec<Vec3>,
    text:   Vec<Vec3>,
}

impl ShapeLibrary {
    pub fn build<R: Rng + ?Sized>(params: &ShapeParams, count: usize, rng: &mut R) -> Self {
        ShapeLibrary {
            noise:  params.generate(ShapeKind::Noise, count, rng),
            sphere: params.generate(ShapeKind::Sphere, count, rng),
            heart:  params.generate(ShapeKind::Heart, count, rng),
            text:   params.generate(ShapeKind::Text, count, rng),
        }
    }

    /// The precomputed buffer for `kind`; `None` for the fist.
    pub fn shape(&self, kind: ShapeKind) -> Option<&[Vec3]> {
        match kind {
            ShapeKind::Noise  => Some(&self.noise),
            ShapeKind::Sphere => Some(&self.sphere),
            ShapeKind::Heart  => Some(&self.heart),
            ShapeKind::Fist   => None,
            ShapeKind::Text   => Some(&self.text),
        }
    }

    pub fn for_gesture(&self, gesture: GestureCategory) -> Option<&[Vec3]> {
        self.shape(shape_for(gesture))
    }

    /// The idle cloud every engine starts on.
    pub fn noise(&self) -> &[Vec3] { &self.noise }

    pub fn len(&self) -> usize { self.noise.len() }
    pub fn is_empty(&self) -> bool { self.noise.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn centre_of_frame_maps_to_origin() {
        assert_eq!(hand_to_scene(Vec2::new(0.5, 0.5)), Vec3::ZERO);
    }

    #[test]
    fn top_left_maps_to_mirrored_corner() {
        assert_eq!(hand_to_scene(Vec2::new(0.0, 0.0)), Vec3::new(15.0, 10.0, 0.0));
        assert_eq!(hand_to_scene(Vec2::new(1.0, 1.0)), Vec3::new(-15.0, -10.0, 0.0));
    }

    #[test]
    fn every_gesture_has_a_distinct_shape() {
        let mut kinds: Vec<_> = GestureCategory::ALL.iter().map(|&g| shape_for(g).name()).collect();
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), 5);
    }

    #[test]
    fn library_buffers_share_length() {
        let lib = ShapeLibrary::build(&ShapeParams::default(), 300, &mut StdRng::seed_from_u64(3));
        for kind in ShapeKind::ALL.into_iter().filter(|&k| k != ShapeKind::Fist) {
            assert_eq!(lib.shape(kind).map(<[Vec3]>::len), Some(300));
        }
        assert_eq!(lib.for_gesture(GestureCategory::ThumbsUp), lib.shape(ShapeKind::Sphere));
        assert_eq!(lib.noise(), lib.for_gesture(GestureCategory::Idle).unwrap());
    }

    #[test]
    fn fist_is_never_precomputed() {
        let lib = ShapeLibrary::build(&ShapeParams::default(), 50, &mut StdRng::seed_from_u64(3));
        assert!(lib.shape(ShapeKind::Fist).is_none());
        assert!(lib.for_gesture(GestureCategory::Fist).is_none());
    }
}
