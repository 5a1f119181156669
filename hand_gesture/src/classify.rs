//! Rule-based static gesture classifier.
//!
//! # Rules
//!
//! A finger is *raised* when its tip is above (smaller `y` than) its PIP
//! joint.  The thumb is *extended* when its tip is more than
//! [`THUMB_EXTENDED_DX`] away horizontally from the index knuckle.
//!
//! Rules are checked in order and the first match wins:
//!
//! 1. **Fist**: no finger raised, thumb tucked.
//! 2. **ThumbsUp**: no finger raised, thumb extended *and* pointing up
//!    (tip above the IP joint).  A sideways thumb falls through.
//! 3. **Victory**: index + middle raised, ring + pinky down.
//! 4. **ILoveYou**: index + pinky raised, middle + ring down, thumb out.
//! 5. **Idle**: everything else.

use crate::landmark::*;

/// Horizontal thumb-tip ↔ index-knuckle distance beyond which the thumb
/// counts as extended.
pub const THUMB_EXTENDED_DX: f32 = 0.12;

// ════════════════════════════════════════════════════════════════════════════
// GestureCategory
// ════════════════════════════════════════════════════════════════════════════

/// The closed set of recognised hand poses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GestureCategory {
    #[default]
    Idle,
    Fist,
    ThumbsUp,
    Victory,
    ILoveYou,
}

impl GestureCategory {
    pub const ALL: [GestureCategory; 5] = [
        GestureCategory::Idle,
        GestureCategory::Fist,
        GestureCategory::ThumbsUp,
        GestureCategory::Victory,
        GestureCategory::ILoveYou,
    ];

    /// Short machine-friendly name (logs, config).
    pub fn name(self) -> &'static str {
        match self {
            GestureCategory::Idle     => "idle",
            GestureCategory::Fist     => "fist",
            GestureCategory::ThumbsUp => "thumbs-up",
            GestureCategory::Victory  => "victory",
            GestureCategory::ILoveYou => "i-love-you",
        }
    }

    /// On-screen caption for the visual the gesture summons.
    pub fn label(self) -> &'static str {
        match self {
            GestureCategory::Idle     => "CELESTIAL DUST",
            GestureCategory::Fist     => "GRAVITY WELL",
            GestureCategory::ThumbsUp => "CELESTIAL SPHERE",
            GestureCategory::Victory  => "LOVE HEART",
            GestureCategory::ILoveYou => "I LOVE YOU",
        }
    }
}

impl std::fmt::Display for GestureCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Finger state
// ════════════════════════════════════════════════════════════════════════════

/// Raised/extended flags for one observation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FingerState {
    pub thumb:  bool,
    pub index:  bool,
    pub middle: bool,
    pub ring:   bool,
    pub pinky:  bool,
}

impl FingerState {
    pub fn of(lm: &[Landmark; LANDMARK_COUNT]) -> Self {
        let raised = |tip: usize, base: usize| lm[tip].y < lm[base].y;
        FingerState {
            thumb:  (lm[THUMB_TIP].x - lm[INDEX_MCP].x).abs() > THUMB_EXTENDED_DX,
            index:  raised(INDEX_TIP, INDEX_PIP),
            middle: raised(MIDDLE_TIP, MIDDLE_PIP),
            ring:   raised(RING_TIP, RING_PIP),
            pinky:  raised(PINKY_TIP, PINKY_PIP),
        }
    }

    fn all_fingers_down(&self) -> bool {
        !self.index && !self.middle && !self.ring && !self.pinky
    }
}

// ════════════════════════════════════════════════════════════════════════════
// classify
// ════════════════════════════════════════════════════════════════════════════

/// Classify one observation; no hand means [`GestureCategory::Idle`].
pub fn classify(observation: Option<&HandObservation>) -> GestureCategory {
    match observation {
        Some(obs) => classify_pose(obs.landmarks()),
        None => GestureCategory::Idle,
    }
}

/// Classify a raw landmark slice.  Fewer than 21 landmarks is `Idle`;
/// extra trailing landmarks are ignored.
pub fn classify_landmarks(landmarks: &[Landmark]) -> GestureCategory {
    match HandObservation::from_slice(landmarks) {
        Some(obs) => classify_pose(obs.landmarks()),
        None => GestureCategory::Idle,
    }
}

fn classify_pose(lm: &[Landmark; LANDMARK_COUNT]) -> GestureCategory {
    let f = FingerState::of(lm);

    if f.all_fingers_down() && !f.thumb {
        return GestureCategory::Fist;
    }
    if f.all_fingers_down() && f.thumb && lm[THUMB_TIP].y < lm[THUMB_IP].y {
        return GestureCategory::ThumbsUp;
    }
    if f.index && f.middle && !f.ring && !f.pinky {
        return GestureCategory::Victory;
    }
    if f.index && f.pinky && !f.middle && !f.ring && f.thumb {
        return GestureCategory::ILoveYou;
    }
    GestureCategory::Idle
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::synthetic;
    use proptest::prelude::*;

    #[test]
    fn absent_is_idle() {
        assert_eq!(classify(None), GestureCategory::Idle);
    }

    #[test]
    fn short_slices_are_idle() {
        for n in 0..LANDMARK_COUNT {
            let pts = vec![Landmark::default(); n];
            assert_eq!(classify_landmarks(&pts), GestureCategory::Idle);
        }
    }

    #[test]
    fn synthetic_poses_round_trip() {
        for g in GestureCategory::ALL {
            let obs = synthetic(g, 0.4, 0.6);
            assert_eq!(classify(Some(&obs)), g, "pose for {g}");
        }
    }

    #[test]
    fn victory_ignores_thumb() {
        let mut lm = *synthetic(GestureCategory::Victory, 0.5, 0.5).landmarks();
        lm[THUMB_TIP].x = lm[INDEX_MCP].x - 0.3;
        assert_eq!(classify_landmarks(&lm), GestureCategory::Victory);
    }

    #[test]
    fn sideways_thumb_falls_through_to_idle() {
        let mut lm = *synthetic(GestureCategory::ThumbsUp, 0.5, 0.5).landmarks();
        // Thumb still extended, but its tip drops below the IP joint.
        lm[THUMB_TIP].y = lm[THUMB_IP].y + 0.02;
        assert_eq!(classify_landmarks(&lm), GestureCategory::Idle);
    }

    #[test]
    fn rock_on_without_thumb_is_idle() {
        let mut lm = *synthetic(GestureCategory::ILoveYou, 0.5, 0.5).landmarks();
        lm[THUMB_TIP].x = lm[INDEX_MCP].x;
        assert_eq!(classify_landmarks(&lm), GestureCategory::Idle);
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels: Vec<_> = GestureCategory::ALL.iter().map(|g| g.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), GestureCategory::ALL.len());
    }

    fn arb_landmarks() -> impl Strategy<Value = Vec<Landmark>> {
        prop::collection::vec(
            (0.0f32..1.0, 0.0f32..1.0, -0.2f32..0.2).prop_map(|(x, y, z)| Landmark::new(x, y, z)),
            LANDMARK_COUNT,
        )
    }

    proptest! {
        #[test]
        fn curled_hand_with_tucked_thumb_is_fist(
            mut lm in arb_landmarks(),
            drops in prop::array::uniform4(0.0f32..0.3),
            thumb_dx in -0.11f32..0.11,
        ) {
            let pairs = [(INDEX_TIP, INDEX_PIP), (MIDDLE_TIP, MIDDLE_PIP),
                         (RING_TIP, RING_PIP), (PINKY_TIP, PINKY_PIP)];
            for ((tip, base), drop) in pairs.into_iter().zip(drops) {
                lm[tip].y = lm[base].y + drop;
            }
            lm[THUMB_TIP].x = lm[INDEX_MCP].x + thumb_dx;
            prop_assert_eq!(classify_landmarks(&lm), GestureCategory::Fist);
        }

        #[test]
        fn classify_is_deterministic(lm in arb_landmarks()) {
            prop_assert_eq!(classify_landmarks(&lm), classify_landmarks(&lm));
        }

        #[test]
        fn truncated_input_is_idle(lm in arb_landmarks(), keep in 0usize..LANDMARK_COUNT) {
            prop_assert_eq!(classify_landmarks(&lm[..keep]), GestureCategory::Idle);
        }
    }
}
