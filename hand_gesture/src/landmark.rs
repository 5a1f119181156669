//! Hand landmark model (21 points, MediaPipe index scheme).

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Landmark indices
// ════════════════════════════════════════════════════════════════════════════

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of landmarks in one hand observation.
pub const LANDMARK_COUNT: usize = 21;

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// One tracked joint.  `x`/`y` are normalised to the camera frame
/// (`0..1`, origin top-left, y grows downward); `z` is unitless relative
/// depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Landmark { x, y, z }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HandObservation
// ════════════════════════════════════════════════════════════════════════════

/// A complete single-frame hand pose.  Always holds exactly
/// [`LANDMARK_COUNT`] landmarks; "no hand" is modelled as `Option::None`
/// by callers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandObservation {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(landmarks: [Landmark; LANDMARK_COUNT]) -> Self {
        HandObservation { landmarks }
    }

    /// Take the first 21 landmarks of `slice`; `None` if it is shorter.
    pub fn from_slice(slice: &[Landmark]) -> Option<Self> {
        let landmarks: [Landmark; LANDMARK_COUNT] = slice.get(..LANDMARK_COUNT)?.try_into().ok()?;
        Some(HandObservation { landmarks })
    }

    pub fn landmarks(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.landmarks
    }

    pub fn get(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index)
    }

    /// Palm centre, approximated by the middle-finger knuckle.
    pub fn palm(&self) -> Landmark {
        self.landmarks[MIDDLE_MCP]
    }
}

impl std::ops::Index<usize> for HandObservation {
    type Output = Landmark;

    fn index(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_requires_21() {
        let pts = vec![Landmark::default(); 20];
        assert!(HandObservation::from_slice(&pts).is_none());
        let pts = vec![Landmark::default(); 25];
        assert!(HandObservation::from_slice(&pts).is_some());
    }

    #[test]
    fn palm_is_middle_mcp() {
        let mut pts = [Landmark::default(); LANDMARK_COUNT];
        pts[MIDDLE_MCP] = Landmark::new(0.3, 0.7, -0.1);
        assert_eq!(HandObservation::new(pts).palm(), Landmark::new(0.3, 0.7, -0.1));
    }
}
