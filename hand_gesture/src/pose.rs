//! Canonical synthetic hand poses.
//!
//! Used to drive the classifier without a camera: keyboard simulation and
//! tests build a textbook pose for each gesture, positioned so that its
//! palm (middle knuckle) sits at the requested normalised coordinates.

use crate::classify::GestureCategory;
use crate::landmark::*;

// Knuckle x-offsets from the palm, index → pinky.
const FINGER_DX: [f32; 4] = [-0.03, 0.0, 0.03, 0.06];

#[derive(Clone, Copy)]
enum Thumb {
    Tucked,
    Up,
    Out,
}

/// Build a 21-landmark pose that classifies as `gesture` with its palm at
/// `(palm_x, palm_y)`.
pub fn synthetic(gesture: GestureCategory, palm_x: f32, palm_y: f32) -> HandObservation {
    // [index, middle, ring, pinky] raised?
    let (fingers, thumb) = match gesture {
        GestureCategory::Idle     => ([true, true, true, true], Thumb::Out),
        GestureCategory::Fist     => ([false; 4], Thumb::Tucked),
        GestureCategory::ThumbsUp => ([false; 4], Thumb::Up),
        GestureCategory::Victory  => ([true, true, false, false], Thumb::Tucked),
        GestureCategory::ILoveYou => ([true, false, false, true], Thumb::Out),
    };

    let at = |dx: f32, dy: f32| Landmark::new(palm_x + dx, palm_y + dy, 0.0);
    let mut lm = [Landmark::default(); LANDMARK_COUNT];

    lm[WRIST] = at(0.0, 0.12);

    lm[THUMB_CMC] = at(-0.06, 0.07);
    lm[THUMB_MCP] = at(-0.09, 0.04);
    let (ip, tip) = match thumb {
        Thumb::Tucked => ((-0.07, 0.01), (-0.05, 0.0)),
        Thumb::Up     => ((-0.16, -0.03), (-0.18, -0.09)),
        Thumb::Out    => ((-0.15, 0.02), (-0.20, 0.01)),
    };
    lm[THUMB_IP] = at(ip.0, ip.1);
    lm[THUMB_TIP] = at(tip.0, tip.1);

    let mcps = [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];
    for (f, &mcp) in mcps.iter().enumerate() {
        let dx = FINGER_DX[f];
        // Raised fingers point up the frame; curled tips fold back down
        // below the PIP joint.
        let (dip_dy, tip_dy) = if fingers[f] { (-0.10, -0.14) } else { (-0.03, -0.01) };
        lm[mcp] = at(dx, 0.0);
        lm[mcp + 1] = at(dx, -0.05);
        lm[mcp + 2] = at(dx, dip_dy);
        lm[mcp + 3] = at(dx, tip_dy);
    }

    HandObservation::new(lm)
}
