//! Text → point cloud.
//!
//! The string is drawn in white onto a black luminance canvas, the canvas is
//! sampled on a coarse grid, and every bright sample becomes a candidate
//! particle position.

use glam::{Vec2, Vec3};
use rand::Rng;

use crate::glyph;

// ════════════════════════════════════════════════════════════════════════════
// Canvas constants
// ════════════════════════════════════════════════════════════════════════════

pub const CANVAS_W: usize = 512;
pub const CANVAS_H: usize = 256;
/// Pixels per font cell; 7 cells tall gives a ~56 px line.
pub const TEXT_SCALE: usize = 8;
/// Sample every `SAMPLE_STRIDE`-th pixel in both axes.
pub const SAMPLE_STRIDE: usize = 2;
/// Samples brighter than this count as lit.
pub const LUMA_THRESHOLD: u8 = 128;
/// Canvas pixels per scene unit.
pub const PIXELS_PER_UNIT: f32 = 40.0;

const JITTER_XY: f32 = 0.1;
const JITTER_Z: f32 = 0.5;

// ════════════════════════════════════════════════════════════════════════════
// Bitmap
// ════════════════════════════════════════════════════════════════════════════

/// Single-channel 8-bit canvas, row-major.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width:  usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// A black canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Bitmap { width, height, pixels: vec![0; width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    /// Luminance at `(x, y)`; out-of-range reads are black.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x]
        } else {
            0
        }
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    /// Draw `text` in bold white, centred on a fresh `width`×`height` canvas.
    ///
    /// The font scale shrinks (down to one pixel per cell) when the string
    /// would not fit at [`TEXT_SCALE`]; anything still wider is clipped.
    pub fn rasterize_text(text: &str, width: usize, height: usize) -> Self {
        let mut bmp = Bitmap::new(width, height);

        let mut scale = TEXT_SCALE;
        while scale > 1 && glyph::text_width(text, scale, true) > width {
            scale -= 1;
        }

        let tw = glyph::text_width(text, scale, true);
        let th = glyph::text_height(scale);
        let ox = width.saturating_sub(tw) / 2;
        let oy = height.saturating_sub(th) / 2;

        glyph::draw_text(text, scale, true, |x, y| bmp.set(ox + x, oy + y, 255));
        bmp
    }

    /// Grid-sample the canvas and return the pixel coordinates of every
    /// sample brighter than `threshold`, in row-major order.
    pub fn lit_pixels(&self, stride: usize, threshold: u8) -> Vec<(usize, usize)> {
        let stride = stride.max(1);
        let mut out = Vec::new();
        for y in (0..self.height).step_by(stride) {
            for x in (0..self.width).step_by(stride) {
                if self.get(x, y) > threshold {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

/// Convert a canvas pixel to scene coordinates: origin at the canvas centre,
/// y up, [`PIXELS_PER_UNIT`] pixels per unit.
pub fn pixel_to_scene(px: usize, py: usize, width: usize, height: usize) -> Vec2 {
    Vec2::new(
        (px as f32 - width as f32 / 2.0) / PIXELS_PER_UNIT,
        (height as f32 / 2.0 - py as f32) / PIXELS_PER_UNIT,
    )
}

// ════════════════════════════════════════════════════════════════════════════
// text() generator
// ════════════════════════════════════════════════════════════════════════════

/// `count` points tracing `text`.
///
/// Lit samples are reused round-robin (`i mod lit.len()`) and each point is
/// jittered by up to ±0.05 in x/y and ±0.25 in z.  When nothing lights up
/// (empty string, only unknown glyphs) every point is jitter around the
/// origin.
pub fn text<R: Rng + ?Sized>(count: usize, text: &str, rng: &mut R) -> Vec<Vec3> {
    let bmp = Bitmap::rasterize_text(text, CANVAS_W, CANVAS_H);
    let mut anchors: Vec<Vec2> = bmp
        .lit_pixels(SAMPLE_STRIDE, LUMA_THRESHOLD)
        .into_iter()
        .map(|(x, y)| pixel_to_scene(x, y, CANVAS_W, CANVAS_H))
        .collect();
    if anchors.is_empty() {
        anchors.push(Vec2::ZERO);
    }

    (0..count)
        .map(|i| {
            let a = anchors[i % anchors.len()];
            Vec3::new(
                a.x + (rng.gen::<f32>() - 0.5) * JITTER_XY,
                a.y + (rng.gen::<f32>() - 0.5) * JITTER_XY,
                (rng.gen::<f32>() - 0.5) * JITTER_Z,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn blank_canvas_has_no_lit_pixels() {
        let bmp = Bitmap::new(64, 32);
        assert!(bmp.lit_pixels(1, LUMA_THRESHOLD).is_empty());
    }

    #[test]
    fn phrase_lights_up_centre() {
        let bmp = Bitmap::rasterize_text("I LOVE YOU", CANVAS_W, CANVAS_H);
        let lit = bmp.lit_pixels(SAMPLE_STRIDE, LUMA_THRESHOLD);
        assert!(lit.len() > 500, "only {} lit samples", lit.len());
        // Top and bottom margins stay dark.
        assert!(lit.iter().all(|&(_, y)| y >= 90 && y < 166));
    }

    #[test]
    fn long_text_shrinks_to_fit() {
        let s = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let bmp = Bitmap::rasterize_text(s, CANVAS_W, CANVAS_H);
        let lit = bmp.lit_pixels(1, LUMA_THRESHOLD);
        let max_x = lit.iter().map(|&(x, _)| x).max().unwrap();
        assert!(max_x < CANVAS_W);
        // First glyph starts near the left edge once shrunk.
        let min_x = lit.iter().map(|&(x, _)| x).min().unwrap();
        assert!(min_x < 64);
    }

    #[test]
    fn pixel_mapping() {
        assert_eq!(pixel_to_scene(256, 128, 512, 256), Vec2::ZERO);
        assert_eq!(pixel_to_scene(0, 0, 512, 256), Vec2::new(-6.4, 3.2));
    }

    #[test]
    fn text_points_inside_canvas_footprint() {
        let mut rng = StdRng::seed_from_u64(7);
        let pts = text(5_000, "I LOVE YOU", &mut rng);
        assert_eq!(pts.len(), 5_000);
        for p in &pts {
            assert!(p.x.abs() <= 6.4 + 0.05);
            assert!(p.y.abs() <= 3.2 + 0.05);
            assert!(p.z.abs() <= 0.25);
        }
    }

    #[test]
    fn empty_text_falls_back_to_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        for s in ["", "§§§"] {
            let pts = text(100, s, &mut rng);
            assert_eq!(pts.len(), 100);
            assert!(pts.iter().all(|p| p.x.abs() <= 0.05 && p.y.abs() <= 0.05));
        }
    }
}
