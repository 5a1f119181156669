//! # particle_shapes
//!
//! Point-cloud generators for a morphing particle system.  Every generator
//! returns exactly `count` points as [`glam::Vec3`]; callers never see a
//! partial result.
//!
//! | Shape | Generator | Random? |
//! |---|---|---|
//! | Celestial dust | [`noise`] | yes: uniform in a cube |
//! | Sphere | [`sphere`] | no: Fibonacci spiral |
//! | Heart | [`heart`] | yes: curve parameter and depth |
//! | Fist cluster | [`fist`] | yes: jitter around a centre |
//! | Text | [`text`] | yes: jitter around lit pixels |
//!
//! Random generators take any [`rand::Rng`]; pass a seeded
//! `rand::rngs::StdRng` for reproducible shapes.
//!
//! ```rust
//! use particle_shapes::{sphere, ShapeKind, ShapeParams};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let ball = sphere(1_000, 4.0);
//! assert_eq!(ball.len(), 1_000);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let heart = ShapeParams::default().generate(ShapeKind::Heart, 500, &mut rng);
//! assert_eq!(heart.len(), 500);
//! ```

pub mod glyph;
pub mod raster;

use std::f64::consts::PI;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub use raster::{text, Bitmap};

// ════════════════════════════════════════════════════════════════════════════
// ShapeKind / ShapeParams
// ════════════════════════════════════════════════════════════════════════════

/// The visual archetypes the generators can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Noise,
    Sphere,
    Heart,
    Fist,
    Text,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Noise,
        ShapeKind::Sphere,
        ShapeKind::Heart,
        ShapeKind::Fist,
        ShapeKind::Text,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Noise  => "noise",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Heart  => "heart",
            ShapeKind::Fist   => "fist",
            ShapeKind::Text   => "text",
        }
    }
}

/// Per-shape tuning constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeParams {
    /// Side length of the noise cube.
    pub noise_extent:  f32,
    pub sphere_radius: f32,
    /// Multiplier applied to the raw heart curve (which spans ~±16 units).
    pub heart_scale:   f32,
    /// Side length of the fist cluster cube.
    pub fist_extent:   f32,
    /// String spelled out by the text shape.
    pub text:          String,
}

impl Default for ShapeParams {
    fn default() -> Self {
        ShapeParams {
            noise_extent:  15.0,
            sphere_radius: 4.0,
            heart_scale:   0.25,
            fist_extent:   0.5,
            text:          "I LOVE YOU".to_string(),
        }
    }
}

impl ShapeParams {
    /// Generate `kind` with these parameters.  The fist cluster is centred
    /// on the origin; use [`fist`] directly for a live centre.
    pub fn generate<R: Rng + ?Sized>(&self, kind: ShapeKind, count: usize, rng: &mut R) -> Vec<Vec3> {
        match kind {
            ShapeKind::Noise  => noise(count, self.noise_extent, rng),
            ShapeKind::Sphere => sphere(count, self.sphere_radius),
            ShapeKind::Heart  => heart(count, self.heart_scale, rng),
            ShapeKind::Fist   => fist(count, Vec3::ZERO, self.fist_extent, rng),
            ShapeKind::Text   => text(count, &self.text, rng),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Generators
// ════════════════════════════════════════════════════════════════════════════

/// Uniform noise in the axis-aligned cube of side `extent` centred at the
/// origin.
pub fn noise<R: Rng + ?Sized>(count: usize, extent: f32, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            Vec3::new(
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
            )
        })
        .collect()
}

/// Near-uniform sphere surface via a Fibonacci-style spiral.
///
/// Point `i` sits at polar angle `φ = acos(−1 + 2i/count)` and azimuth
/// `θ = √(count·π)·φ`, so successive points wind around the sphere instead
/// of bunching at the poles.
pub fn sphere(count: usize, radius: f32) -> Vec<Vec3> {
    let n = count as f64;
    let winding = (n * PI).sqrt();
    let r = radius as f64;

    (0..count)
        .map(|i| {
            let phi = (-1.0 + 2.0 * i as f64 / n).acos();
            let theta = winding * phi;
            Vec3::new(
                (r * theta.cos() * phi.sin()) as f32,
                (r * theta.sin() * phi.sin()) as f32,
                (r * phi.cos()) as f32,
            )
        })
        .collect()
}

/// Classic parametric heart outline with a thin random depth.
///
/// `x = 16 sin³t`, `y = 13 cos t − 5 cos 2t − 2 cos 3t − cos 4t`, with `t`
/// uniform on `[0, 2π)`; depth is uniform on `[−2, 2)` before scaling.
pub fn heart<R: Rng + ?Sized>(count: usize, scale: f32, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            let t = rng.gen::<f32>() * std::f32::consts::TAU;
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            let depth = (rng.gen::<f32>() - 0.5) * 4.0;
            Vec3::new(x, y, depth) * scale
        })
        .collect()
}

/// Tight cluster: every point inside the cube of side `extent` around
/// `center`.
pub fn fist<R: Rng + ?Sized>(count: usize, center: Vec3, extent: f32, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| {
            center + Vec3::new(
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
                (rng.gen::<f32>() - 0.5) * extent,
            )
        })
        .collect()
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
