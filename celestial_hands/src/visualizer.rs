//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ GESTURE LABEL                                  [progress bar] │
//! │                                                              │
//! │                  · ·  particle cloud  · ·                    │
//! │                                                              │
//! │ notice (red, only after a provider failure)                  │
//! │ key legend (simulation only)                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Points are projected by a perspective camera on the +z axis looking at
//! the origin while the cloud turns slowly about y.  Each particle is a
//! round sprite blended additively, so dense regions glow.

use std::sync::mpsc::Sender;
use std::time::Duration;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};
use particle_shapes::glyph;

use crate::config::WindowConfig;
use crate::error::{AppError, AppResult};
use crate::provider::{SimInput, SimPose};
use crate::system::ParticleSystem;

// ════════════════════════════════════════════════════════════════════════════
// Camera / layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const CAMERA_Z:     f32 = 15.0;
pub const FOV_Y_DEG:    f32 = 75.0;
/// Cloud rotation about y, radians per second.
pub const SPIN_RATE:    f64 = 0.12;
const NEAR:             f32 = 0.1;
/// Sprite diameter is `size * SPRITE_ATTENUATION / depth` at the reference
/// window height, scaled with the actual height.
const SPRITE_ATTENUATION: f32 = 300.0;
const SPRITE_REF_HEIGHT:  f32 = 6000.0;
const MAX_SPRITE_RADIUS:  f32 = 6.0;
/// Additive contribution of one sprite centre, 0–1.
const SPRITE_GAIN:      f32 = 0.55;

const BG_COLOR:         u32 = 0xFF05050F;
const LABEL_COLOR:      u32 = 0xFFEEEEFF;
const NOTICE_COLOR:     u32 = 0xFFFF4444;
const LEGEND_COLOR:     u32 = 0xFF777788;
const BAR_BG:           u32 = 0xFF202040;
const BAR_FG:           u32 = 0xFF00CED1;
const MARGIN:           usize = 12;

const SIM_LEGEND: &str = "0/ESC=NO HAND  1=OPEN  2=FIST  3=THUMBS UP  4=VICTORY  5=I LOVE YOU  MOUSE=MOVE  Q=QUIT";

// ════════════════════════════════════════════════════════════════════════════
// Projection
// ════════════════════════════════════════════════════════════════════════════

/// Perspective projection for a `width × height` viewport.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    width:  f32,
    height: f32,
    /// Focal length in pixels.
    focal:  f32,
    cos_a:  f32,
    sin_a:  f32,
}

impl Camera {
    pub fn new(width: usize, height: usize, angle: f32) -> Self {
        let focal = (height as f32 / 2.0) / (FOV_Y_DEG.to_radians() / 2.0).tan();
        Camera {
            width: width as f32,
            height: height as f32,
            focal,
            cos_a: angle.cos(),
            sin_a: angle.sin(),
        }
    }

    /// Screen position and view depth of a scene point, `None` when it is
    /// behind the near plane.
    pub fn project(&self, x: f32, y: f32, z: f32) -> Option<(f32, f32, f32)> {
        let rx = x * self.cos_a + z * self.sin_a;
        let rz = -x * self.sin_a + z * self.cos_a;
        let depth = CAMERA_Z - rz;
        if depth <= NEAR {
            return None;
        }
        let sx = self.width / 2.0 + rx * self.focal / depth;
        let sy = self.height / 2.0 - y * self.focal / depth;
        Some((sx, sy, depth))
    }

    pub fn sprite_radius(&self, size: f32, depth: f32) -> f32 {
        let diameter = size * SPRITE_ATTENUATION / depth * (self.height / SPRITE_REF_HEIGHT);
        (diameter / 2.0).min(MAX_SPRITE_RADIUS)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:  Window,
    width:   usize,
    height:  usize,
    buf:     Vec<u32>,
    /// Present only when the simulator provides the landmarks.
    sim_tx:  Option<Sender<SimInput>>,
    pointer: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(config: &WindowConfig, sim_tx: Option<Sender<SimInput>>) -> AppResult<Self> {
        let mut window = Window::new(
            &config.title,
            config.width,
            config.height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| AppError::Window(e.to_string()))?;

        if config.fps > 0 {
            window.limit_update_rate(Some(Duration::from_micros(1_000_000 / config.fps as u64)));
        }

        Ok(Visualizer {
            window,
            width: config.width,
            height: config.height,
            buf: vec![BG_COLOR; config.width * config.height],
            sim_tx,
            pointer: None,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard and mouse.  Returns false when the app should quit.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() || self.window.is_key_pressed(Key::Q, KeyRepeat::No) {
            return false;
        }
        let Some(tx) = &self.sim_tx else { return true };

        let pressed = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let pose = if pressed(Key::Key0) || pressed(Key::Escape) {
            Some(SimPose::NoHand)
        } else if pressed(Key::Key1) {
            Some(SimPose::OpenHand)
        } else if pressed(Key::Key2) {
            Some(SimPose::Fist)
        } else if pressed(Key::Key3) {
            Some(SimPose::ThumbsUp)
        } else if pressed(Key::Key4) {
            Some(SimPose::Victory)
        } else if pressed(Key::Key5) {
            Some(SimPose::ILoveYou)
        } else {
            None
        };
        if let Some(pose) = pose {
            let _ = tx.send(SimInput::Pose(pose));
        }

        if let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) {
            let p = (mx / self.width as f32, my / self.height as f32);
            if self.pointer != Some(p) {
                self.pointer = Some(p);
                let _ = tx.send(SimInput::Pointer { x: p.0, y: p.1 });
            }
        }
        true
    }

    /// Render one frame at clock reading `now`.
    pub fn render(&mut self, system: &ParticleSystem, now: f64) -> AppResult<()> {
        self.buf.fill(BG_COLOR);

        // ── Particles ─────────────────────────────────────────────────────
        let camera = Camera::new(self.width, self.height, spin_angle(now));
        for ((p, c), &size) in system
            .positions()
            .chunks_exact(3)
            .zip(system.colors().chunks_exact(3))
            .zip(system.sizes())
        {
            if let Some((sx, sy, depth)) = camera.project(p[0], p[1], p[2]) {
                let r = camera.sprite_radius(size, depth);
                self.draw_sprite(sx, sy, r, [c[0], c[1], c[2]]);
            }
        }

        // ── Gesture label + progress bar ──────────────────────────────────
        self.draw_label(system.gesture().label(), MARGIN, MARGIN, 3, LABEL_COLOR);
        let bar_w = 160.min(self.width / 3);
        let bar_x = self.width.saturating_sub(MARGIN + bar_w);
        self.fill_rect(bar_x, MARGIN, bar_w, 8, BAR_BG);
        let filled = (system.progress().clamp(0.0, 1.0) * bar_w as f32) as usize;
        self.fill_rect(bar_x, MARGIN, filled, 8, BAR_FG);

        // ── Footer ────────────────────────────────────────────────────────
        let line_h = glyph::text_height(1) + 4;
        let mut y = self.height.saturating_sub(MARGIN + line_h);
        if self.sim_tx.is_some() {
            self.draw_label(SIM_LEGEND, MARGIN, y, 1, LEGEND_COLOR);
            y = y.saturating_sub(glyph::text_height(2) + 6);
        }
        if let Some(notice) = system.notice() {
            self.draw_label(notice, MARGIN, y, 2, NOTICE_COLOR);
        }

        self.window
            .update_with_buffer(&self.buf, self.width, self.height)
            .map_err(|e| AppError::Window(e.to_string()))
    }

    // ── Primitives ────────────────────────────────────────────────────────

    /// Round sprite with a soft quadratic falloff, added onto the frame.
    fn draw_sprite(&mut self, cx: f32, cy: f32, radius: f32, color: [f32; 3]) {
        if radius < 1.0 {
            if cx >= 0.0 && cy >= 0.0 {
                self.add_pixel(cx as usize, cy as usize, color, SPRITE_GAIN * radius.max(0.25));
            }
            return;
        }
        let r2 = radius * radius;
        let x0 = (cx - radius).floor().max(0.0) as usize;
        let y0 = (cy - radius).floor().max(0.0) as usize;
        let x1 = ((cx + radius).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((cy + radius).ceil().max(0.0) as usize).min(self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 < r2 {
                    self.add_pixel(x, y, color, SPRITE_GAIN * (1.0 - d2 / r2));
                }
            }
        }
    }

    fn add_pixel(&mut self, x: usize, y: usize, color: [f32; 3], weight: f32) {
        if x < self.width && y < self.height {
            let px = &mut self.buf[y * self.width + x];
            *px = add(*px, color, weight);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        for row in y..(y + h).min(self.height) {
            for col in x..(x + w).min(self.width) {
                self.buf[row * self.width + col] = color;
            }
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < self.width && y < self.height {
            self.buf[y * self.width + x] = color;
        }
    }

    fn draw_label(&mut self, text: &str, x: usize, y: usize, scale: usize, color: u32) {
        glyph::draw_text(text, scale, false, |px, py| self.set_pixel(x + px, y + py, color));
    }
}

/// Saturating additive blend of `color * weight` onto an ARGB pixel.
fn add(dst: u32, color: [f32; 3], weight: f32) -> u32 {
    let channel = |shift: u32, c: f32| {
        let d = (dst >> shift) & 0xFF;
        let s = (c * weight * 255.0) as u32;
        (d + s).min(0xFF) << shift
    };
    0xFF000000 | channel(16, color[0]) | channel(8, color[1]) | channel(0, color[2])
}

/// Cloud rotation at clock reading `now`, wrapped to one turn.
pub fn spin_angle(now: f64) -> f32 {
    ((now * SPIN_RATE) % std::f64::consts::TAU) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_stays_within_one_turn() {
        assert_eq!(spin_angle(0.0), 0.0);
        assert!((spin_angle(10.0) - 1.2).abs() < 1e-6);
        let day = 24.0 * 3600.0;
        let a = spin_angle(day);
        assert!((0.0..std::f32::consts::TAU).contains(&a));
        let step = (spin_angle(day + 1.0 / 60.0) - a).rem_euclid(std::f32::consts::TAU);
        assert!((step - 0.002).abs() < 1e-5);
    }

    #[test]
    fn origin_projects_to_centre() {
        let cam = Camera::new(800, 600, 0.0);
        let (sx, sy, depth) = cam.project(0.0, 0.0, 0.0).unwrap();
        assert_eq!((sx, sy, depth), (400.0, 300.0, CAMERA_Z));
    }

    #[test]
    fn up_is_up_and_behind_camera_is_culled() {
        let cam = Camera::new(800, 600, 0.0);
        let (_, sy, _) = cam.project(0.0, 2.0, 0.0).unwrap();
        assert!(sy < 300.0);
        assert!(cam.project(0.0, 0.0, 20.0).is_none());
    }

    #[test]
    fn quarter_turn_moves_x_into_depth() {
        let cam = Camera::new(800, 600, std::f32::consts::FRAC_PI_2);
        let (sx, _, depth) = cam.project(3.0, 0.0, 0.0).unwrap();
        assert!((sx - 400.0).abs() < 1e-3);
        assert!((depth - (CAMERA_Z + 3.0)).abs() < 1e-4);
    }

    #[test]
    fn nearer_sprites_are_larger() {
        let cam = Camera::new(800, 600, 0.0);
        assert!(cam.sprite_radius(2.0, 5.0) > cam.sprite_radius(2.0, 20.0));
        assert!(cam.sprite_radius(3.0, NEAR) <= MAX_SPRITE_RADIUS);
    }

    #[test]
    fn additive_blend_saturates() {
        assert_eq!(add(0xFF000000, [1.0, 0.0, 0.0], 1.0), 0xFFFF0000);
        assert_eq!(add(0xFFF00000, [1.0, 1.0, 1.0], 0.5), 0xFFFF7F7F);
    }
}
