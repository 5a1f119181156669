//! # celestial_hands
//!
//! A particle cloud steered by hand gestures.  A landmark provider reports
//! hand poses, each pose is classified, and the classified gesture morphs
//! the cloud toward its shape.
//!
//! ## Gesture → shape mapping
//!
//! | Gesture | Label | Shape |
//! |---|---|---|
//! | no hand / open hand | CELESTIAL DUST | noise cube |
//! | Fist | GRAVITY WELL | tight cluster that follows the palm |
//! | Thumbs up | CELESTIAL SPHERE | Fibonacci sphere |
//! | Victory | LOVE HEART | parametric heart |
//! | I love you | I LOVE YOU | the words, sampled from a raster |
//!
//! ## Providers
//!
//! * (default) **Simulation**: keys `1`–`5` pick a pose, `0`/`Esc` removes
//!   the hand, the mouse moves the palm.
//! * `--stdin` **Stream**: one JSON frame per line, `null` for no hand or
//!   21 landmarks as `[x, y, z]` triples or `{"x":..,"y":..,"z":..}` objects.
//!
//! If the provider fails the cloud falls back to dust and a red notice
//! stays on screen.

pub mod app;
pub mod config;
pub mod error;
pub mod provider;
pub mod system;
pub mod visualizer;

pub use config::{AppConfig, ConfigError, ProviderKind};
pub use error::{AppError, AppResult};
pub use provider::{spawn_provider, LandmarkProvider, ProviderEvent};
pub use system::ParticleSystem;
