//! # particle_morph
//!
//! Morph state machine for a fixed-size particle buffer.  Each classified
//! gesture selects a target shape; particles blend from a frozen `base`
//! toward that target while an eased progress ramp runs from 0 to 1.
//!
//! | Module | Contents |
//! |---|---|
//! | [`transition`] | [`Easing`] curves and the clock-driven [`Transition`] ramp |
//! | [`state`] | [`MorphState`]: base/target buffers, progress, retargeting |
//! | [`library`] | gesture → shape table, precomputed [`ShapeLibrary`] |
//! | [`engine`] | [`MorphEngine`] and its [`MorphConfig`] |
//!
//! Retargeting mid-transition never makes a particle jump: the base is
//! first frozen at the currently displayed blend.
//!
//! ```rust
//! use glam::Vec2;
//! use hand_gesture::GestureCategory;
//! use particle_morph::{MorphConfig, MorphEngine};
//!
//! let config = MorphConfig { particle_count: 500, seed: Some(7), ..MorphConfig::default() };
//! let mut engine = MorphEngine::new(config).unwrap();
//!
//! assert!(engine.update(GestureCategory::Victory, Vec2::new(0.5, 0.5), 0.0).unwrap());
//! assert_eq!(engine.progress(), 0.0);
//!
//! engine.advance(2.0);
//! assert_eq!(engine.progress(), 1.0);
//! ```

pub mod engine;
pub mod error;
pub mod library;
pub mod state;
pub mod transition;

pub use engine::{MorphConfig, MorphEngine, DEFAULT_PARTICLE_COUNT, DEFAULT_TRANSITION_SECS};
pub use error::{MorphError, MorphResult};
pub use library::{hand_to_scene, shape_for, ShapeLibrary};
pub use state::{oscillate, CheckedTarget, MorphState, Phase};
pub use transition::{Easing, Transition};
