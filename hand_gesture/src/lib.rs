//! # hand_gesture
//!
//! Static hand-pose classification from 21 normalised hand landmarks
//! (MediaPipe Hands index scheme).
//!
//! ## Gesture table
//!
//! | Gesture | Fingers raised | Thumb |
//! |---|---|---|
//! | `Fist` | none | tucked |
//! | `ThumbsUp` | none | extended, tip above IP joint |
//! | `Victory` | index + middle | any |
//! | `ILoveYou` | index + pinky | extended |
//! | `Idle` | anything else, or no hand | any |
//!
//! ```rust
//! use hand_gesture::{classify, pose, GestureCategory};
//!
//! let obs = pose::synthetic(GestureCategory::Victory, 0.5, 0.5);
//! assert_eq!(classify(Some(&obs)), GestureCategory::Victory);
//! assert_eq!(classify(None), GestureCategory::Idle);
//! ```

pub mod classify;
pub mod landmark;
pub mod pose;

pub use classify::{classify, classify_landmarks, FingerState, GestureCategory, THUMB_EXTENDED_DX};
pub use landmark::{HandObservation, Landmark, LANDMARK_COUNT};
