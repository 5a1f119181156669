//! Landmark providers: anything that delivers hand observations over a
//! channel.
//!
//! The consumer sees only [`ProviderEvent`]s and never learns whether they
//! came from a camera pipeline, a recorded stream or the keyboard
//! simulator.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use hand_gesture::{pose, GestureCategory, HandObservation, Landmark, LANDMARK_COUNT};
use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

/// Simulated detector frame interval (~25 observations per second).
pub const SIM_FRAME_INTERVAL: Duration = Duration::from_millis(40);

// ════════════════════════════════════════════════════════════════════════════
// ProviderEvent / LandmarkProvider
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum ProviderEvent {
    /// One detection frame with a hand in view.
    Hand(HandObservation),
    /// A detection frame with no hand.
    NoHand,
    /// The provider cannot continue.  No further events follow.
    Failed(String),
}

/// A source of hand observations, run on its own thread.
pub trait LandmarkProvider: Send + 'static {
    /// Deliver events until the source is exhausted or `tx` hangs up.
    fn run(self: Box<Self>, tx: Sender<ProviderEvent>);
}

/// Spawn a provider on its own thread and return the receiving end.
pub fn spawn_provider(provider: Box<dyn LandmarkProvider>) -> Receiver<ProviderEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || provider.run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// SimLandmarkProvider (keyboard/mouse simulation)
// ════════════════════════════════════════════════════════════════════════════

/// Pose selected by the simulator keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimPose {
    NoHand,     // 0 / Esc
    OpenHand,   // 1
    Fist,       // 2
    ThumbsUp,   // 3
    Victory,    // 4
    ILoveYou,   // 5
}

impl SimPose {
    fn gesture(self) -> Option<GestureCategory> {
        match self {
            SimPose::NoHand   => None,
            SimPose::OpenHand => Some(GestureCategory::Idle),
            SimPose::Fist     => Some(GestureCategory::Fist),
            SimPose::ThumbsUp => Some(GestureCategory::ThumbsUp),
            SimPose::Victory  => Some(GestureCategory::Victory),
            SimPose::ILoveYou => Some(GestureCategory::ILoveYou),
        }
    }
}

/// Raw input from the simulation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimInput {
    Pose(SimPose),
    /// Pointer position normalised to the window (`0..1`, origin top-left).
    Pointer { x: f32, y: f32 },
}

/// Fakes a hand tracker from window input.
///
/// The window thread sends [`SimInput`]s; every frame interval this
/// provider emits the current pose as a synthetic observation.  The palm
/// sits under the pointer, mirrored on x the way a selfie camera sees it.
pub struct SimLandmarkProvider {
    rx:       Receiver<SimInput>,
    pose:     SimPose,
    pointer:  (f32, f32),
    interval: Duration,
}

impl SimLandmarkProvider {
    pub fn new(rx: Receiver<SimInput>) -> Self {
        SimLandmarkProvider {
            rx,
            pose:     SimPose::NoHand,
            pointer:  (0.5, 0.5),
            interval: SIM_FRAME_INTERVAL,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn apply(&mut self, input: SimInput) {
        match input {
            SimInput::Pose(pose) => self.pose = pose,
            SimInput::Pointer { x, y } => self.pointer = (x.clamp(0.0, 1.0), y.clamp(0.0, 1.0)),
        }
    }

    /// The event a detector would report right now.
    pub fn current(&self) -> ProviderEvent {
        match self.pose.gesture() {
            None => ProviderEvent::NoHand,
            Some(gesture) => {
                let (x, y) = self.pointer;
                ProviderEvent::Hand(pose::synthetic(gesture, 1.0 - x, y))
            }
        }
    }
}

impl LandmarkProvider for SimLandmarkProvider {
    fn run(mut self: Box<Self>, tx: Sender<ProviderEvent>) {
        loop {
            loop {
                match self.rx.try_recv() {
                    Ok(input) => self.apply(input),
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => return,
                }
            }
            if tx.send(self.current()).is_err() {
                return;
            }
            thread::sleep(self.interval);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// StreamLandmarkProvider (JSON lines)
// ════════════════════════════════════════════════════════════════════════════

/// Why a stream line was rejected.
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {LANDMARK_COUNT} landmarks, got {0}")]
    WrongCount(usize),
}

/// A landmark on the wire: `[x, y, z]` or `{"x": .., "y": .., "z": ..}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireLandmark {
    Triple([f32; 3]),
    Object(Landmark),
}

impl From<WireLandmark> for Landmark {
    fn from(w: WireLandmark) -> Self {
        match w {
            WireLandmark::Triple([x, y, z]) => Landmark::new(x, y, z),
            WireLandmark::Object(lm) => lm,
        }
    }
}

/// Decode one frame line.  `null`, `[]` and partial hands (fewer than
/// [`LANDMARK_COUNT`] landmarks) mean no hand; more than that is an error.
pub fn parse_frame(line: &str) -> Result<Option<HandObservation>, FrameError> {
    let frame: Option<Vec<WireLandmark>> = serde_json::from_str(line)?;
    let landmarks: Vec<Landmark> = match frame {
        None => return Ok(None),
        Some(v) => v.into_iter().map(Landmark::from).collect(),
    };
    if landmarks.len() > LANDMARK_COUNT {
        return Err(FrameError::WrongCount(landmarks.len()));
    }
    Ok(HandObservation::from_slice(&landmarks))
}

/// Reads one JSON frame per line from any buffered reader (stdin in the
/// binary), e.g. the output of an external hand-tracking process.
///
/// Lines that are not a frame at all are logged and skipped; blank lines
/// are ignored.  A partial hand is reported as [`ProviderEvent::NoHand`].
/// End of input or a read error is reported as [`ProviderEvent::Failed`].
pub struct StreamLandmarkProvider<R> {
    reader: R,
}

impl<R: BufRead + Send + 'static> StreamLandmarkProvider<R> {
    pub fn new(reader: R) -> Self {
        StreamLandmarkProvider { reader }
    }
}

impl<R: BufRead + Send + 'static> LandmarkProvider for StreamLandmarkProvider<R> {
    fn run(self: Box<Self>, tx: Sender<ProviderEvent>) {
        let mut line_no = 0usize;
        for line in self.reader.lines() {
            line_no += 1;
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    let _ = tx.send(ProviderEvent::Failed(format!("landmark stream read failed: {e}")));
                    return;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            let event = match parse_frame(&line) {
                Ok(Some(obs)) => ProviderEvent::Hand(obs),
                Ok(None) => ProviderEvent::NoHand,
                Err(e) => {
                    warn!("landmark stream line {line_no} skipped: {e}");
                    continue;
                }
            };
            if tx.send(event).is_err() {
                debug!("landmark stream consumer hung up");
                return;
            }
        }
        let _ = tx.send(ProviderEvent::Failed(format!("landmark stream ended after {line_no} lines")));
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
