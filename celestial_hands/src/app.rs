//! Top-level application loop.
//!
//! The provider runs on its own thread and sends [`ProviderEvent`]s; the
//! main thread drains them before every frame, so classification,
//! retargeting and rendering all happen on the thread that owns the
//! [`ParticleSystem`].

use std::io::{self, BufReader};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use log::info;
use particle_morph::MorphResult;

use crate::config::{AppConfig, ProviderKind};
use crate::error::AppResult;
use crate::provider::{
    spawn_provider, LandmarkProvider, ProviderEvent, SimInput, SimLandmarkProvider,
    StreamLandmarkProvider,
};
use crate::system::ParticleSystem;
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// ProviderLink
// ════════════════════════════════════════════════════════════════════════════

/// Receiving end of a provider plus whether it has already gone away.
pub struct ProviderLink {
    rx:   Receiver<ProviderEvent>,
    lost: bool,
}

impl ProviderLink {
    pub fn new(rx: Receiver<ProviderEvent>) -> Self {
        ProviderLink { rx, lost: false }
    }

    pub fn is_lost(&self) -> bool { self.lost }

    /// Feed every pending event into `system`.  A provider thread that
    /// hangs up without saying why is reported once as a failure.
    pub fn pump(&mut self, system: &mut ParticleSystem, now: f64) -> MorphResult<usize> {
        let mut handled = 0;
        loop {
            match self.rx.try_recv() {
                Ok(event) => {
                    if matches!(event, ProviderEvent::Failed(_)) {
                        self.lost = true;
                    }
                    system.on_event(event, now)?;
                    handled += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if !self.lost {
                        self.lost = true;
                        let reason = "landmark provider stopped unexpectedly".to_string();
                        system.on_event(ProviderEvent::Failed(reason), now)?;
                        handled += 1;
                    }
                    break;
                }
            }
        }
        Ok(handled)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run()
// ════════════════════════════════════════════════════════════════════════════

/// Open the window, start the configured provider and drive the
/// event/update/render loop until the window closes or `Q` is pressed.
pub fn run(config: AppConfig) -> AppResult<()> {
    let mut system = ParticleSystem::new(&config.morph)?;

    let mut sim_tx = None;
    let provider: Box<dyn LandmarkProvider> = match config.provider {
        ProviderKind::Sim => {
            let (tx, rx) = mpsc::channel::<SimInput>();
            sim_tx = Some(tx);
            Box::new(SimLandmarkProvider::new(rx))
        }
        ProviderKind::Stdin => Box::new(StreamLandmarkProvider::new(BufReader::new(io::stdin()))),
    };
    info!("landmark provider: {:?}", config.provider);

    let mut vis = Visualizer::new(&config.window, sim_tx)?;
    let mut link = ProviderLink::new(spawn_provider(provider));
    let clock = Instant::now();

    while vis.is_open() {
        if !vis.poll_input() {
            break;
        }
        let now = clock.elapsed().as_secs_f64();

        link.pump(&mut system, now)?;
        system.tick(now);
        vis.render(&system, now)?;
    }

    info!("window closed after {:.1}s", clock.elapsed().as_secs_f64());
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
