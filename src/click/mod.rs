//! Click-feedback synthesizer.
//!
//! [`ClickSynth::trigger`] is the fire-and-forget entry point for UI event
//! handlers: it reads the current preferences, and if sound is on, plays one
//! freshly synthesized click on a worker thread. It never blocks and never
//! reports failure.
//!
//! Every click opens its own processing context, builds its own graph, and
//! releases the context `release_delay` after starting. Nothing is pooled or
//! shared between clicks, so rapid triggers simply overlap. The per-click
//! device open costs a few milliseconds on most hosts; clicks are rare enough
//! that it doesn't matter.
//!
//! [`ClickSynth::fire`] and [`ClickSynth::play`] run the same session on the
//! calling thread and return its outcome.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use clickfx::{output::CpalBackend, prefs::JsonFileStore, ClickSynth, SoundPreferences};
//!
//! let prefs = Arc::new(SoundPreferences::load(JsonFileStore::open_default()?));
//! let synth = ClickSynth::new(CpalBackend::new(), Arc::clone(&prefs));
//!
//! // inside a key or click handler
//! synth.trigger();
//! ```

mod config;
mod voice;

use std::sync::Arc;
use std::thread;

pub use config::ClickConfig;
pub use voice::{click_graph, ClickGraph};

use crate::{
    error::AudioUnavailable,
    output::{AudioBackend, AudioContext, ContextGuard},
    prefs::SoundPreferences,
};

/// What a playback session did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    Played { sample_rate: f32, frames: usize },
    /// Sound was off or the volume was zero; nothing was acquired.
    Skipped,
}

pub struct ClickSynth<B: AudioBackend> {
    backend: Arc<B>,
    prefs: Arc<SoundPreferences>,
    config: ClickConfig,
}

impl<B: AudioBackend> ClickSynth<B> {
    pub fn new(backend: B, prefs: Arc<SoundPreferences>) -> Self {
        Self {
            backend: Arc::new(backend),
            prefs,
            config: ClickConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ClickConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ClickConfig {
        &self.config
    }

    pub fn prefs(&self) -> &Arc<SoundPreferences> {
        &self.prefs
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Play a click in the background if sound is on.
    ///
    /// Volume is captured now; later preference changes don't reach a click
    /// that is already playing.
    pub fn trigger(&self) {
        let Some(volume) = self.prefs.snapshot().audible_volume() else {
            return;
        };

        let backend = Arc::clone(&self.backend);
        let config = self.config.clone();

        let _ = spawn_session(backend, config, volume);
    }

    /// Guarded playback on the calling thread.
    pub fn fire(&self) -> Result<ClickOutcome, AudioUnavailable> {
        match self.prefs.snapshot().audible_volume() {
            Some(volume) => self.play(volume),
            None => Ok(ClickOutcome::Skipped),
        }
    }

    /// Play one click at `volume` on the calling thread, ignoring preferences.
    /// Returns once the context has been released.
    pub fn play(&self, volume: f32) -> Result<ClickOutcome, AudioUnavailable> {
        run_session(&*self.backend, &self.config, volume)
    }
}

/// Run a session on its own `click-playback` thread.
fn spawn_session<B: AudioBackend>(
    backend: Arc<B>,
    config: ClickConfig,
    volume: f32,
) -> Result<thread::JoinHandle<Result<ClickOutcome, AudioUnavailable>>, AudioUnavailable> {
    thread::Builder::new()
        .name("click-playback".into())
        .spawn(move || run_session(&*backend, &config, volume))
        .map_err(|e| AudioUnavailable::Worker(e.to_string()))
}

/// One complete playback: acquire, build, start, hold, release.
fn run_session<B: AudioBackend>(
    backend: &B,
    config: &ClickConfig,
    volume: f32,
) -> Result<ClickOutcome, AudioUnavailable> {
    let mut ctx = ContextGuard::new(backend.open()?);

    let sample_rate = ctx.sample_rate();
    let graph = click_graph(config, sample_rate, volume, &mut rand::rng());
    let frames = graph.source().source().len();

    ctx.start(Box::new(graph), config.duration)?;

    // The hold counts from playback start; `start` may take a while to
    // build the device stream.
    thread::sleep(config.release_delay);
    Ok(ClickOutcome::Played {
        sample_rate,
        frames,
    })
}
