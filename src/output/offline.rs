use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::{
    error::AudioUnavailable,
    graph::node::GraphNode,
    output::{frames_for, AudioBackend, AudioContext, Playhead},
};

#[derive(Debug, Default)]
struct OfflineLog {
    opened: usize,
    closed: usize,
    renders: Vec<Vec<f32>>,
}

/// Renders every playback into memory at a fixed sample rate.
///
/// Clones share one log, so a test can keep a handle while a synth owns the
/// backend.
#[derive(Debug, Clone)]
pub struct OfflineBackend {
    sample_rate: f32,
    open_error: Option<AudioUnavailable>,
    start_error: Option<AudioUnavailable>,
    log: Arc<Mutex<OfflineLog>>,
}

impl OfflineBackend {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            open_error: None,
            start_error: None,
            log: Arc::default(),
        }
    }

    /// Every `open` fails with `error`.
    pub fn failing_open(mut self, error: AudioUnavailable) -> Self {
        self.open_error = Some(error);
        self
    }

    /// Contexts open, but `start` fails with `error`.
    pub fn failing_start(mut self, error: AudioUnavailable) -> Self {
        self.start_error = Some(error);
        self
    }

    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Contexts acquired so far.
    pub fn opened(&self) -> usize {
        self.log.lock().opened
    }

    /// Contexts released so far.
    pub fn closed(&self) -> usize {
        self.log.lock().closed
    }

    /// Contexts acquired but not yet released.
    pub fn live(&self) -> usize {
        let log = self.log.lock();
        log.opened - log.closed
    }

    /// Mono output of every successful playback, in start order.
    pub fn renders(&self) -> Vec<Vec<f32>> {
        self.log.lock().renders.clone()
    }

    pub fn last_render(&self) -> Option<Vec<f32>> {
        self.log.lock().renders.last().cloned()
    }
}

impl AudioBackend for OfflineBackend {
    type Context = OfflineContext;

    fn open(&self) -> Result<OfflineContext, AudioUnavailable> {
        if let Some(error) = &self.open_error {
            return Err(error.clone());
        }

        self.log.lock().opened += 1;
        Ok(OfflineContext {
            sample_rate: self.sample_rate,
            start_error: self.start_error.clone(),
            log: Arc::clone(&self.log),
            closed: false,
        })
    }
}

pub struct OfflineContext {
    sample_rate: f32,
    start_error: Option<AudioUnavailable>,
    log: Arc<Mutex<OfflineLog>>,
    closed: bool,
}

impl AudioContext for OfflineContext {
    fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    fn start(
        &mut self,
        graph: Box<dyn GraphNode>,
        duration: Duration,
    ) -> Result<(), AudioUnavailable> {
        if self.closed {
            return Err(AudioUnavailable::Closed);
        }
        if let Some(error) = &self.start_error {
            return Err(error.clone());
        }

        let mut output = vec![0.0; frames_for(duration, self.sample_rate)];
        Playhead::new(graph, self.sample_rate, duration).render_mono(&mut output);
        self.log.lock().renders.push(output);
        Ok(())
    }

    fn close(&mut self) {
        if !self.closed {
            self.closed = true;
            self.log.lock().closed += 1;
        }
    }
}
