//! Processing contexts: where a click graph actually plays.
//!
//! An [`AudioBackend`] hands out one [`AudioContext`] per playback. A context
//! reports its sample rate, plays exactly one graph, and is closed when the
//! session ends. [`ContextGuard`] ties that close to scope so every exit path
//! releases the device.

use std::ops::{Deref, DerefMut};
use std::time::Duration;

use crate::error::AudioUnavailable;
use crate::graph::node::{GraphNode, RenderCtx};
use crate::MAX_BLOCK_SIZE;

/// Real output devices via cpal.
pub mod device;
/// In-memory rendering for tests, benches and headless runs.
pub mod offline;

pub use device::{CpalBackend, CpalContext};
pub use offline::{OfflineBackend, OfflineContext};

/// Source of processing contexts. Shared across playback workers.
pub trait AudioBackend: Send + Sync + 'static {
    type Context: AudioContext;

    fn open(&self) -> Result<Self::Context, AudioUnavailable>;
}

/// One acquired audio output pipeline.
pub trait AudioContext {
    /// Native rate of the output, in Hz.
    fn sample_rate(&self) -> f32;

    /// Start playing `graph` now; output goes silent after `duration`.
    fn start(
        &mut self,
        graph: Box<dyn GraphNode>,
        duration: Duration,
    ) -> Result<(), AudioUnavailable>;

    /// Release the underlying resources. Called once, by [`ContextGuard`].
    fn close(&mut self);
}

/// Frames covering `duration` at `sample_rate`, rounded to the nearest frame.
pub fn frames_for(duration: Duration, sample_rate: f32) -> usize {
    (sample_rate as f64 * duration.as_secs_f64()).round() as usize
}

/// Scoped ownership of a context; closes it when dropped.
pub struct ContextGuard<C: AudioContext> {
    context: C,
}

impl<C: AudioContext> ContextGuard<C> {
    pub fn new(context: C) -> Self {
        Self { context }
    }
}

impl<C: AudioContext> Deref for ContextGuard<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.context
    }
}

impl<C: AudioContext> DerefMut for ContextGuard<C> {
    fn deref_mut(&mut self) -> &mut C {
        &mut self.context
    }
}

impl<C: AudioContext> Drop for ContextGuard<C> {
    fn drop(&mut self) {
        self.context.close();
    }
}

/// Pulls a graph block by block and cuts it off at the stop frame.
pub(crate) struct Playhead {
    graph: Box<dyn GraphNode>,
    ctx: RenderCtx,
    stop_frame: u64,
    block: Vec<f32>,
}

impl Playhead {
    pub(crate) fn new(graph: Box<dyn GraphNode>, sample_rate: f32, duration: Duration) -> Self {
        Self {
            graph,
            ctx: RenderCtx::new(sample_rate),
            stop_frame: frames_for(duration, sample_rate) as u64,
            block: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.ctx.frame >= self.stop_frame
    }

    /// Render mono frames into `out`, silence past the stop frame.
    pub(crate) fn render_mono(&mut self, out: &mut [f32]) {
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let remaining = self.stop_frame.saturating_sub(self.ctx.frame) as usize;
            let live = remaining.min(chunk.len());

            if live > 0 {
                self.graph.render_block(&mut chunk[..live], &self.ctx);
            }
            chunk[live..].fill(0.0);
            self.ctx = self.ctx.advanced(chunk.len());
        }
    }

    /// Render into an interleaved device buffer, copying mono to every channel.
    pub(crate) fn render_interleaved(&mut self, data: &mut [f32], channels: usize) {
        let channels = channels.max(1);
        let total_frames = data.len() / channels;
        let mut frames_written = 0;

        while frames_written < total_frames {
            let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
            let mut block = std::mem::take(&mut self.block);
            self.render_mono(&mut block[..frames]);

            let out_off = frames_written * channels;
            for (i, &s) in block[..frames].iter().enumerate() {
                let frame = out_off + i * channels;
                data[frame..frame + channels].fill(s);
            }

            self.block = block;
            frames_written += frames;
        }
    }
}
