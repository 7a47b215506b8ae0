/// Context passed to graph nodes during rendering
///
/// - sample_rate: rate of the context the graph plays through (e.g., 48000.0)
/// - frame: index of the first frame of the block being rendered
#[derive(Debug, Clone, Copy)]
pub struct RenderCtx {
    pub sample_rate: f32,
    pub frame: u64,
}

impl RenderCtx {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frame: 0,
        }
    }

    /// Context for the block that follows one of `frames` frames.
    pub fn advanced(&self, frames: usize) -> Self {
        Self {
            frame: self.frame + frames as u64,
            ..*self
        }
    }

    /// Playback time of the block start, in seconds.
    pub fn time(&self) -> f64 {
        self.frame as f64 / self.sample_rate as f64
    }
}

/// Core trait for audio processing graph nodes
///
/// Sources write into `out`, processors transform what is already there.
pub trait GraphNode: Send {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx);

    /// Check if this node is still producing sound
    fn is_active(&self) -> bool {
        true
    }
}

/// Allow boxed graph nodes to be used as graph nodes (for dynamic dispatch)
impl GraphNode for Box<dyn GraphNode> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        (**self).render_block(out, ctx)
    }

    fn is_active(&self) -> bool {
        (**self).is_active()
    }
}
