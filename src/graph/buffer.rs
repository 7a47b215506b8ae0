use crate::graph::node::{GraphNode, RenderCtx};

/// Plays a prerendered mono buffer once, then outputs silence.
pub struct BufferSource {
    samples: Vec<f32>,
    position: usize,
}

impl BufferSource {
    pub fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            position: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

impl GraphNode for BufferSource {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        let remaining = &self.samples[self.position..];
        let n = remaining.len().min(out.len());

        out[..n].copy_from_slice(&remaining[..n]);
        out[n..].fill(0.0);
        self.position += n;
    }

    fn is_active(&self) -> bool {
        self.position < self.samples.len()
    }
}
