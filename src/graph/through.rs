use crate::graph::node::{GraphNode, RenderCtx};

/*
Serial Signal Chain (Through)
=============================

Through connects two nodes in series: the first renders into the block, the
second processes that block in place.

  [BufferSource] ──→ [FilterNode] ──→ [GainNode] ──→ sink

A click is exactly this chain, written as

    BufferSource::new(noise)
        .through(FilterNode::highpass(1_800.0))
        .through(GainNode::ramp(0.75, 0.001, 3_840))
*/

pub struct Through<S, F> {
    source: S,
    effect: F,
}

impl<S, F> Through<S, F> {
    pub fn new(source: S, effect: F) -> Self {
        Self { source, effect }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn effect(&self) -> &F {
        &self.effect
    }
}

impl<S: GraphNode, F: GraphNode> GraphNode for Through<S, F> {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.source.render_block(out, ctx);
        self.effect.render_block(out, ctx);
    }

    fn is_active(&self) -> bool {
        self.source.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{buffer::BufferSource, extensions::NodeExt, gain::GainNode};

    #[test]
    fn renders_source_then_effect() {
        let mut node = BufferSource::new(vec![1.0; 64]).gain(0.5);
        let mut buffer = vec![0.0; 64];
        node.render_block(&mut buffer, &RenderCtx::new(48_000.0));

        assert!(buffer.iter().all(|&sample| sample == 0.5));
    }

    #[test]
    fn activity_follows_source() {
        let mut node = BufferSource::new(vec![1.0; 16]).through(GainNode::constant(1.0));
        let mut buffer = vec![0.0; 32];
        node.render_block(&mut buffer, &RenderCtx::new(48_000.0));

        assert!(!node.is_active());
    }
}
