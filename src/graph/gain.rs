use crate::{
    dsp::{
        amplify::{apply_gain, multiply_in_place},
        envelope::ExpRamp,
    },
    graph::node::{GraphNode, RenderCtx},
    MAX_BLOCK_SIZE,
};

/// Gain automation applied by a [`GainNode`].
#[derive(Debug, Clone, Copy)]
pub enum GainCurve {
    Constant(f32),
    /// Exponential ramp anchored at the node's first rendered frame.
    Ramp(ExpRamp),
}

/// Multiplies the incoming block by a constant or ramped gain.
pub struct GainNode {
    curve: GainCurve,
    elapsed: usize,
    scratch: Vec<f32>,
}

impl GainNode {
    fn new(curve: GainCurve) -> Self {
        Self {
            curve,
            elapsed: 0,
            scratch: vec![0.0; MAX_BLOCK_SIZE],
        }
    }

    pub fn constant(gain: f32) -> Self {
        Self::new(GainCurve::Constant(gain))
    }

    /// Start at `start`, reach `end` after `duration_samples`, hold `end`.
    pub fn ramp(start: f32, end: f32, duration_samples: usize) -> Self {
        Self::new(GainCurve::Ramp(ExpRamp::new(start, end, duration_samples)))
    }

    pub fn curve(&self) -> GainCurve {
        self.curve
    }

    /// Gain that will be applied to the next rendered frame.
    pub fn current_gain(&self) -> f32 {
        match self.curve {
            GainCurve::Constant(gain) => gain,
            GainCurve::Ramp(ramp) => ramp.value_at(self.elapsed),
        }
    }
}

impl GraphNode for GainNode {
    fn render_block(&mut self, out: &mut [f32], _ctx: &RenderCtx) {
        match self.curve {
            GainCurve::Constant(gain) => {
                apply_gain(out, gain);
                self.elapsed += out.len();
            }
            GainCurve::Ramp(ramp) => {
                // Blocks larger than the scratch buffer go through in chunks.
                for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
                    let gains = &mut self.scratch[..chunk.len()];
                    ramp.render(gains, self.elapsed);
                    multiply_in_place(chunk, gains);
                    self.elapsed += chunk.len();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_gain_scales_block() {
        let mut node = GainNode::constant(0.25);
        let mut buffer = [1.0, -1.0, 0.5];
        node.render_block(&mut buffer, &RenderCtx::new(48_000.0));
        assert_eq!(buffer, [0.25, -0.25, 0.125]);
    }

    #[test]
    fn ramp_continues_across_blocks() {
        let mut node = GainNode::ramp(0.75, 0.001, 3_840);
        let ctx = RenderCtx::new(48_000.0);

        assert_eq!(node.current_gain(), 0.75);

        let mut first = vec![1.0; 1_920];
        node.render_block(&mut first, &ctx);
        assert_eq!(first[0], 0.75);

        let halfway = (0.75f32 * 0.001).sqrt();
        assert!((node.current_gain() - halfway).abs() < 1e-4);

        let mut second = vec![1.0; 4_096];
        node.render_block(&mut second, &ctx.advanced(1_920));
        assert!(second[0] < first[1_919]);
        assert_eq!(second[4_095], 0.001);
        assert_eq!(node.current_gain(), 0.001);
    }
}
