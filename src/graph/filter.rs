use crate::{
    dsp::filter::{q_from_db, FilterType, SVFilter},
    graph::node::{GraphNode, RenderCtx},
};

/*
Filter Node
===========

Wraps the state-variable filter for use inside a graph.

Highpass (HP): passes frequencies ABOVE the cutoff, attenuates below.
  - Removes low-end rumble and muddiness
  - Turns broadband noise into a thin, bright transient
  - Use: hi-hats, clicks, ticks

Lowpass (LP): passes frequencies BELOW the cutoff.
  - Use: softening noise, "thock" variants of the click

Cutoff (Hz): where the filter takes effect. Clamped under Nyquist at render
time, so a graph built for 48 kHz still renders safely at 8 kHz.

Resonance: emphasis at the cutoff. `with_resonance_db` takes the browser
biquad convention (dB of peak gain); `with_q` takes a linear Q.
*/

pub struct FilterNode {
    filter: SVFilter,
}

impl FilterNode {
    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::lowpass(cutoff_hz),
        }
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self {
            filter: SVFilter::highpass(cutoff_hz),
        }
    }

    pub fn with_q(mut self, q: f32) -> Self {
        self.filter.set_q(q);
        self
    }

    pub fn with_resonance_db(self, resonance_db: f32) -> Self {
        self.with_q(q_from_db(resonance_db))
    }

    pub fn cutoff(&self) -> f32 {
        self.filter.cutoff()
    }

    pub fn q(&self) -> f32 {
        self.filter.q()
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter.filter_type()
    }
}

impl GraphNode for FilterNode {
    fn render_block(&mut self, out: &mut [f32], ctx: &RenderCtx) {
        self.filter.render(out, ctx);
    }
}
