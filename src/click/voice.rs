//! The click graph.
//!
//! ```text
//! BufferSource (decaying noise) → FilterNode (high-pass) → GainNode (ramp)
//! ```
//!
//! 1. White noise at half amplitude, fading with `e^(-i / (N * 0.2))`
//! 2. High-pass at 1.8 kHz strips the rumble, leaving a bright transient
//! 3. The gain falls from `0.75 * volume` to 0.001 over the same 80 ms

use rand::Rng;

use crate::{
    click::ClickConfig,
    dsp::noise::NoiseBurst,
    graph::{
        buffer::BufferSource, extensions::NodeExt, filter::FilterNode, gain::GainNode,
        through::Through,
    },
    output::frames_for,
};

pub type ClickGraph = Through<Through<BufferSource, FilterNode>, GainNode>;

/// Build a fresh click graph for a context running at `sample_rate`.
pub fn click_graph<R: Rng>(
    config: &ClickConfig,
    sample_rate: f32,
    volume: f32,
    rng: &mut R,
) -> ClickGraph {
    let len = frames_for(config.duration, sample_rate);
    let noise = NoiseBurst::new(config.amplitude, config.decay_fraction).render(len, rng);

    BufferSource::new(noise)
        .through(FilterNode::highpass(config.cutoff_hz).with_resonance_db(config.resonance_db))
        .through(GainNode::ramp(
            config.gain_start(volume),
            config.gain_floor,
            len,
        ))
}
