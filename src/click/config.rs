use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of the synthesized click.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ClickConfig {
    /// Length of the noise burst and of the gain ramp.
    pub duration: Duration,
    /// Time from start until the context is released.
    pub release_delay: Duration,
    /// Peak amplitude of the raw noise.
    pub amplitude: f32,
    /// Noise decay time constant as a fraction of the burst length.
    pub decay_fraction: f32,
    pub cutoff_hz: f32,
    /// High-pass resonance in dB of peak gain.
    pub resonance_db: f32,
    /// Gain at the start of the ramp is `gain_scale * volume`.
    pub gain_scale: f32,
    /// Level the gain ramp settles on.
    pub gain_floor: f32,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(80),
            release_delay: Duration::from_millis(100),
            amplitude: 0.5,
            decay_fraction: 0.2,
            cutoff_hz: 1_800.0,
            resonance_db: 1.5,
            gain_scale: 0.75,
            gain_floor: 0.001,
        }
    }
}

impl ClickConfig {
    /// Gain the ramp starts from at the given volume.
    pub fn gain_start(&self, volume: f32) -> f32 {
        self.gain_scale * volume
    }
}
