//! Decaying white-noise bursts.

use rand::Rng;

use crate::dsp::envelope::exp_decay;

/// Uniform white noise in `[-amplitude, amplitude]` shaped by an exponential
/// decay whose time constant is `decay_fraction` of the buffer length.
#[derive(Debug, Clone, Copy)]
pub struct NoiseBurst {
    pub amplitude: f32,
    pub decay_fraction: f32,
}

impl NoiseBurst {
    pub fn new(amplitude: f32, decay_fraction: f32) -> Self {
        Self {
            amplitude,
            decay_fraction,
        }
    }

    /// Decay multiplier for sample `index` of a `len`-sample burst.
    #[inline]
    pub fn decay_at(&self, index: usize, len: usize) -> f32 {
        exp_decay(index, len, self.decay_fraction)
    }

    /// Fill `buffer` with one burst. The whole buffer is the burst, so its
    /// length sets the decay time constant.
    pub fn fill<R: Rng>(&self, buffer: &mut [f32], rng: &mut R) {
        let len = buffer.len();
        for (i, sample) in buffer.iter_mut().enumerate() {
            let white: f32 = rng.random_range(-1.0..=1.0);
            *sample = white * self.amplitude * self.decay_at(i, len);
        }
    }

    /// Allocate and fill a burst of `len` samples.
    pub fn render<R: Rng>(&self, len: usize, rng: &mut R) -> Vec<f32> {
        let mut buffer = vec![0.0; len];
        self.fill(&mut buffer, rng);
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn energy(samples: &[f32]) -> f32 {
        samples.iter().map(|s| s * s).sum()
    }

    #[test]
    fn samples_stay_within_amplitude() {
        let mut rng = StdRng::seed_from_u64(7);
        let burst = NoiseBurst::new(0.5, 0.2).render(3_840, &mut rng);

        assert_eq!(burst.len(), 3_840);
        assert!(burst.iter().all(|s| s.abs() <= 0.5));
        assert!(burst.iter().any(|s| s.abs() > 0.1));
    }

    #[test]
    fn burst_decays() {
        let mut rng = StdRng::seed_from_u64(11);
        let burst = NoiseBurst::new(0.5, 0.2).render(4_800, &mut rng);

        let head = energy(&burst[..1_200]);
        let tail = energy(&burst[3_600..]);
        assert!(head > tail * 100.0, "head={head}, tail={tail}");
    }

    #[test]
    fn each_sample_bounded_by_its_envelope() {
        let mut rng = StdRng::seed_from_u64(3);
        let noise = NoiseBurst::new(0.5, 0.2);
        let burst = noise.render(1_000, &mut rng);

        for (i, s) in burst.iter().enumerate() {
            assert!(s.abs() <= 0.5 * noise.decay_at(i, 1_000) + f32::EPSILON);
        }
    }

    #[test]
    fn seeded_bursts_repeat() {
        let noise = NoiseBurst::new(0.5, 0.2);
        let a = noise.render(256, &mut StdRng::seed_from_u64(42));
        let b = noise.render(256, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}
