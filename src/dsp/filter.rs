use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::graph::node::RenderCtx;

/*
| type              | passes          | rejects      |
| ----------------- | --------------- | ------------ |
| low-pass          | below cutoff    | above cutoff |
| high-pass         | above cutoff    | below cutoff |
| band-pass         | around cutoff   | outside      |
| notch / band-stop | outside         | at cutoff    |

Q and damping
-------------

The TPT state-variable filter is parameterized by a damping factor `k`.
For a second-order section the relationship to the quality factor is simply

    k = 1 / Q

Q = 0.7071 (1/sqrt 2) is the Butterworth response: flat passband, no peak.
Above that the response grows a resonant bump at the cutoff. Browser biquads
take the high/low-pass "Q" in decibels of peak gain instead, so a resonance
of 1.5 dB corresponds to a linear Q of 10^(1.5 / 20) ≈ 1.189.
*/

/// Lowest Q accepted, keeps `k` finite.
const MIN_Q: f32 = 1.0e-3;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterType {
    LowPass,
    HighPass,
    BandPass,
    Notch,
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
    pub notch: f32,
}

/// Convert a resonance given in dB of peak gain into a linear Q.
#[inline]
pub fn q_from_db(resonance_db: f32) -> f32 {
    10.0_f32.powf(resonance_db / 20.0)
}

pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory

    cutoff_hz: f32,
    q: f32,
    filter_type: FilterType,
}

impl SVFilter {
    pub fn new(filter_type: FilterType, cutoff_hz: f32, q: f32) -> Self {
        Self {
            ic1eq: 0.0,
            ic2eq: 0.0,
            cutoff_hz,
            q: q.max(MIN_Q),
            filter_type,
        }
    }

    pub fn lowpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::LowPass, cutoff_hz, std::f32::consts::FRAC_1_SQRT_2)
    }

    pub fn highpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::HighPass, cutoff_hz, std::f32::consts::FRAC_1_SQRT_2)
    }

    pub fn bandpass(cutoff_hz: f32) -> Self {
        Self::new(FilterType::BandPass, cutoff_hz, std::f32::consts::FRAC_1_SQRT_2)
    }

    pub fn notch(cutoff_hz: f32) -> Self {
        Self::new(FilterType::Notch, cutoff_hz, std::f32::consts::FRAC_1_SQRT_2)
    }

    /// Prewarped integrator gain. The cutoff is pulled just under Nyquist so
    /// low device rates can't push `tan` past its pole.
    #[inline]
    fn compute_g(&self, ctx: &RenderCtx) -> f32 {
        let nyquist = 0.5 * ctx.sample_rate;
        let cutoff = self.cutoff_hz.clamp(1.0, nyquist * 0.99);
        (TAU * cutoff / (2.0 * ctx.sample_rate)).tan()
    }

    #[inline]
    fn damping(&self) -> f32 {
        1.0 / self.q
    }

    pub fn next_sample(&mut self, sample: f32, k: f32, g: f32) -> FilterOutputs {
        let h = 1.0 / (1.0 + g * (g + k));
        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = 2.0 * v1 - self.ic1eq;
        self.ic2eq = 2.0 * v2 - self.ic2eq;

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
            notch: sample - k * v1,
        }
    }

    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        let g = self.compute_g(ctx);
        let k = self.damping();

        for sample in buffer.iter_mut() {
            let outputs = self.next_sample(*sample, k, g);

            *sample = match self.filter_type {
                FilterType::LowPass => outputs.lowpass,
                FilterType::HighPass => outputs.highpass,
                FilterType::BandPass => outputs.bandpass,
                FilterType::Notch => outputs.notch,
            }
        }
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }

    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.cutoff_hz = cutoff;
    }

    pub fn set_q(&mut self, q: f32) {
        self.q = q.max(MIN_Q);
    }

    pub fn cutoff(&self) -> f32 {
        self.cutoff_hz
    }

    pub fn q(&self) -> f32 {
        self.q
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::amplify::peak;

    fn sine(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|n| (TAU * freq * n as f32 / sample_rate).sin())
            .collect()
    }

    fn peak_after_transient(buffer: &[f32]) -> f32 {
        let skip = buffer.len().min(64);
        peak(buffer.get(skip..).unwrap_or(buffer))
    }

    #[test]
    fn test_lowpass_passes_dc() {
        let mut filter = SVFilter::lowpass(500.0);
        let mut buffer = vec![1.0; 256];
        let ctx = RenderCtx::new(48_000.0);

        filter.render(&mut buffer, &ctx);

        assert!(buffer[255] > 0.99, "got {}", buffer[255]);
    }

    #[test]
    fn test_highpass_blocks_dc() {
        let mut filter = SVFilter::highpass(500.0);
        let mut buffer = vec![1.0; 512];
        let ctx = RenderCtx::new(48_000.0);

        filter.render(&mut buffer, &ctx);

        assert!(buffer[511].abs() < 0.001, "got {}", buffer[511]);
    }

    #[test]
    fn test_highpass_attenuates_rumble_keeps_treble() {
        let sample_rate = 48_000.0;
        let ctx = RenderCtx::new(sample_rate);

        let mut filter = SVFilter::new(FilterType::HighPass, 1_800.0, q_from_db(1.5));
        let mut low = sine(100.0, sample_rate, 2048);
        filter.render(&mut low, &ctx);
        let low_peak = peak_after_transient(&low[1024..]);

        filter.reset();
        let mut high = sine(6_000.0, sample_rate, 2048);
        filter.render(&mut high, &ctx);
        let high_peak = peak_after_transient(&high[1024..]);

        assert!(low_peak < 0.01, "rumble leaked through: {low_peak}");
        assert!(high_peak > 0.9, "treble attenuated: {high_peak}");
    }

    #[test]
    fn test_resonance_peaks_at_cutoff() {
        let sample_rate = 48_000.0;
        let cutoff = 1_000.0;
        let ctx = RenderCtx::new(sample_rate);

        let mut flat = SVFilter::new(FilterType::HighPass, cutoff, 0.5);
        let mut buffer = sine(cutoff, sample_rate, 2048);
        flat.render(&mut buffer, &ctx);
        let flat_peak = peak_after_transient(&buffer[1024..]);

        let mut peaky = SVFilter::new(FilterType::HighPass, cutoff, 4.0);
        let mut buffer = sine(cutoff, sample_rate, 2048);
        peaky.render(&mut buffer, &ctx);
        let peaky_peak = peak_after_transient(&buffer[1024..]);

        assert!(
            peaky_peak > flat_peak * 2.0,
            "expected resonant peak: q4={peaky_peak}, q0.5={flat_peak}"
        );
    }

    #[test]
    fn test_notch_rejects_cutoff_frequency() {
        let sample_rate = 48_000.0;
        let cutoff = 1_000.0;
        let ctx = RenderCtx::new(sample_rate);

        let mut filter = SVFilter::new(FilterType::Notch, cutoff, 2.0);
        let mut center = sine(cutoff, sample_rate, 4096);
        filter.render(&mut center, &ctx);
        let center_peak = peak_after_transient(&center[2048..]);

        filter.reset();
        let mut off = sine(200.0, sample_rate, 4096);
        filter.render(&mut off, &ctx);
        let off_peak = peak_after_transient(&off[2048..]);

        assert!(
            center_peak * 2.0 < off_peak,
            "expected notch to reject center freq, got center={center_peak}, off={off_peak}"
        );
    }

    #[test]
    fn test_q_from_db() {
        assert!((q_from_db(0.0) - 1.0).abs() < 1e-6);
        assert!((q_from_db(1.5) - 1.188_502).abs() < 1e-4);
        assert!((q_from_db(20.0) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_cutoff_above_nyquist_stays_stable() {
        let mut filter = SVFilter::highpass(30_000.0);
        let ctx = RenderCtx::new(22_050.0);
        let mut buffer = sine(440.0, 22_050.0, 512);

        filter.render(&mut buffer, &ctx);

        assert!(buffer.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn test_setters() {
        let mut filter = SVFilter::highpass(1000.0);
        filter.set_cutoff(1800.0);
        filter.set_q(0.0);

        assert!((filter.cutoff() - 1800.0).abs() < 0.1);
        assert!(filter.q() > 0.0);
        assert_eq!(filter.filter_type(), FilterType::HighPass);
    }
}
