/*
Exponential Envelopes
=====================

Two exponential curves shape a click.

Noise decay
-----------

The raw burst is scaled by

    decay(i) = e^(-i / (N * f))

with N the burst length in samples and f the decay fraction (0.2 for a
click). After one fifth of the buffer the level has fallen to 1/e ≈ 0.37,
by the end to e^-5 ≈ 0.007. A fast fall like this is heard as a transient,
not as hiss.

Gain ramp
---------

The gain stage goes from `start` to `end` along a geometric curve:

    v(t) = start * (end / start)^(t / T)        0 <= t < T
    v(t) = end                                  t >= T

Equal fractions of time multiply the level by equal ratios, so the fade
sounds even to the ear. Both endpoints must share a sign and neither may be
zero; a ramp built with a non-positive endpoint falls back to a straight
line, which still lands exactly on `end`.

  Level
  start ┐╲
        │ ╲
        │  ╲__
        │     ‾‾──___
    end └────────────‾‾‾──── → time
        0              T
*/

/// `e^(-index / (len * fraction))`, the per-sample noise decay.
#[inline]
pub fn exp_decay(index: usize, len: usize, fraction: f32) -> f32 {
    let time_constant = len as f32 * fraction;
    if time_constant <= 0.0 {
        return if index == 0 { 1.0 } else { 0.0 };
    }
    (-(index as f32) / time_constant).exp()
}

/// Exponential ramp between two levels over a fixed number of samples.
#[derive(Debug, Clone, Copy)]
pub struct ExpRamp {
    start: f32,
    end: f32,
    duration_samples: usize,
}

impl ExpRamp {
    pub fn new(start: f32, end: f32, duration_samples: usize) -> Self {
        Self {
            start,
            end,
            duration_samples,
        }
    }

    pub fn start(&self) -> f32 {
        self.start
    }

    pub fn end(&self) -> f32 {
        self.end
    }

    pub fn duration_samples(&self) -> usize {
        self.duration_samples
    }

    fn is_geometric(&self) -> bool {
        self.start > 0.0 && self.end > 0.0
    }

    /// Level at the given sample offset from the start of the ramp.
    pub fn value_at(&self, sample: usize) -> f32 {
        if sample >= self.duration_samples {
            return self.end;
        }

        let progress = sample as f32 / self.duration_samples as f32;
        if self.is_geometric() {
            self.start * (self.end / self.start).powf(progress)
        } else {
            self.start + (self.end - self.start) * progress
        }
    }

    /// Render consecutive ramp values starting at `offset`.
    pub fn render(&self, buffer: &mut [f32], offset: usize) {
        for (i, sample) in buffer.iter_mut().enumerate() {
            *sample = self.value_at(offset + i);
        }
    }
}
