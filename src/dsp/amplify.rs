//! Signal multiplication primitive.

/*
Gain
====

    output[i] = signal[i] × gain[i]

  gain > 1.0  →  louder (and risks clipping past ±1.0 at the device)
  gain = 1.0  →  unchanged
  gain < 1.0  →  quieter
  gain = 0.0  →  silence

In decibels, dB = 20 × log₁₀(gain):

    ×0.75   ≈  -2.5 dB  (full-volume click)
    ×0.375  ≈  -8.5 dB  (click at half volume)
    ×0.001  =  -60 dB   (the tail floor, inaudible under any real mix)

A gain envelope is just a per-sample gain: render the envelope into a
scratch buffer and multiply it in place.
*/

/// Multiply a signal by a constant gain factor (in-place).
#[inline]
pub fn apply_gain(signal: &mut [f32], gain: f32) {
    for sample in signal.iter_mut() {
        *sample *= gain;
    }
}

/// Multiply a signal by a per-sample gain, writing into the signal buffer.
#[inline]
pub fn multiply_in_place(signal: &mut [f32], gain: &[f32]) {
    debug_assert_eq!(signal.len(), gain.len());

    for (s, &g) in signal.iter_mut().zip(gain.iter()) {
        *s *= g;
    }
}

/// Peak absolute sample value.
#[inline]
pub fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}
