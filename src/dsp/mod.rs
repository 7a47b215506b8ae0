//! Low-level DSP primitives used by the higher level graph nodes.
//!
//! These stay focused on the signal-processing math; the graph nodes layer
//! block rendering and automation on top.

/// Gain and signal multiplication.
pub mod amplify;
/// Exponential decay and exponential gain ramps.
pub mod envelope;
/// State-variable filter implementation with multiple responses.
pub mod filter;
/// Decaying white-noise bursts.
pub mod noise;
