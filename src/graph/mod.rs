//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with block-based rendering
//! and gain automation. The `extensions` module adds fluent helpers so a
//! chain reads in signal order.

/// One-shot playback of a prerendered buffer.
pub mod buffer;
/// Fluent combinators (`.through()`, `.gain()`).
pub mod extensions;
/// Topology-preserving filter node.
pub mod filter;
/// Constant and ramped gain stages.
pub mod gain;
/// Core traits shared by all graph nodes.
pub mod node;
/// Serial chaining of two nodes (source → effect).
pub mod through;

pub use node::{GraphNode, RenderCtx};
