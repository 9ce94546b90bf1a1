//! Composable building blocks for the ambient drone and the cue chimes.
//!
//! Graph nodes wrap the low-level DSP primitives with a gate (`trigger` /
//! `release`) and block rendering. The `extensions` module adds the fluent
//! `.mix()` / `.amplify()` helpers the voices are written with.

/// Multiply two signals together (amplitude control, tremolo).
pub mod amplify;
/// Envelope generator node.
pub mod envelope;
/// Fluent combinators (`.amplify()`, `.mix()`).
pub mod extensions;
/// Low frequency oscillators for slow movement.
pub mod lfo;
/// Linear balance mixing of two graphs.
pub mod mix;
/// Core traits shared by all graph nodes.
pub mod node;
/// Audio-band oscillators.
pub mod oscillator;

pub use extensions::NodeExt;
pub use node::{GraphNode, RenderCtx};
