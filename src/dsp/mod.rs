//! Low-level DSP primitives used by the graph nodes and the mixer.
//!
//! These components are allocation-free once constructed and safe to run
//! inside the audio callback. The exceptions are [`pcm`] and [`resample`],
//! which prepare narration clips on the control side before they are handed
//! to the audio thread.

/// Attack/decay/sustain/release envelope generator.
pub mod envelope;
/// Oscillator waveforms and noise sources.
pub mod oscillator;
/// Base64 PCM decoding for narration payloads.
pub mod pcm;
/// Linear gain ramps for fades and ducking.
pub mod ramp;
/// Sample-rate conversion for narration clips.
pub mod resample;

pub use envelope::EnvelopeState;
