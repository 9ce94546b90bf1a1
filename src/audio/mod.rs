//! The audio engine: ambient drone, interaction cues and narration playback.
//!
//! Control lives on the interface thread in [`AudioEngine`]; sound is made on
//! the audio thread by a [`Mixer`]. The two talk over lock-free ring buffers,
//! commands one way and [`MixerEvent`]s back.

mod backend;
mod cue;
mod engine;
mod mixer;

pub use backend::{AudioBackend, CpalBackend, OfflineBackend};
pub use cue::Cue;
pub use engine::{AudioEngine, AudioSessionState, NarrationPhase};
pub use mixer::{Mixer, MixerCommand, MixerEvent, MixerLink};
