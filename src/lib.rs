pub mod audio; // Ambient engine, cues, narration playback
pub mod cards;
pub mod config;
pub mod dsp;
pub mod error;
pub mod graph; // Composable audio graph nodes
pub mod narration; // Speech-generation service client
pub mod nav; // Card navigation and input handling
pub mod voices;

pub use cards::{Card, PrepTime, CARDS};
pub use config::Settings;
pub use error::{AudioError, NarrationError};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
