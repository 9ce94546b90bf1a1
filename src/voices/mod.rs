//! Pre-built sound designs.
//!
//! ```ignore
//! use resonance::voices;
//!
//! let drone = voices::ambient(); // always running, gain-controlled by the mixer
//! let chime = voices::chime();   // one-shot, pitch taken from the cue
//! ```

mod ambient;
mod chime;

pub use ambient::ambient;
pub use chime::chime;
