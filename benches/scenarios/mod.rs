//! Real-world scenario benchmarks.
//!
//! The voices the mixer actually plays, and whole mixer blocks in the states
//! a presentation passes through.

mod mix;
mod voices;

pub use mix::bench_mixer;
pub use voices::bench_voices;
