//! Card navigation.
//!
//! The [`Navigator`] is a two-state machine, Idle and Transitioning. An
//! accepted request flips it to Transitioning; the index only moves when the
//! transition delay has passed and [`Navigator::tick`] commits it.

mod input;
mod interaction;
mod sequencer;

pub use input::{command_for_key, NavCommand, SwipeTracker};
pub use interaction::{InteractionState, Ripple, Tilt, MAX_TILT_DEG};
pub use sequencer::Navigator;

use crate::audio::Cue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Next,
    Prev,
}

/// Observable navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigationState {
    pub current_index: usize,
    pub direction: Direction,
    pub is_transitioning: bool,
}

/// What the navigator needs from the audio side.
///
/// `stop_narration` is always called with the state as it was *before* the
/// transition flag flips, so narration of the outgoing card is silenced
/// first. `play_cue` follows once the transition has begun.
pub trait TransitionAudio {
    fn stop_narration(&mut self, outgoing: &NavigationState);

    fn play_cue(&mut self, cue: Cue);
}

/// Audio that ignores everything, for headless navigation.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl TransitionAudio for Silent {
    fn stop_narration(&mut self, _outgoing: &NavigationState) {}

    fn play_cue(&mut self, _cue: Cue) {}
}
