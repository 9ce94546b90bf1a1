use crate::nav::Direction;

/// A short one-shot tone.
///
/// Forward and backward navigation ring at different pitches so the
/// direction is audible; taps sit above both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Next,
    Prev,
    Tap,
}

impl Cue {
    pub fn frequency(self) -> f32 {
        match self {
            Cue::Next => 880.0,   // A5
            Cue::Prev => 659.25,  // E5
            Cue::Tap => 1046.5,   // C6
        }
    }

    pub fn for_direction(direction: Direction) -> Self {
        match direction {
            Direction::Next => Cue::Next,
            Direction::Prev => Cue::Prev,
        }
    }
}
