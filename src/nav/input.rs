//! Turning keys and drags into navigation commands.

use crossterm::event::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    GoTo(usize),
}

/// Right arrow and Enter go forward, left goes back, 1-9 jump to a card.
pub fn command_for_key(key: KeyCode) -> Option<NavCommand> {
    match key {
        KeyCode::Right | KeyCode::Enter => Some(NavCommand::Next),
        KeyCode::Left => Some(NavCommand::Prev),
        KeyCode::Char(c @ '1'..='9') => Some(NavCommand::GoTo(c as usize - '1' as usize)),
        _ => None,
    }
}

/// Horizontal swipe detection.
///
/// Distance is start minus end: dragging leftward (positive) goes to the
/// next card, rightward to the previous one. A press that never moves is a
/// tap, never a swipe.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    threshold: f32,
    start_x: Option<f32>,
    last_x: Option<f32>,
}

impl SwipeTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            start_x: None,
            last_x: None,
        }
    }

    pub fn begin(&mut self, x: f32) {
        self.start_x = Some(x);
        self.last_x = None;
    }

    pub fn update(&mut self, x: f32) {
        if self.start_x.is_some() {
            self.last_x = Some(x);
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start_x.is_some()
    }

    /// Finish the gesture. Always resets the tracker.
    pub fn end(&mut self) -> Option<NavCommand> {
        let (start, last) = (self.start_x.take(), self.last_x.take());
        let distance = start? - last?;

        if distance.abs() > self.threshold {
            Some(if distance > 0.0 {
                NavCommand::Next
            } else {
                NavCommand::Prev
            })
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_bindings() {
        assert_eq!(command_for_key(KeyCode::Right), Some(NavCommand::Next));
        assert_eq!(command_for_key(KeyCode::Enter), Some(NavCommand::Next));
        assert_eq!(command_for_key(KeyCode::Left), Some(NavCommand::Prev));
        assert_eq!(command_for_key(KeyCode::Char('3')), Some(NavCommand::GoTo(2)));
        assert_eq!(command_for_key(KeyCode::Char('0')), None);
        assert_eq!(command_for_key(KeyCode::Up), None);
    }

    #[test]
    fn swipe_left_goes_next() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.begin(300.0);
        swipe.update(240.0);
        assert_eq!(swipe.end(), Some(NavCommand::Next));
        assert!(!swipe.is_tracking());
    }

    #[test]
    fn swipe_right_goes_prev() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.begin(100.0);
        swipe.update(151.0);
        assert_eq!(swipe.end(), Some(NavCommand::Prev));
    }

    #[test]
    fn short_drag_and_tap_do_nothing() {
        let mut swipe = SwipeTracker::new(50.0);
        swipe.begin(100.0);
        swipe.update(150.0);
        assert_eq!(swipe.end(), None);

        swipe.begin(100.0);
        assert_eq!(swipe.end(), None);
    }
}
