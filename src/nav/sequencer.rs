//! Navigator - the card transition sequencer.
//!
//! Time is passed in rather than read from a clock. The interface loop
//! supplies `Instant::now()`; tests supply whatever instant they need.

use std::time::{Duration, Instant};

use tracing::debug;

use super::{
    interaction::{InteractionState, Tilt},
    Direction, NavCommand, NavigationState, TransitionAudio,
};
use crate::audio::Cue;

/// A transition waiting for its commit time.
#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    id: u64,
    target: usize,
    started: Instant,
    due: Instant,
}

pub struct Navigator {
    state: NavigationState,
    card_count: usize,
    delay: Duration,
    pending: Option<PendingTransition>,
    next_id: u64,
    interaction: InteractionState,
}

impl Navigator {
    /// A navigator over `card_count` cards, starting on the first.
    pub fn new(card_count: usize, delay: Duration) -> Self {
        Self {
            state: NavigationState::default(),
            card_count: card_count.max(1),
            delay,
            pending: None,
            next_id: 0,
            interaction: InteractionState::default(),
        }
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn direction(&self) -> Direction {
        self.state.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.state.is_transitioning
    }

    pub fn card_count(&self) -> usize {
        self.card_count
    }

    /// Card the pending transition will land on.
    pub fn pending_target(&self) -> Option<usize> {
        self.pending.map(|p| p.target)
    }

    /// Identity of the pending transition, if any.
    pub fn pending_id(&self) -> Option<u64> {
        self.pending.map(|p| p.id)
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn interaction_mut(&mut self) -> &mut InteractionState {
        &mut self.interaction
    }

    /// Request a move to `index`.
    ///
    /// Ignored while a transition is pending or when `index` is already
    /// current. Otherwise narration is stopped, the transition starts,
    /// interaction state is cleared and a directional cue plays. Returns
    /// whether the request was accepted.
    pub fn go_to<A: TransitionAudio + ?Sized>(
        &mut self,
        index: usize,
        now: Instant,
        audio: &mut A,
    ) -> bool {
        if self.state.is_transitioning || index == self.state.current_index {
            debug!(
                index,
                current = self.state.current_index,
                transitioning = self.state.is_transitioning,
                "navigation ignored"
            );
            return false;
        }
        debug_assert!(index < self.card_count, "card index {index} out of range");

        audio.stop_narration(&self.state);

        let direction = if index > self.state.current_index {
            Direction::Next
        } else {
            Direction::Prev
        };
        self.state.direction = direction;
        self.state.is_transitioning = true;
        self.interaction.reset_for_transition();

        self.next_id += 1;
        self.pending = Some(PendingTransition {
            id: self.next_id,
            target: index,
            started: now,
            due: now + self.delay,
        });

        audio.play_cue(Cue::for_direction(direction));
        debug!(from = self.state.current_index, to = index, ?direction, id = self.next_id, "transition started");
        true
    }

    /// Forward one card, wrapping from the last card to the first.
    pub fn go_next<A: TransitionAudio + ?Sized>(&mut self, now: Instant, audio: &mut A) -> bool {
        let current = self.state.current_index;
        let target = if current + 1 < self.card_count {
            current + 1
        } else {
            0
        };
        self.go_to(target, now, audio)
    }

    /// Back one card. Does nothing on the first card.
    pub fn go_prev<A: TransitionAudio + ?Sized>(&mut self, now: Instant, audio: &mut A) -> bool {
        match self.state.current_index.checked_sub(1) {
            Some(target) => self.go_to(target, now, audio),
            None => false,
        }
    }

    pub fn apply<A: TransitionAudio + ?Sized>(
        &mut self,
        command: NavCommand,
        now: Instant,
        audio: &mut A,
    ) -> bool {
        match command {
            NavCommand::Next => self.go_next(now, audio),
            NavCommand::Prev => self.go_prev(now, audio),
            NavCommand::GoTo(index) if index < self.card_count => self.go_to(index, now, audio),
            NavCommand::GoTo(_) => false,
        }
    }

    /// Commit the pending transition once it is due.
    ///
    /// Index and flag change together. Returns the new index on commit.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let pending = self.pending?;
        if now < pending.due {
            return None;
        }

        self.pending = None;
        self.state.current_index = pending.target;
        self.state.is_transitioning = false;
        debug!(index = pending.target, id = pending.id, "transition committed");
        Some(pending.target)
    }

    /// Drop a pending transition without committing it.
    ///
    /// Used on teardown so nothing fires against discarded state.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug!(id = pending.id, "transition cancelled");
        }
        self.state.is_transitioning = false;
    }

    /// Fraction of the pending transition elapsed, 0.0 - 1.0.
    pub fn transition_progress(&self, now: Instant) -> Option<f32> {
        let pending = self.pending?;
        let total = pending.due.saturating_duration_since(pending.started);
        if total.is_zero() {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(pending.started);
        Some((elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0))
    }

    /// Pointer moved over the card; positions are relative, 0.0 - 1.0.
    pub fn pointer_moved(&mut self, rel_x: f32, rel_y: f32) {
        if self.state.is_transitioning {
            return;
        }
        self.interaction.tilt = Tilt::from_pointer(rel_x, rel_y);
    }

    pub fn pointer_left(&mut self) {
        self.interaction.tilt = Tilt::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::Silent;

    const DELAY: Duration = Duration::from_millis(700);

    #[test]
    fn go_to_commits_after_delay() {
        let t0 = Instant::now();
        let mut nav = Navigator::new(5, DELAY);

        assert!(nav.go_to(3, t0, &mut Silent));
        assert!(nav.is_transitioning());
        assert_eq!(nav.current_index(), 0);

        assert_eq!(nav.tick(t0 + Duration::from_millis(699)), None);
        assert_eq!(nav.current_index(), 0);

        assert_eq!(nav.tick(t0 + DELAY), Some(3));
        assert_eq!(nav.current_index(), 3);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn same_index_is_ignored() {
        let mut nav = Navigator::new(5, DELAY);
        assert!(!nav.go_to(0, Instant::now(), &mut Silent));
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn cancel_drops_pending_transition() {
        let t0 = Instant::now();
        let mut nav = Navigator::new(5, DELAY);
        nav.go_to(2, t0, &mut Silent);
        nav.cancel();

        assert_eq!(nav.tick(t0 + DELAY * 2), None);
        assert_eq!(nav.current_index(), 0);
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn progress_runs_from_zero_to_one() {
        let t0 = Instant::now();
        let mut nav = Navigator::new(3, DELAY);
        assert_eq!(nav.transition_progress(t0), None);

        nav.go_next(t0, &mut Silent);
        assert_eq!(nav.transition_progress(t0), Some(0.0));
        let half = nav.transition_progress(t0 + DELAY / 2).unwrap();
        assert!((half - 0.5).abs() < 1e-3);
        assert_eq!(nav.transition_progress(t0 + DELAY * 3), Some(1.0));
    }

    #[test]
    fn tilt_is_frozen_during_transition_and_reset_by_it() {
        let t0 = Instant::now();
        let mut nav = Navigator::new(3, DELAY);
        nav.pointer_moved(1.0, 1.0);
        assert!(!nav.interaction().tilt.is_flat());

        nav.go_next(t0, &mut Silent);
        assert!(nav.interaction().tilt.is_flat());

        nav.pointer_moved(0.0, 0.0);
        assert!(nav.interaction().tilt.is_flat());
    }

    #[test]
    fn out_of_range_jump_is_rejected() {
        let mut nav = Navigator::new(3, DELAY);
        assert!(!nav.apply(NavCommand::GoTo(7), Instant::now(), &mut Silent));
        assert!(!nav.is_transitioning());
    }
}
