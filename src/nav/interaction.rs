//! Transient, presentation-facing state that navigation clears.

use std::time::{Duration, Instant};

/// Largest tilt, in degrees, on either axis.
pub const MAX_TILT_DEG: f32 = 6.0;

/// Pointer-driven card tilt in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tilt {
    /// Rotation about the horizontal axis (pointer up/down).
    pub x: f32,
    /// Rotation about the vertical axis (pointer left/right).
    pub y: f32,
}

impl Tilt {
    /// Tilt from a pointer position relative to the card, each axis in 0.0..=1.0.
    pub fn from_pointer(rel_x: f32, rel_y: f32) -> Self {
        let dx = rel_x.clamp(0.0, 1.0) - 0.5;
        let dy = rel_y.clamp(0.0, 1.0) - 0.5;
        Self {
            x: dy * 2.0 * MAX_TILT_DEG,
            y: -dx * 2.0 * MAX_TILT_DEG,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    pub x: u16,
    pub y: u16,
    pub born: Instant,
}

impl Ripple {
    /// 0.0 when born, 1.0 when expired.
    pub fn age(&self, now: Instant, lifetime: Duration) -> f32 {
        if lifetime.is_zero() {
            return 1.0;
        }
        (now.saturating_duration_since(self.born).as_secs_f32() / lifetime.as_secs_f32()).min(1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub tilt: Tilt,
    /// Index into the current card's definitions, when the popover is open.
    pub active_definition: Option<usize>,
    /// User-visible, dismissible error text.
    pub error: Option<String>,
    pub ripples: Vec<Ripple>,
}

impl InteractionState {
    /// Clear what must not survive a card change. Ripples fade on their own.
    pub fn reset_for_transition(&mut self) {
        self.tilt = Tilt::default();
        self.active_definition = None;
        self.error = None;
    }

    /// Open the next definition, closing after the last one.
    pub fn cycle_definition(&mut self, available: usize) {
        self.active_definition = match self.active_definition {
            _ if available == 0 => None,
            None => Some(0),
            Some(i) if i + 1 < available => Some(i + 1),
            Some(_) => None,
        };
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Dismiss the error if there is one, else close the popover.
    /// Returns whether anything was dismissed.
    pub fn dismiss(&mut self) -> bool {
        if self.error.take().is_some() {
            return true;
        }
        self.active_definition.take().is_some()
    }

    pub fn add_ripple(&mut self, x: u16, y: u16, now: Instant) {
        self.ripples.push(Ripple { x, y, born: now });
    }

    pub fn expire_ripples(&mut self, now: Instant, lifetime: Duration) {
        self.ripples
            .retain(|r| now.saturating_duration_since(r.born) < lifetime);
    }
}
