use std::time::{Duration, Instant};

use crate::button::ButtonState;

/// Turns button snapshots into presses and repeats.
///
/// A press fires as soon as a button goes down. Holding the same set of
/// buttons fires a repeat once they have been held longer than `delay`, then
/// every `interval`. Any change of the held set restarts the timer.
#[derive(Debug, Clone)]
pub struct RepeatState {
    delay: Duration,
    interval: Duration,
    held_since: Option<Instant>,
    last_repeat: Option<Instant>,
}

impl RepeatState {
    pub fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval,
            held_since: None,
            last_repeat: None,
        }
    }

    /// `Some(false)` for a press, `Some(true)` for a repeat, `None` when
    /// nothing should be dispatched this frame.
    pub fn poll(&mut self, buttons: &ButtonState, now: Instant) -> Option<bool> {
        if buttons.changed() {
            self.held_since = buttons.any_held().then_some(now);
            self.last_repeat = None;
            return (!buttons.down().is_empty()).then_some(false);
        }

        let held_since = self.held_since?;
        if !buttons.any_held() {
            return None;
        }

        let due = match self.last_repeat {
            None => now.saturating_duration_since(held_since) > self.delay,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last_repeat = Some(now);
        }
        due.then_some(true)
    }
}
