use crate::Ui;
use crate::button::Buttons;
use crate::focus::FocusDirection;

/// Reentrant input block counter.
///
/// Every `block` needs a matching `unblock` before input dispatch resumes.
/// Unblocking an unblocked counter stays at zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputBlock {
    count: u32,
}

impl InputBlock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self) {
        self.count += 1;
        log::trace!("[input] blocked ({})", self.count);
    }

    pub fn unblock(&mut self) {
        self.count = self.count.saturating_sub(1);
        log::trace!("[input] unblocked ({})", self.count);
    }

    pub fn is_blocked(&self) -> bool {
        self.count > 0
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

impl Ui {
    /// Dispatch a press (or a repeat of a held press) of `held`: actions
    /// first, then d-pad navigation if no action consumed it.
    ///
    /// Repeats only go through while they move the focus, so holding a
    /// button never fires its action twice.
    pub fn on_buttons_pressed(&mut self, held: Buttons, repeating: bool) {
        if self.input_block.is_blocked() {
            return;
        }
        if repeating && self.repetition_old_focus == self.focus {
            return;
        }
        self.repetition_old_focus = self.focus;

        if self.handle_action(held) {
            return;
        }

        if let Some(direction) = FocusDirection::from_buttons(held) {
            self.navigate(direction);
        }
    }
}
