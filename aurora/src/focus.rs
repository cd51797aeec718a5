//! Directional focus navigation.
//!
//! Navigation asks the parent of the focused view for the next focusable
//! sibling in a direction. When the parent has nothing to offer the walk
//! moves one level up and asks the grandparent, stopping below the root.

use crate::Ui;
use crate::button::Buttons;
use crate::view::ViewId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusDirection {
    Up,
    Down,
    Left,
    Right,
}

impl FocusDirection {
    /// Direction for a d-pad mask, checked in the order down, up, left,
    /// right. Only the first matching bit counts.
    pub fn from_buttons(buttons: Buttons) -> Option<Self> {
        if buttons.contains(Buttons::DDOWN) {
            Some(Self::Down)
        } else if buttons.contains(Buttons::DUP) {
            Some(Self::Up)
        } else if buttons.contains(Buttons::DLEFT) {
            Some(Self::Left)
        } else if buttons.contains(Buttons::DRIGHT) {
            Some(Self::Right)
        } else {
            None
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// +1 for down/right, -1 for up/left.
    pub fn sign(self) -> f32 {
        match self {
            Self::Down | Self::Right => 1.0,
            Self::Up | Self::Left => -1.0,
        }
    }
}

impl Ui {
    /// Move focus in `direction`. A dead end shakes the focused view.
    pub fn navigate(&mut self, direction: FocusDirection) {
        let Some(current) = self.focus else {
            return;
        };
        let Some(mut parent) = self.tree.parent(current) else {
            return;
        };

        let mut child = current;
        let mut next = self
            .tree
            .next_focus(parent, direction, self.tree.user_data(child));

        while next.is_none() {
            // Stop below the root of the tree
            let Some(grandparent) = self.tree.parent(parent) else {
                break;
            };
            child = parent;
            parent = grandparent;
            next = self
                .tree
                .next_focus(parent, direction, self.tree.user_data(child));
        }

        match next {
            Some(next) => self.give_focus(Some(next)),
            None => {
                log::trace!("[focus] dead end going {:?}", direction);
                self.shake_highlight(current, direction);
            }
        }
    }

    /// Focus the default focus of `view`, or nothing.
    pub fn give_focus(&mut self, view: Option<ViewId>) {
        let old = self.focus;
        let new = view.and_then(|view| self.tree.default_focus(view));

        if old == new {
            return;
        }

        if let Some(old) = old {
            self.tree.focus_lost(old);
        }

        self.focus = new;
        self.focus_changed.fire(&new);

        if let Some(new) = new {
            self.tree.focus_gained(new);
            log::debug!("[focus] giving focus to {}", self.tree.describe(new));
        }
        self.hints_updated.fire(&());
    }

    pub fn focus(&self) -> Option<ViewId> {
        self.focus
    }
}
