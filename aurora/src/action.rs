//! Button actions registered on views, and their dispatch.

use crate::Ui;
use crate::button::Buttons;

/// Called when the action's key is pressed. Returning `true` consumes the
/// key so that ancestors don't see it.
pub type Listener = Box<dyn FnMut(&mut Ui) -> bool>;

/// Identifies an action within the view it is registered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionId(pub(crate) u32);

pub(crate) struct Action {
    pub(crate) id: ActionId,
    pub(crate) key: Buttons,
    pub(crate) hint: String,
    pub(crate) available: bool,
    pub(crate) hidden: bool,
    /// Taken out while the listener runs.
    pub(crate) listener: Option<Listener>,
}

impl Action {
    pub(crate) fn info(&self) -> ActionInfo {
        ActionInfo {
            id: self.id,
            key: self.key,
            hint: self.hint.clone(),
            available: self.available,
            hidden: self.hidden,
        }
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("hint", &self.hint)
            .field("available", &self.available)
            .field("hidden", &self.hidden)
            .finish()
    }
}

/// Public view of a registered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInfo {
    pub id: ActionId,
    pub key: Buttons,
    pub hint: String,
    pub available: bool,
    pub hidden: bool,
}

impl Ui {
    /// Offer `buttons` to the actions of the focused view and then of each
    /// ancestor. The first available action for a key wins; returns whether
    /// any key was consumed.
    pub fn handle_action(&mut self, buttons: Buttons) -> bool {
        let mut consumed = Buttons::empty();
        let mut node = self.focus;

        while let Some(current) = node {
            for (action, key) in self.tree.action_keys(current) {
                if !key.intersects(buttons) || consumed.contains(key) {
                    continue;
                }
                if !self.tree.is_action_available(current, action) {
                    continue;
                }
                let Some(mut listener) = self.tree.take_listener(current, action) else {
                    continue;
                };

                let handled = listener(self);
                self.tree.restore_listener(current, action, listener);

                if handled {
                    consumed |= key;
                }

                // The listener destroyed its own view
                if !self.tree.contains(current) {
                    return !consumed.is_empty();
                }
            }
            node = self.tree.parent(current);
        }

        !consumed.is_empty()
    }

    /// Hints for the footer: every visible, available action from the focus
    /// up, keeping only the closest binding of each key.
    pub fn hints(&self) -> Vec<(Buttons, String)> {
        let mut hints: Vec<(Buttons, String)> = Vec::new();
        let mut node = self.focus;

        while let Some(current) = node {
            for action in self.tree.actions(current) {
                if action.hidden || !action.available {
                    continue;
                }
                if hints.iter().any(|(key, _)| *key == action.key) {
                    continue;
                }
                hints.push((action.key, action.hint));
            }
            node = self.tree.parent(current);
        }

        hints
    }
}
