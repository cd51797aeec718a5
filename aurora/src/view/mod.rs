//! Views and the arena that owns them.

mod tree;

pub use tree::ViewTree;

use aurora_vg::Rect;

use crate::focus::FocusDirection;
use crate::frame::{FrameContext, NodeFrame};

/// Handle to a node of the [`ViewTree`].
///
/// Handles carry a generation, so a handle to a destroyed view never
/// resolves to a view created later in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId {
    pub(crate) key: usize,
    pub(crate) generation: u64,
}

/// Behavior of a view. Position, visibility, alpha, children and actions
/// are node state kept by the tree; a view only decides how it looks and
/// how focus moves through it.
pub trait View {
    /// Draw the view itself. Children are drawn by the tree afterwards.
    fn draw(&self, ctx: &mut FrameContext<'_>, frame: &NodeFrame);

    /// Position children inside `bounds`. Only called when the node was
    /// invalidated.
    fn layout(&mut self, _tree: &mut ViewTree, _me: ViewId, _bounds: Rect) {}

    /// Short diagnostic name.
    fn describe(&self) -> String {
        std::any::type_name::<Self>()
            .rsplit("::")
            .next()
            .unwrap_or("View")
            .to_string()
    }

    fn is_focusable(&self) -> bool {
        false
    }

    /// Translucent views let the views below them in the stack show through.
    fn is_translucent(&self) -> bool {
        false
    }

    /// The view that gets focus when this one is given focus.
    fn default_focus(&self, _tree: &ViewTree, me: ViewId) -> Option<ViewId> {
        self.is_focusable().then_some(me)
    }

    /// Next view to focus when moving in `direction` away from the child
    /// with parent user data `user_data`.
    fn next_focus(
        &self,
        _tree: &ViewTree,
        _me: ViewId,
        _direction: FocusDirection,
        _user_data: usize,
    ) -> Option<ViewId> {
        None
    }

    fn on_focus_gained(&mut self) {}

    fn on_focus_lost(&mut self) {}

    /// The view is about to be shown. `reset` is set on the first appearance.
    fn will_appear(&mut self, _reset: bool) {}

    fn will_disappear(&mut self, _reset: bool) {}

    fn on_window_size_changed(&mut self) {}
}
