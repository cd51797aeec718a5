use aurora_vg::Rect;
use slab::Slab;

use super::{View, ViewId};
use crate::action::{Action, ActionId, ActionInfo, Listener};
use crate::animation::Shake;
use crate::button::Buttons;
use crate::focus::FocusDirection;
use crate::frame::{FrameContext, NodeFrame};

struct Node {
    generation: u64,
    /// Taken out while one of its `&mut self` hooks runs.
    view: Option<Box<dyn View>>,
    parent: Option<ViewId>,
    /// Set by the parent when the child is added; handed back to the parent
    /// during navigation.
    user_data: usize,
    children: Vec<ViewId>,
    actions: Vec<Action>,
    next_action: u32,
    boundaries: Rect,
    alpha: f32,
    translation: (f32, f32),
    hidden: bool,
    force_translucent: bool,
    dirty: bool,
    focused: bool,
    shake: Option<Shake>,
}

/// Arena owning every view node.
#[derive(Default)]
pub struct ViewTree {
    nodes: Slab<Node>,
    next_generation: u64,
}

impl std::fmt::Debug for ViewTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewTree")
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn insert(&mut self, view: impl View + 'static) -> ViewId {
        self.insert_boxed(Box::new(view))
    }

    pub fn insert_boxed(&mut self, view: Box<dyn View>) -> ViewId {
        let generation = self.next_generation;
        self.next_generation += 1;

        let key = self.nodes.insert(Node {
            generation,
            view: Some(view),
            parent: None,
            user_data: 0,
            children: Vec::new(),
            actions: Vec::new(),
            next_action: 0,
            boundaries: Rect::default(),
            alpha: 1.0,
            translation: (0.0, 0.0),
            hidden: false,
            force_translucent: false,
            dirty: true,
            focused: false,
            shake: None,
        });
        ViewId { key, generation }
    }

    fn node(&self, id: ViewId) -> Option<&Node> {
        self.nodes
            .get(id.key)
            .filter(|node| node.generation == id.generation)
    }

    fn node_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.key)
            .filter(|node| node.generation == id.generation)
    }

    pub fn contains(&self, id: ViewId) -> bool {
        self.node(id).is_some()
    }

    /// Append `child` to `parent`. The child's user data becomes its index
    /// among the parent's children.
    pub fn add_child(&mut self, parent: ViewId, child: ViewId) -> bool {
        if parent == child || !self.contains(child) || self.parent(child).is_some() {
            return false;
        }
        let Some(node) = self.node_mut(parent) else {
            return false;
        };
        let index = node.children.len();
        node.children.push(child);
        node.dirty = true;

        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
            node.user_data = index;
        }
        true
    }

    /// Destroy `id` and its whole subtree. Returns every removed handle.
    pub fn remove(&mut self, id: ViewId) -> Vec<ViewId> {
        if !self.contains(id) {
            return Vec::new();
        }

        if let Some(parent) = self.parent(id) {
            let siblings = self.node_mut(parent).map(|node| {
                node.children.retain(|c| *c != id);
                node.dirty = true;
                node.children.clone()
            });
            for (index, sibling) in siblings.into_iter().flatten().enumerate() {
                if let Some(node) = self.node_mut(sibling) {
                    node.user_data = index;
                }
            }
        }

        let mut removed = Vec::new();
        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if self.contains(current) {
                let node = self.nodes.remove(current.key);
                pending.extend(node.children);
                removed.push(current);
            }
        }
        removed
    }

    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn user_data(&self, id: ViewId) -> usize {
        self.node(id).map_or(0, |node| node.user_data)
    }

    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn view(&self, id: ViewId) -> Option<&dyn View> {
        self.node(id).and_then(|node| node.view.as_deref())
    }

    /// Run `f` with the view taken out of its node, so it can mutate both
    /// itself and the tree.
    pub fn with_view<R>(
        &mut self,
        id: ViewId,
        f: impl FnOnce(&mut dyn View, &mut ViewTree) -> R,
    ) -> Option<R> {
        let mut view = self.node_mut(id)?.view.take()?;
        let result = f(view.as_mut(), self);
        if let Some(node) = self.node_mut(id) {
            node.view = Some(view);
        }
        Some(result)
    }

    pub fn describe(&self, id: ViewId) -> String {
        self.view(id)
            .map_or_else(|| "<gone>".to_string(), |view| view.describe())
    }

    // =========================================================================
    // Node state
    // =========================================================================

    pub fn boundaries(&self, id: ViewId) -> Option<Rect> {
        self.node(id).map(|node| node.boundaries)
    }

    pub fn set_boundaries(&mut self, id: ViewId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            if node.boundaries != rect {
                node.boundaries = rect;
                node.dirty = true;
            }
        }
    }

    /// Request a layout pass for `id` on the next frame.
    pub fn invalidate(&mut self, id: ViewId) {
        if let Some(node) = self.node_mut(id) {
            node.dirty = true;
        }
    }

    pub fn is_dirty(&self, id: ViewId) -> bool {
        self.node(id).is_some_and(|node| node.dirty)
    }

    pub fn is_hidden(&self, id: ViewId) -> bool {
        self.node(id).is_some_and(|node| node.hidden)
    }

    pub(crate) fn set_hidden(&mut self, id: ViewId, hidden: bool) {
        if let Some(node) = self.node_mut(id) {
            node.hidden = hidden;
        }
    }

    pub fn alpha(&self, id: ViewId) -> f32 {
        self.node(id).map_or(0.0, |node| node.alpha)
    }

    pub fn set_alpha(&mut self, id: ViewId, alpha: f32) {
        if let Some(node) = self.node_mut(id) {
            node.alpha = alpha.clamp(0.0, 1.0);
        }
    }

    pub fn translation(&self, id: ViewId) -> (f32, f32) {
        self.node(id).map_or((0.0, 0.0), |node| node.translation)
    }

    pub fn set_translation(&mut self, id: ViewId, x: f32, y: f32) {
        if let Some(node) = self.node_mut(id) {
            node.translation = (x, y);
        }
    }

    pub fn set_force_translucent(&mut self, id: ViewId, translucent: bool) {
        if let Some(node) = self.node_mut(id) {
            node.force_translucent = translucent;
        }
    }

    pub fn is_force_translucent(&self, id: ViewId) -> bool {
        self.node(id).is_some_and(|node| node.force_translucent)
    }

    /// Forced translucency or the view's own answer.
    pub fn is_translucent(&self, id: ViewId) -> bool {
        self.node(id).is_some_and(|node| {
            node.force_translucent || node.view.as_deref().is_some_and(|v| v.is_translucent())
        })
    }

    pub fn is_focused(&self, id: ViewId) -> bool {
        self.node(id).is_some_and(|node| node.focused)
    }

    pub(crate) fn set_shake(&mut self, id: ViewId, shake: Option<Shake>) {
        if let Some(node) = self.node_mut(id) {
            node.shake = shake;
        }
    }

    // =========================================================================
    // View hooks
    // =========================================================================

    pub fn default_focus(&self, id: ViewId) -> Option<ViewId> {
        self.view(id)?.default_focus(self, id)
    }

    pub fn next_focus(
        &self,
        id: ViewId,
        direction: FocusDirection,
        user_data: usize,
    ) -> Option<ViewId> {
        self.view(id)?.next_focus(self, id, direction, user_data)
    }

    pub(crate) fn focus_gained(&mut self, id: ViewId) {
        if let Some(node) = self.node_mut(id) {
            node.focused = true;
        }
        self.with_view(id, |view, _| view.on_focus_gained());
    }

    pub(crate) fn focus_lost(&mut self, id: ViewId) {
        if let Some(node) = self.node_mut(id) {
            node.focused = false;
        }
        self.with_view(id, |view, _| view.on_focus_lost());
    }

    /// Notify `id` and its subtree that they are about to be shown.
    pub fn will_appear(&mut self, id: ViewId, reset: bool) {
        self.with_view(id, |view, _| view.will_appear(reset));
        for child in self.children(id).to_vec() {
            self.will_appear(child, reset);
        }
    }

    pub fn will_disappear(&mut self, id: ViewId, reset: bool) {
        self.with_view(id, |view, _| view.will_disappear(reset));
        for child in self.children(id).to_vec() {
            self.will_disappear(child, reset);
        }
    }

    pub(crate) fn window_size_changed(&mut self, id: ViewId) {
        self.with_view(id, |view, _| view.on_window_size_changed());
        for child in self.children(id).to_vec() {
            self.window_size_changed(child);
        }
    }

    /// Lay out every invalidated node of the subtree, parents first.
    pub fn layout(&mut self, id: ViewId) {
        let Some(node) = self.node_mut(id) else {
            return;
        };
        if node.dirty {
            node.dirty = false;
            let bounds = node.boundaries;
            self.with_view(id, |view, tree| view.layout(tree, id, bounds));
        }
        for child in self.children(id).to_vec() {
            self.layout(child);
        }
    }

    // =========================================================================
    // Actions
    // =========================================================================

    /// Register an action on `id`. Actions are listed in registration order.
    pub fn register_action(
        &mut self,
        id: ViewId,
        hint: impl Into<String>,
        key: Buttons,
        hidden: bool,
        listener: impl FnMut(&mut crate::Ui) -> bool + 'static,
    ) -> Option<ActionId> {
        let node = self.node_mut(id)?;
        let action = ActionId(node.next_action);
        node.next_action += 1;
        node.actions.push(Action {
            id: action,
            key,
            hint: hint.into(),
            available: true,
            hidden,
            listener: Some(Box::new(listener)),
        });
        Some(action)
    }

    pub fn set_action_available(&mut self, id: ViewId, action: ActionId, available: bool) {
        if let Some(found) = self.action_mut(id, action) {
            found.available = available;
        }
    }

    pub fn set_action_hint(&mut self, id: ViewId, action: ActionId, hint: impl Into<String>) {
        if let Some(found) = self.action_mut(id, action) {
            found.hint = hint.into();
        }
    }

    pub fn actions(&self, id: ViewId) -> Vec<ActionInfo> {
        self.node(id)
            .map(|node| node.actions.iter().map(Action::info).collect())
            .unwrap_or_default()
    }

    fn action_mut(&mut self, id: ViewId, action: ActionId) -> Option<&mut Action> {
        self.node_mut(id)?
            .actions
            .iter_mut()
            .find(|a| a.id == action)
    }

    pub(crate) fn action_keys(&self, id: ViewId) -> Vec<(ActionId, Buttons)> {
        self.node(id)
            .map(|node| node.actions.iter().map(|a| (a.id, a.key)).collect())
            .unwrap_or_default()
    }

    pub(crate) fn is_action_available(&self, id: ViewId, action: ActionId) -> bool {
        self.node(id)
            .and_then(|node| node.actions.iter().find(|a| a.id == action))
            .is_some_and(|a| a.available)
    }

    pub(crate) fn take_listener(&mut self, id: ViewId, action: ActionId) -> Option<Listener> {
        self.action_mut(id, action)?.listener.take()
    }

    pub(crate) fn restore_listener(&mut self, id: ViewId, action: ActionId, listener: Listener) {
        if let Some(found) = self.action_mut(id, action) {
            found.listener = Some(listener);
        }
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// Draw `id` and its subtree, then the focus highlight if it holds focus.
    pub fn draw(&self, id: ViewId, ctx: &mut FrameContext<'_>) {
        self.draw_node(id, ctx, 1.0, (0.0, 0.0));
    }

    fn draw_node(&self, id: ViewId, ctx: &mut FrameContext<'_>, parent_alpha: f32, offset: (f32, f32)) {
        let Some(node) = self.node(id) else {
            return;
        };
        let alpha = parent_alpha * node.alpha;
        if alpha <= 0.0 {
            return;
        }

        let offset = (offset.0 + node.translation.0, offset.1 + node.translation.1);
        let frame = NodeFrame {
            rect: node.boundaries.translate(offset.0, offset.1),
            alpha,
            focused: node.focused,
        };

        if let Some(view) = node.view.as_deref() {
            view.draw(ctx, &frame);
        }
        for child in &node.children {
            self.draw_node(*child, ctx, alpha, offset);
        }

        if node.focused {
            let (dx, dy) = node
                .shake
                .map_or((0.0, 0.0), |shake| shake.offset(ctx.style.shake_amplitude));
            let highlight = ctx.theme.highlight.fade(alpha);
            ctx.canvas.stroke_rect(frame.rect.translate(dx, dy), highlight);
        }
    }
}
