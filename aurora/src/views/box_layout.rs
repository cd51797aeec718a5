use aurora_vg::Rect;

use crate::focus::FocusDirection;
use crate::frame::{FrameContext, NodeFrame};
use crate::view::{View, ViewId, ViewTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Lines its children up along one axis, splitting the space evenly.
///
/// Navigation along the axis moves to the next child that can take focus;
/// navigation across it is left to the ancestors.
#[derive(Debug, Clone, Default)]
pub struct BoxLayout {
    axis: Axis,
    spacing: f32,
    padding: f32,
    default_focus_index: usize,
    background: bool,
}

impl BoxLayout {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            ..Default::default()
        }
    }

    pub fn vertical() -> Self {
        Self::new(Axis::Vertical)
    }

    pub fn horizontal() -> Self {
        Self::new(Axis::Horizontal)
    }

    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Child that gets focus first when the box is given focus.
    pub fn default_focus_index(mut self, index: usize) -> Self {
        self.default_focus_index = index;
        self
    }

    /// Fill the boundaries with the theme background. Root views want this
    /// so they hide what is below them.
    pub fn with_background(mut self) -> Self {
        self.background = true;
        self
    }

    fn is_along(&self, direction: FocusDirection) -> bool {
        match self.axis {
            Axis::Vertical => !direction.is_horizontal(),
            Axis::Horizontal => direction.is_horizontal(),
        }
    }
}

impl View for BoxLayout {
    fn draw(&self, ctx: &mut FrameContext<'_>, frame: &NodeFrame) {
        if self.background {
            ctx.canvas
                .fill_rect(frame.rect, ctx.theme.background.fade(frame.alpha));
        }
    }

    fn layout(&mut self, tree: &mut ViewTree, me: ViewId, bounds: Rect) {
        let children = tree.children(me).to_vec();
        if children.is_empty() {
            return;
        }

        let inner = bounds.shrink(self.padding, self.padding, self.padding, self.padding);
        let count = children.len() as f32;
        let gaps = self.spacing * (count - 1.0);

        for (index, child) in children.into_iter().enumerate() {
            let index = index as f32;
            let rect = match self.axis {
                Axis::Vertical => {
                    let height = ((inner.height - gaps) / count).max(0.0);
                    Rect::new(inner.x, inner.y + index * (height + self.spacing), inner.width, height)
                }
                Axis::Horizontal => {
                    let width = ((inner.width - gaps) / count).max(0.0);
                    Rect::new(inner.x + index * (width + self.spacing), inner.y, width, inner.height)
                }
            };
            tree.set_boundaries(child, rect);
        }
    }

    fn describe(&self) -> String {
        format!("BoxLayout({:?})", self.axis)
    }

    fn default_focus(&self, tree: &ViewTree, me: ViewId) -> Option<ViewId> {
        let children = tree.children(me);
        let start = self.default_focus_index.min(children.len());

        children[start..]
            .iter()
            .chain(&children[..start])
            .find_map(|child| tree.default_focus(*child))
    }

    fn next_focus(
        &self,
        tree: &ViewTree,
        me: ViewId,
        direction: FocusDirection,
        user_data: usize,
    ) -> Option<ViewId> {
        if !self.is_along(direction) {
            return None;
        }

        let children = tree.children(me);
        if direction.sign() > 0.0 {
            children
                .iter()
                .skip(user_data + 1)
                .find_map(|child| tree.default_focus(*child))
        } else {
            children
                .iter()
                .take(user_data.min(children.len()))
                .rev()
                .find_map(|child| tree.default_focus(*child))
        }
    }
}
