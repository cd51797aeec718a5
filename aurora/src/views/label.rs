use crate::frame::{FrameContext, NodeFrame};
use crate::view::View;

/// A line of text, optionally focusable so it can carry actions.
#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    focusable: bool,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            focusable: false,
        }
    }

    pub fn focusable(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            focusable: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl View for Label {
    fn draw(&self, ctx: &mut FrameContext<'_>, frame: &NodeFrame) {
        if frame.focused {
            ctx.canvas
                .fill_rect(frame.rect, ctx.theme.highlight_background.fade(frame.alpha));
        }
        ctx.canvas.fill_text(
            frame.rect.x + 16.0,
            frame.rect.y + (frame.rect.height / 2.0 - 8.0).max(0.0),
            &self.text,
            ctx.theme.text.fade(frame.alpha),
        );
    }

    fn describe(&self) -> String {
        format!("Label({:?})", self.text)
    }

    fn is_focusable(&self) -> bool {
        self.focusable
    }
}
