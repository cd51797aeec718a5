use crate::Ui;
use crate::button::Buttons;
use crate::frame::{FrameContext, NodeFrame};
use crate::view::{View, ViewId, ViewTree};

/// Full-screen error message. Pressing A quits the application.
#[derive(Debug, Clone)]
pub struct CrashView {
    text: String,
}

impl CrashView {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bind A to quit on the node holding a crash view.
    pub fn register_actions(tree: &mut ViewTree, me: ViewId) {
        tree.register_action(me, "OK", Buttons::A, false, |ui: &mut Ui| {
            ui.quit();
            true
        });
    }
}

impl View for CrashView {
    fn draw(&self, ctx: &mut FrameContext<'_>, frame: &NodeFrame) {
        let rect = frame.rect;
        ctx.canvas
            .fill_rect(rect, ctx.theme.crash_background.fade(frame.alpha));

        let text = ctx.theme.notification_text.fade(frame.alpha);
        let (_, center_y) = rect.center();
        ctx.canvas
            .fill_text(rect.x + 64.0, center_y - 16.0, &self.text, text);
        ctx.canvas
            .fill_text(rect.x + 64.0, rect.bottom() - 64.0, "Press A to exit", text);
    }

    fn describe(&self) -> String {
        "CrashView".to_string()
    }

    fn is_focusable(&self) -> bool {
        true
    }
}
