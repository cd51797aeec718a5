//! Toast notifications stacked in the top-right corner.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use aurora_vg::Rect;

use crate::frame::FrameContext;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub posted: Instant,
}

/// Ease-out cubic for the slide-in.
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

/// Ease-in cubic for the fade-out.
fn ease_in_cubic(t: f32) -> f32 {
    t.powi(3)
}

#[derive(Debug, Default)]
pub struct Notifications {
    items: VecDeque<Notification>,
    bounds: Rect,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Post `text`. The oldest notification is dropped beyond `max`.
    pub fn notify(&mut self, text: impl Into<String>, now: Instant, max: usize) {
        let text = text.into();
        log::info!("[notify] {}", text);
        self.items.push_front(Notification { text, posted: now });
        self.items.truncate(max.max(1));
    }

    /// Area notifications are laid out in, normally the content area.
    pub fn set_boundaries(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn boundaries(&self) -> Rect {
        self.bounds
    }

    /// Drop notifications older than `timeout`.
    pub fn prune(&mut self, now: Instant, timeout: Duration) {
        self.items
            .retain(|n| now.saturating_duration_since(n.posted) < timeout);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Draw the live notifications, newest on top.
    pub fn frame(&mut self, ctx: &mut FrameContext<'_>) {
        let style = ctx.style;
        self.prune(ctx.now, style.notification_timeout);

        let width = style.notification_width;
        let height = style.notification_height;
        let padding = style.notification_padding;
        let slide = style.notification_slide.as_secs_f32();

        for (index, notification) in self.items.iter().enumerate() {
            let age = ctx.now.saturating_duration_since(notification.posted);
            let remaining = style.notification_timeout.saturating_sub(age).as_secs_f32();

            let slide_in = if slide <= 0.0 {
                1.0
            } else {
                ease_out_cubic((age.as_secs_f32() / slide).min(1.0))
            };
            let alpha = if slide <= 0.0 || remaining >= slide {
                1.0
            } else {
                1.0 - ease_in_cubic(1.0 - remaining / slide)
            };

            let x = self.bounds.right() - (width + padding) * slide_in;
            let y = self.bounds.y + padding + index as f32 * (height + padding / 2.0);
            let rect = Rect::new(x, y, width, height);

            ctx.canvas
                .fill_rect(rect, ctx.theme.notification_background.fade(alpha));
            ctx.canvas.fill_text(
                rect.x + padding,
                rect.y + height / 3.0,
                &notification.text,
                ctx.theme.notification_text.fade(alpha),
            );
        }
    }
}
