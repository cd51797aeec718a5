use std::time::{Duration, Instant};

use aurora_vg::Rect;

use crate::frame::FrameContext;

/// "FPS: 060" overlay in the top-right corner, refreshed once a second.
#[derive(Debug)]
pub struct FramerateCounter {
    text: String,
    frames: u32,
    last_second: Instant,
    bounds: Rect,
}

impl FramerateCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            text: "FPS: ---".to_string(),
            frames: 0,
            last_second: now,
            bounds: Rect::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_boundaries(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn boundaries(&self) -> Rect {
        self.bounds
    }

    /// Count a frame at `now`.
    pub fn tick(&mut self, now: Instant) {
        if now.saturating_duration_since(self.last_second) >= Duration::from_secs(1) {
            self.text = format!("FPS: {:03}", self.frames);
            self.frames = 0;
            self.last_second = now;
        }
        self.frames += 1;
    }

    pub fn frame(&mut self, ctx: &mut FrameContext<'_>) {
        self.tick(ctx.now);

        ctx.canvas.fill_rect(self.bounds, ctx.theme.backdrop);
        let text_width = self.text.chars().count() as f32 * 8.0;
        ctx.canvas.fill_text(
            self.bounds.right() - text_width - 8.0,
            self.bounds.y + self.bounds.height / 4.0,
            &self.text,
            aurora_vg::Rgba::WHITE,
        );
    }
}
