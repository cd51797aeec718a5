use std::time::Instant;

use aurora_vg::{Canvas, Rect};

use crate::fonts::FontStash;
use crate::style::Style;
use crate::theme::ThemeValues;

/// Everything a view needs to draw one frame. Every view drawn in a frame
/// receives the same context.
pub struct FrameContext<'a> {
    /// Window width over window height.
    pub pixel_ratio: f32,
    pub canvas: &'a mut dyn Canvas,
    pub fonts: &'a FontStash,
    pub theme: &'a ThemeValues,
    pub style: &'a Style,
    pub now: Instant,
}

/// Where and how a single node is drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeFrame {
    /// Boundaries with the node's and its ancestors' translations applied.
    pub rect: Rect,
    /// Own alpha multiplied by the ancestors' alpha.
    pub alpha: f32,
    pub focused: bool,
}
