//! The drawing surface consumed by the UI core.
//!
//! A canvas is an immediate-mode context: the core brackets every frame with
//! [`Canvas::begin_frame`] / [`Canvas::end_frame`] and views issue drawing
//! calls in between. Coordinates are logical units; the current scale set by
//! [`Canvas::scale`] maps them to device pixels.

use std::path::Path;

use crate::color::Rgba;
use crate::geometry::Rect;

/// Handle to a font registered with a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

pub trait Canvas {
    /// Start a frame for a window of the given pixel size.
    fn begin_frame(&mut self, window_width: f32, window_height: f32, pixel_ratio: f32);

    /// Multiply the current scale.
    fn scale(&mut self, factor: f32);

    /// Back to the identity transform.
    fn reset_transform(&mut self);

    fn end_frame(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_rect(&mut self, rect: Rect, color: Rgba);

    /// Draw a single line of text with its top-left corner at `(x, y)`.
    fn fill_text(&mut self, x: f32, y: f32, text: &str, color: Rgba);

    /// Register a font file under `name`. Returns `None` when it can't be loaded.
    fn create_font(&mut self, name: &str, path: &Path) -> Option<FontId>;

    /// Register in-memory font data under `name`.
    fn create_font_mem(&mut self, name: &str, data: Vec<u8>) -> Option<FontId>;

    fn find_font(&self, name: &str) -> Option<FontId>;

    /// Use `fallback` for glyphs missing from `base`.
    fn add_fallback_font(&mut self, base: FontId, fallback: FontId) -> bool;
}
