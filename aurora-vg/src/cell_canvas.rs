use std::collections::HashMap;
use std::path::Path;

use unicode_width::UnicodeWidthChar;

use crate::buffer::{Buffer, Cell};
use crate::canvas::{Canvas, FontId};
use crate::color::{Rgb, Rgba};
use crate::geometry::Rect;

/// A [`Canvas`] that rasterizes into a grid of character cells.
///
/// Each cell stands for `cell_width` x `cell_height` device pixels. Fonts are
/// only tracked by name: glyph shapes are the terminal's business.
#[derive(Debug)]
pub struct CellCanvas {
    buffer: Buffer,
    cell_width: f32,
    cell_height: f32,
    scale: f32,
    clear_color: Rgb,
    in_frame: bool,
    fonts: HashMap<String, FontId>,
    fallbacks: Vec<(FontId, FontId)>,
}

impl CellCanvas {
    pub fn new(cell_width: f32, cell_height: f32) -> Self {
        Self {
            buffer: Buffer::new(0, 0),
            cell_width: cell_width.max(1.0),
            cell_height: cell_height.max(1.0),
            scale: 1.0,
            clear_color: Rgb::new(0, 0, 0),
            in_frame: false,
            fonts: HashMap::new(),
            fallbacks: Vec::new(),
        }
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn set_clear_color(&mut self, color: Rgb) {
        self.clear_color = color;
    }

    pub fn is_in_frame(&self) -> bool {
        self.in_frame
    }

    /// Fallback fonts registered for `base`, in registration order.
    pub fn fallbacks_of(&self, base: FontId) -> impl Iterator<Item = FontId> + '_ {
        self.fallbacks
            .iter()
            .filter(move |(b, _)| *b == base)
            .map(|(_, fallback)| *fallback)
    }

    fn to_col(&self, x: f32) -> i32 {
        (x * self.scale / self.cell_width).round() as i32
    }

    fn to_row(&self, y: f32) -> i32 {
        (y * self.scale / self.cell_height).round() as i32
    }

    /// Cell span covered by `rect`, clamped to the buffer. At least one cell
    /// wide and tall when the rect is not empty.
    fn cell_span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        if rect.is_empty() {
            return None;
        }

        let x0 = self.to_col(rect.x);
        let y0 = self.to_row(rect.y);
        let x1 = self.to_col(rect.right()).max(x0 + 1);
        let y1 = self.to_row(rect.bottom()).max(y0 + 1);

        let width = self.buffer.width() as i32;
        let height = self.buffer.height() as i32;
        let (x0, x1) = (x0.clamp(0, width), x1.clamp(0, width));
        let (y0, y1) = (y0.clamp(0, height), y1.clamp(0, height));

        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u16, y0 as u16, x1 as u16, y1 as u16))
    }

    fn register_font(&mut self, name: &str) -> FontId {
        let next = FontId(self.fonts.len() as u32);
        *self.fonts.entry(name.to_string()).or_insert(next)
    }
}

impl Canvas for CellCanvas {
    fn begin_frame(&mut self, window_width: f32, window_height: f32, _pixel_ratio: f32) {
        let cols = (window_width / self.cell_width).floor().max(0.0) as u16;
        let rows = (window_height / self.cell_height).floor().max(0.0) as u16;

        if cols != self.buffer.width() || rows != self.buffer.height() {
            log::debug!("[canvas] resizing cell buffer to {}x{}", cols, rows);
            self.buffer = Buffer::new(cols, rows);
        }

        self.buffer.clear(self.clear_color);
        self.scale = 1.0;
        self.in_frame = true;
    }

    fn scale(&mut self, factor: f32) {
        self.scale *= factor;
    }

    fn reset_transform(&mut self) {
        self.scale = 1.0;
    }

    fn end_frame(&mut self) {
        self.in_frame = false;
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.cell_span(rect) else {
            return;
        };

        for y in y0..y1 {
            for x in x0..x1 {
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    if color.a == 255 {
                        *cell = Cell::default().with_bg(color.rgb_part());
                    } else {
                        cell.bg = color.over(cell.bg);
                        cell.fg = color.over(cell.fg);
                    }
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.cell_span(rect) else {
            return;
        };
        let (right, bottom) = (x1 - 1, y1 - 1);

        for y in y0..y1 {
            for x in x0..x1 {
                let glyph = match (x == x0, x == right, y == y0, y == bottom) {
                    (true, _, true, _) => '┌',
                    (_, true, true, _) => '┐',
                    (true, _, _, true) => '└',
                    (_, true, _, true) => '┘',
                    (_, _, true, _) | (_, _, _, true) => '─',
                    (true, _, _, _) | (_, true, _, _) => '│',
                    _ => continue,
                };
                if let Some(cell) = self.buffer.get_mut(x, y) {
                    cell.char = glyph;
                    cell.fg = color.over(cell.bg);
                    cell.wide_continuation = false;
                }
            }
        }
    }

    fn fill_text(&mut self, x: f32, y: f32, text: &str, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        let row = self.to_row(y);
        if row < 0 || row >= self.buffer.height() as i32 {
            return;
        }
        let row = row as u16;
        let mut col = self.to_col(x);

        for ch in text.chars() {
            let width = ch.width().unwrap_or(0) as i32;
            if width == 0 {
                continue;
            }
            if col + width > self.buffer.width() as i32 {
                break;
            }
            if col >= 0 {
                let x = col as u16;
                if let Some(cell) = self.buffer.get_mut(x, row) {
                    cell.char = ch;
                    cell.fg = color.over(cell.bg);
                    cell.wide_continuation = false;
                }
                if width == 2 {
                    if let Some(cell) = self.buffer.get_mut(x + 1, row) {
                        cell.char = ' ';
                        cell.wide_continuation = true;
                    }
                }
            }
            col += width;
        }
    }

    fn create_font(&mut self, name: &str, path: &Path) -> Option<FontId> {
        if !path.is_file() {
            log::debug!("[canvas] font file {} not found", path.display());
            return None;
        }
        Some(self.register_font(name))
    }

    fn create_font_mem(&mut self, name: &str, data: Vec<u8>) -> Option<FontId> {
        if data.is_empty() {
            return None;
        }
        Some(self.register_font(name))
    }

    fn find_font(&self, name: &str) -> Option<FontId> {
        self.fonts.get(name).copied()
    }

    fn add_fallback_font(&mut self, base: FontId, fallback: FontId) -> bool {
        let known = |id: FontId| self.fonts.values().any(|f| *f == id);
        if !known(base) || !known(fallback) {
            return false;
        }
        self.fallbacks.push((base, fallback));
        true
    }
}
