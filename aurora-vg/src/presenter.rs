use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::color::Rgb;

/// Writes cell buffers to a terminal, sending only the cells that changed
/// since the previous presentation.
#[derive(Debug, Default)]
pub struct Presenter {
    previous: Option<Buffer>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what is on screen; the next `present` redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn present<W: Write>(&mut self, out: &mut W, buffer: &Buffer) -> io::Result<()> {
        let same_size = self
            .previous
            .as_ref()
            .is_some_and(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg: Option<Rgb> = None;
        let mut last_bg: Option<Rgb> = None;

        queue!(out, SetAttribute(Attribute::Reset))?;

        let changed: Vec<_> = match (&self.previous, same_size) {
            (Some(prev), true) => buffer.diff(prev).collect(),
            _ => buffer.cells().collect(),
        };

        for (x, y, cell) in changed {
            // The wide glyph before it already covers this cell
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(out, cursor::MoveTo(x, y))?;
            }

            if last_fg != Some(cell.fg) {
                queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
                last_fg = Some(cell.fg);
            }
            if last_bg != Some(cell.bg) {
                queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
                last_bg = Some(cell.bg);
            }

            queue!(out, Print(cell.char))?;

            last_x = x;
            last_y = y;
            last_char_width = cell.char.width().unwrap_or(1).max(1) as u16;
        }

        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()?;

        self.previous = Some(buffer.clone());
        Ok(())
    }
}

fn to_crossterm(color: Rgb) -> CtColor {
    CtColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
