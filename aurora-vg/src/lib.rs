pub mod buffer;
pub mod canvas;
pub mod cell_canvas;
pub mod color;
pub mod geometry;
pub mod presenter;

pub use buffer::{Buffer, Cell};
pub use canvas::{Canvas, FontId};
pub use cell_canvas::CellCanvas;
pub use color::{Rgb, Rgba};
pub use geometry::Rect;
pub use presenter::Presenter;
