//! Minimal stock views.

mod box_layout;
mod crash;
mod label;

pub use box_layout::{Axis, BoxLayout};
pub use crash::CrashView;
pub use label::Label;
