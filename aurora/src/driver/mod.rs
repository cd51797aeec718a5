//! Platform drivers: windowing, input and presentation for one backend.
//!
//! Exactly one driver is linked into an application; [`crate::Application`]
//! is generic over it.

mod console;
#[cfg(feature = "desktop")]
mod desktop;
#[cfg(feature = "desktop")]
mod keymap;

pub use console::{
    AppletFocus, ConsoleDriver, ConsoleHost, FRAMEBUFFER_COUNT, HostEvent, OperationMode,
    SharedFontKind,
};
#[cfg(feature = "desktop")]
pub use desktop::{CELL_HEIGHT, CELL_WIDTH, DesktopDriver, GamepadSource};
#[cfg(feature = "desktop")]
pub use keymap::{KeyboardState, map_key};

use aurora_vg::Canvas;
use thiserror::Error;

use crate::button::{ButtonState, Buttons};
use crate::fonts::FontStash;
use crate::theme::ThemeVariant;

/// Error reported by the graphics device.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{context}: {message} (code {code:#x})")]
pub struct GraphicsError {
    /// What the driver was doing.
    pub context: &'static str,
    pub message: String,
    /// Backend result code.
    pub code: u32,
}

impl GraphicsError {
    pub fn new(context: &'static str, message: impl Into<String>, code: u32) -> Self {
        Self {
            context,
            message: message.into(),
            code,
        }
    }
}

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("graphics error: {0}")]
    Graphics(#[from] GraphicsError),

    #[error("driver used before initialization")]
    NotInitialized,
}

pub trait PlatformDriver {
    /// Open the window or display at the given size in pixels.
    fn initialize(&mut self, title: &str, width: u32, height: u32) -> Result<(), DriverError>;

    /// Release everything acquired by `initialize`.
    fn exit(&mut self) -> Result<(), DriverError>;

    /// Make the next `update` return false.
    fn quit(&mut self);

    /// Pump platform events and sample the buttons. Returns false when the
    /// application should stop.
    fn update(&mut self) -> bool;

    /// Prepare the backend for drawing a frame.
    fn frame(&mut self);

    /// Present the frame drawn since `frame`.
    fn swap_buffers(&mut self);

    fn buttons(&self) -> &ButtonState;

    fn canvas(&mut self) -> &mut dyn Canvas;

    /// New window size in pixels, if it changed since the last call.
    fn take_size_change(&mut self) -> Option<(u32, u32)>;

    /// Theme variant chosen in the platform settings, if the platform has
    /// one.
    fn system_theme_variant(&self) -> Option<ThemeVariant> {
        None
    }

    /// Register platform-provided fonts.
    fn load_system_fonts(&mut self, _fonts: &mut FontStash) {}

    fn touch_position(&self) -> (i32, i32) {
        (0, 0)
    }

    fn touch_count(&self) -> u32 {
        0
    }

    fn keys_down(&self) -> Buttons {
        self.buttons().down()
    }

    fn keys_up(&self) -> Buttons {
        self.buttons().up()
    }

    fn keys_held(&self) -> Buttons {
        self.buttons().held()
    }

    fn is_any_key_down(&self) -> bool {
        self.buttons().any_held()
    }

    fn have_key_states_changed(&self) -> bool {
        self.buttons().changed()
    }
}
