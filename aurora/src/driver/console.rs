//! Console backend. Every system call goes through a [`ConsoleHost`], which
//! owns the applet loop, the HID state and the graphics device.

use std::time::Instant;

use aurora_vg::Canvas;

use super::{DriverError, GraphicsError, PlatformDriver};
use crate::button::{ButtonState, Buttons};
use crate::fonts::FontStash;
use crate::theme::ThemeVariant;

pub const FRAMEBUFFER_COUNT: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    Handheld,
    Docked,
}

impl OperationMode {
    pub fn framebuffer_size(self) -> (u32, u32) {
        match self {
            OperationMode::Docked => (1920, 1080),
            OperationMode::Handheld => (1280, 720),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppletFocus {
    InFocus,
    OutOfFocus,
    Background,
}

/// Notifications from the applet hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    FocusChanged(AppletFocus),
    OperationModeChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharedFontKind {
    Standard,
    Korean,
    Extended,
}

/// System services of the console.
pub trait ConsoleHost {
    type Canvas: Canvas + 'static;

    /// Run one iteration of the applet main loop. False when the system asks
    /// the application to exit.
    fn main_loop(&mut self) -> bool;

    /// Next pending hook notification.
    fn take_event(&mut self) -> Option<HostEvent>;

    fn operation_mode(&self) -> OperationMode;

    fn focus(&self) -> AppletFocus;

    fn keys_held(&mut self) -> Buttons;

    fn touch_position(&self) -> (i32, i32) {
        (0, 0)
    }

    fn touch_count(&self) -> u32 {
        0
    }

    /// Dark or light system color set.
    fn theme_variant(&self) -> ThemeVariant;

    /// Data of a shared system font, if available.
    fn shared_font(&mut self, kind: SharedFontKind) -> Option<Vec<u8>>;

    fn create_framebuffers(&mut self, width: u32, height: u32, count: usize) -> Result<(), GraphicsError>;

    fn destroy_framebuffers(&mut self);

    /// Block until the graphics queue has no work left.
    fn wait_idle(&mut self) -> Result<(), GraphicsError>;

    fn update_viewport(&mut self, width: u32, height: u32);

    /// Next swapchain image to draw into.
    fn acquire_image(&mut self) -> Result<usize, GraphicsError>;

    /// Bind the image and run the render command list.
    fn submit(&mut self, slot: usize) -> Result<(), GraphicsError>;

    fn present(&mut self, slot: usize) -> Result<(), GraphicsError>;

    fn canvas(&mut self) -> &mut Self::Canvas;

    /// Show the system error screen.
    fn report_fatal(&mut self, error: &GraphicsError);
}

pub struct ConsoleDriver<H: ConsoleHost> {
    host: H,
    buttons: ButtonState,
    focus: AppletFocus,
    framebuffer_size: (u32, u32),
    framebuffers: bool,
    slot: Option<usize>,
    size_change: Option<(u32, u32)>,
    initialized: bool,
    quit: bool,
}

impl<H: ConsoleHost> ConsoleDriver<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            buttons: ButtonState::new(),
            focus: AppletFocus::InFocus,
            framebuffer_size: OperationMode::Handheld.framebuffer_size(),
            framebuffers: false,
            slot: None,
            size_change: None,
            initialized: false,
            quit: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer_size
    }

    fn create_framebuffer_resources(&mut self) -> Result<(), GraphicsError> {
        let (width, height) = self.framebuffer_size;
        self.host
            .create_framebuffers(width, height, FRAMEBUFFER_COUNT)?;
        self.framebuffers = true;
        Ok(())
    }

    fn destroy_framebuffer_resources(&mut self) -> Result<(), GraphicsError> {
        if !self.framebuffers {
            return Ok(());
        }
        self.host.wait_idle()?;
        self.host.destroy_framebuffers();
        self.framebuffers = false;
        self.slot = None;
        Ok(())
    }

    fn on_operation_mode_changed(&mut self) {
        if let Err(err) = self.destroy_framebuffer_resources() {
            self.fatal(err);
        }

        self.framebuffer_size = self.host.operation_mode().framebuffer_size();
        let (width, height) = self.framebuffer_size;
        log::info!("[console] operation mode changed, framebuffers now {}x{}", width, height);
        self.host.update_viewport(width, height);

        if let Err(err) = self.create_framebuffer_resources() {
            self.fatal(err);
        }
        self.size_change = Some(self.framebuffer_size);
    }

    fn handle_host_events(&mut self) {
        while let Some(event) = self.host.take_event() {
            match event {
                HostEvent::FocusChanged(focus) => {
                    log::debug!("[console] applet focus: {:?}", focus);
                    self.focus = focus;
                }
                HostEvent::OperationModeChanged => self.on_operation_mode_changed(),
            }
        }
    }

    /// Graphics errors leave the device unusable.
    fn fatal(&mut self, error: GraphicsError) -> ! {
        log::error!("[console] {}", error);
        self.host.report_fatal(&error);
        std::process::exit(1);
    }
}

impl<H: ConsoleHost> PlatformDriver for ConsoleDriver<H> {
    fn initialize(&mut self, title: &str, _width: u32, _height: u32) -> Result<(), DriverError> {
        log::info!("[console] initializing {}", title);

        self.focus = self.host.focus();
        self.framebuffer_size = self.host.operation_mode().framebuffer_size();
        self.create_framebuffer_resources()?;

        let (width, height) = self.framebuffer_size;
        self.host.update_viewport(width, height);
        self.size_change = Some(self.framebuffer_size);
        self.initialized = true;
        Ok(())
    }

    fn exit(&mut self) -> Result<(), DriverError> {
        if !self.initialized {
            return Err(DriverError::NotInitialized);
        }
        self.destroy_framebuffer_resources()?;
        self.initialized = false;
        Ok(())
    }

    fn quit(&mut self) {
        self.quit = true;
    }

    fn update(&mut self) -> bool {
        // Sit in the applet loop while in the background
        loop {
            if self.quit || !self.host.main_loop() {
                return false;
            }
            self.handle_host_events();
            if self.focus == AppletFocus::InFocus {
                break;
            }
        }

        let held = self.host.keys_held();
        self.buttons.update(held, Instant::now());
        true
    }

    fn frame(&mut self) {
        let slot = match self.host.acquire_image() {
            Ok(slot) => slot,
            Err(err) => self.fatal(err),
        };
        if let Err(err) = self.host.submit(slot) {
            self.fatal(err);
        }
        self.slot = Some(slot);
    }

    fn swap_buffers(&mut self) {
        let Some(slot) = self.slot.take() else {
            log::warn!("[console] swap_buffers without an acquired image");
            return;
        };
        if let Err(err) = self.host.present(slot) {
            self.fatal(err);
        }
    }

    fn buttons(&self) -> &ButtonState {
        &self.buttons
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        self.host.canvas()
    }

    fn take_size_change(&mut self) -> Option<(u32, u32)> {
        self.size_change.take()
    }

    fn system_theme_variant(&self) -> Option<ThemeVariant> {
        Some(self.host.theme_variant())
    }

    fn load_system_fonts(&mut self, fonts: &mut FontStash) {
        if let Some(data) = self.host.shared_font(SharedFontKind::Standard) {
            log::info!("[console] using shared font");
            fonts.regular = self.host.canvas().create_font_mem("regular", data);
        }

        if let Some(data) = self.host.shared_font(SharedFontKind::Korean) {
            log::info!("[console] adding shared Korean font");
            fonts.korean = self.host.canvas().create_font_mem("korean", data);
            if let (Some(regular), Some(korean)) = (fonts.regular, fonts.korean) {
                self.host.canvas().add_fallback_font(regular, korean);
            }
        }

        if let Some(data) = self.host.shared_font(SharedFontKind::Extended) {
            log::info!("[console] using shared symbols font");
            fonts.shared_symbols = self.host.canvas().create_font_mem("symbols", data);
        }
    }

    fn touch_position(&self) -> (i32, i32) {
        self.host.touch_position()
    }

    fn touch_count(&self) -> u32 {
        self.host.touch_count()
    }
}
