//! The application: a platform driver plus the UI context, driven one frame
//! at a time.

mod config;
mod error;
mod limiter;
mod repeat;

pub use config::{AppConfig, DEFAULT_FPS, DEFAULT_REPEAT_DELAY, DEFAULT_REPEAT_INTERVAL};
pub use error::AppError;
pub use limiter::FrameLimiter;
pub use repeat::RepeatState;

use std::time::Instant;

use crate::driver::PlatformDriver;
use crate::fonts::FontStash;
use crate::theme::ThemeVariant;
use crate::ui::{CONTENT_HEIGHT, CONTENT_WIDTH, Ui};

pub struct Application<D: PlatformDriver> {
    driver: D,
    ui: Ui,
    repeat: RepeatState,
    limiter: FrameLimiter,
    running: bool,
}

impl<D: PlatformDriver> Application<D> {
    /// Initialize `driver`, load fonts and resolve the theme.
    pub fn init(mut driver: D, config: AppConfig) -> Result<Self, AppError> {
        log::info!("[app] initializing {}", config.title);
        driver.initialize(&config.title, CONTENT_WIDTH as u32, CONTENT_HEIGHT as u32)?;

        let variant = config
            .theme_variant
            .or_else(|| driver.system_theme_variant())
            .unwrap_or_else(ThemeVariant::from_env);
        log::info!("[app] using {:?} theme", variant);

        let mut fonts = FontStash::default();
        driver.load_system_fonts(&mut fonts);
        if let Some(dir) = &config.asset_dir {
            fonts.load_assets(driver.canvas(), dir);
        }
        fonts.register_fallbacks(driver.canvas());

        let mut ui = Ui::new(config.title, config.style, config.theme, variant);
        *ui.fonts_mut() = fonts;

        Ok(Self {
            driver,
            ui,
            repeat: RepeatState::new(config.repeat_delay, config.repeat_interval),
            limiter: FrameLimiter::new(config.max_fps),
            running: true,
        })
    }

    pub fn ui(&self) -> &Ui {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut Ui {
        &mut self.ui
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn limiter(&self) -> &FrameLimiter {
        &self.limiter
    }

    /// 0 removes the cap.
    pub fn set_maximum_fps(&mut self, fps: u32) {
        self.limiter.set_max_fps(fps);
    }

    /// Run one frame. Returns false once the application has exited.
    pub fn main_loop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let frame_start = Instant::now();

        if !self.driver.update() {
            self.exit();
            return false;
        }

        if let Some((width, height)) = self.driver.take_size_change() {
            self.ui.on_window_size_changed(width, height);
        }

        self.ui.set_now(frame_start);

        let buttons = *self.driver.buttons();
        if let Some(repeating) = self.repeat.poll(&buttons, frame_start) {
            self.ui.on_buttons_pressed(buttons.held(), repeating);
        }
        self.forward_quit_request();

        self.ui.advance_animations();
        self.ui.run_tasks();
        self.forward_quit_request();

        self.driver.frame();
        self.ui.render(self.driver.canvas());
        self.driver.swap_buffers();

        if let Some(slept) = self.limiter.wait(frame_start) {
            log::trace!("[app] slept {:?}", slept);
        }
        true
    }

    /// Run frames until the driver or the UI asks to stop.
    pub fn run(&mut self) {
        while self.main_loop() {}
    }

    fn forward_quit_request(&mut self) {
        if self.ui.take_quit_request() {
            self.driver.quit();
        }
    }

    /// Tear everything down. Called by `main_loop` when the driver stops.
    pub fn exit(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        log::info!("[app] exiting");

        self.ui.clear();
        if let Err(err) = self.driver.exit() {
            log::error!("[app] driver exit failed: {}", err);
        }
        self.ui.teardown();
    }
}
