use std::collections::VecDeque;
use std::time::{Duration, Instant};

use aurora::app::{FrameLimiter, RepeatState};
use aurora::button::{ButtonState, Buttons};
use aurora::driver::DriverError;
use aurora::prelude::*;
use aurora_vg::{Canvas, CellCanvas};

/// Scripted driver: one entry of held buttons per `update`.
struct FakeDriver {
    canvas: CellCanvas,
    buttons: ButtonState,
    script: VecDeque<Buttons>,
    size_change: Option<(u32, u32)>,
    /// Updates left before the platform closes, if limited.
    updates_left: Option<usize>,
    quit: bool,
    frames: usize,
    swaps: usize,
    exited: bool,
    theme: Option<ThemeVariant>,
}

impl FakeDriver {
    fn new() -> Self {
        Self {
            canvas: CellCanvas::new(8.0, 16.0),
            buttons: ButtonState::new(),
            script: VecDeque::new(),
            size_change: None,
            updates_left: None,
            quit: false,
            frames: 0,
            swaps: 0,
            exited: false,
            theme: None,
        }
    }
}

impl PlatformDriver for FakeDriver {
    fn initialize(&mut self, _title: &str, width: u32, height: u32) -> Result<(), DriverError> {
        self.size_change = Some((width, height));
        Ok(())
    }

    fn exit(&mut self) -> Result<(), DriverError> {
        self.exited = true;
        Ok(())
    }

    fn quit(&mut self) {
        self.quit = true;
    }

    fn update(&mut self) -> bool {
        if self.quit {
            return false;
        }
        if let Some(left) = self.updates_left.as_mut() {
            if *left == 0 {
                return false;
            }
            *left -= 1;
        }
        let held = self.script.pop_front().unwrap_or_default();
        self.buttons.update(held, Instant::now());
        true
    }

    fn frame(&mut self) {
        self.frames += 1;
    }

    fn swap_buffers(&mut self) {
        self.swaps += 1;
    }

    fn buttons(&self) -> &ButtonState {
        &self.buttons
    }

    fn canvas(&mut self) -> &mut dyn Canvas {
        &mut self.canvas
    }

    fn take_size_change(&mut self) -> Option<(u32, u32)> {
        self.size_change.take()
    }

    fn system_theme_variant(&self) -> Option<ThemeVariant> {
        self.theme
    }
}

fn instant_style() -> Style {
    Style {
        animation_show: Duration::ZERO,
        animation_show_slide: Duration::ZERO,
        ..Style::horizon()
    }
}

fn config() -> AppConfig {
    AppConfig::new("test")
        .style(instant_style())
        .max_fps(0)
        .without_assets()
}

fn app_with_list(driver: FakeDriver) -> (Application<FakeDriver>, ViewId, ViewId) {
    let mut app = Application::init(driver, config()).expect("fake driver initializes");
    let tree = app.ui_mut().tree_mut();
    let root = tree.insert(BoxLayout::vertical().with_background());
    let first = tree.insert(Label::focusable("Hello"));
    let second = tree.insert(Label::focusable("World"));
    tree.add_child(root, first);
    tree.add_child(root, second);
    app.ui_mut().push_view(root, ViewAnimation::Fade);
    (app, first, second)
}

fn screen_contains(driver: &FakeDriver, text: &str) -> bool {
    let buffer = driver.canvas.buffer();
    (0..buffer.height()).any(|y| buffer.row_text(y).contains(text))
}

// =============================================================================
// Main loop
// =============================================================================

#[test]
fn test_frame_renders_and_presents() {
    let (mut app, _, _) = app_with_list(FakeDriver::new());

    assert!(app.main_loop());

    let driver = app.driver();
    assert_eq!(driver.frames, 1);
    assert_eq!(driver.swaps, 1);
    assert!(!driver.canvas.is_in_frame());
    assert_eq!(driver.canvas.buffer().width(), 160);
    assert_eq!(driver.canvas.buffer().height(), 45);
    assert!(screen_contains(driver, "Hello"));
    assert!(screen_contains(driver, "World"));
}

#[test]
fn test_plus_quits_on_next_frame() {
    let mut driver = FakeDriver::new();
    driver.script.push_back(Buttons::PLUS);
    let (mut app, _, _) = app_with_list(driver);

    assert!(app.main_loop());
    assert!(app.driver().quit);
    assert!(app.is_running());

    assert!(!app.main_loop());
    assert!(!app.is_running());
    assert!(app.driver().exited);
    assert_eq!(app.ui().stack_len(), 0);

    assert!(!app.main_loop());
}

#[test]
fn test_platform_close_exits() {
    let mut driver = FakeDriver::new();
    driver.updates_left = Some(2);
    let (mut app, _, _) = app_with_list(driver);

    app.run();

    assert!(app.driver().exited);
    assert_eq!(app.driver().frames, 2);
    assert!(app.ui().tree().is_empty());
}

#[test]
fn test_exit_is_idempotent() {
    let (mut app, _, _) = app_with_list(FakeDriver::new());

    app.exit();
    app.driver_mut().exited = false;
    app.exit();

    assert!(!app.driver().exited);
}

#[test]
fn test_press_navigates_and_hold_does_not_refire() {
    let mut driver = FakeDriver::new();
    driver
        .script
        .extend([Buttons::DDOWN, Buttons::DDOWN, Buttons::empty()]);
    let (mut app, first, second) = app_with_list(driver);
    assert_eq!(app.ui().focus(), Some(first));

    app.main_loop();
    assert_eq!(app.ui().focus(), Some(second));

    app.main_loop();
    app.main_loop();
    assert_eq!(app.ui().focus(), Some(second));
}

#[test]
fn test_size_change_is_applied() {
    let (mut app, _, _) = app_with_list(FakeDriver::new());
    app.main_loop();
    assert_eq!(app.ui().window_scale(), 1.0);

    app.driver_mut().size_change = Some((2560, 1440));
    app.main_loop();

    assert_eq!(app.ui().window_size(), (2560, 1440));
    assert_eq!(app.ui().window_scale(), 2.0);
    assert_eq!(app.ui().content_size(), (1280.0, 720.0));
    assert_eq!(app.driver().canvas.buffer().width(), 320);
}

#[test]
fn test_due_tasks_run_each_frame() {
    let (mut app, _, _) = app_with_list(FakeDriver::new());
    app.ui_mut()
        .schedule_after(Duration::ZERO, |ui| ui.notify("saved"));

    app.main_loop();

    assert_eq!(app.ui().notifications().len(), 1);
    assert!(app.ui().tasks().is_empty());
}

#[test]
fn test_task_can_quit() {
    let (mut app, _, _) = app_with_list(FakeDriver::new());
    app.ui_mut().schedule_after(Duration::ZERO, |ui| ui.quit());

    assert!(app.main_loop());
    assert!(!app.main_loop());
    assert!(app.driver().exited);
}

// =============================================================================
// Theme resolution
// =============================================================================

#[test]
fn test_configured_theme_wins() {
    let mut driver = FakeDriver::new();
    driver.theme = Some(ThemeVariant::Light);
    let app = Application::init(driver, config().theme_variant(ThemeVariant::Dark))
        .expect("fake driver initializes");

    assert_eq!(app.ui().theme_variant(), ThemeVariant::Dark);
}

#[test]
fn test_system_theme_used_without_config() {
    let mut driver = FakeDriver::new();
    driver.theme = Some(ThemeVariant::Dark);
    let app = Application::init(driver, config()).expect("fake driver initializes");

    assert_eq!(app.ui().theme_variant(), ThemeVariant::Dark);
    assert_eq!(app.ui().theme_values(), &app.ui().theme().dark);
}

// =============================================================================
// Frame limiter
// =============================================================================

#[test]
fn test_limiter_remaining_budget() {
    let limiter = FrameLimiter::new(60);

    let left = limiter
        .remaining(Duration::from_millis(4))
        .expect("budget left");

    let expected = 1000.0 / 60.0 - 4.0;
    assert!((left.as_secs_f64() * 1000.0 - expected).abs() < 0.01);
}

#[test]
fn test_limiter_over_budget() {
    let limiter = FrameLimiter::new(60);

    assert_eq!(limiter.remaining(Duration::from_millis(20)), None);
}

#[test]
fn test_limiter_disabled() {
    let mut limiter = FrameLimiter::new(0);
    assert_eq!(limiter.frame_time(), None);
    assert_eq!(limiter.remaining(Duration::ZERO), None);

    limiter.set_max_fps(30);
    assert!(limiter.frame_time().is_some());
}

#[test]
fn test_limiter_wait_sleeps_rest_of_frame() {
    let limiter = FrameLimiter::new(60);
    let frame_start = Instant::now() - Duration::from_millis(4);

    let slept = limiter.wait(frame_start).expect("budget left");

    assert!(slept <= Duration::from_micros(12_667));
    assert!(slept > Duration::from_millis(8));
    assert!(frame_start.elapsed() >= Duration::from_millis(16));
}

// =============================================================================
// Repeat
// =============================================================================

fn held(state: &mut ButtonState, buttons: Buttons, at: Instant) -> ButtonState {
    state.update(buttons, at);
    *state
}

#[test]
fn test_repeat_thresholds() {
    let start = Instant::now();
    let ms = |n: u64| start + Duration::from_millis(n);
    let mut repeat = RepeatState::new(Duration::from_millis(250), Duration::from_millis(83));
    let mut state = ButtonState::new();

    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, ms(0)), ms(0)), Some(false));
    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, ms(16)), ms(16)), None);
    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, ms(250)), ms(250)), None);
    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, ms(251)), ms(251)), Some(true));
    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, ms(300)), ms(300)), None);
    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, ms(334)), ms(334)), Some(true));
    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, ms(417)), ms(417)), Some(true));
}

#[test]
fn test_repeat_restarts_on_change() {
    let start = Instant::now();
    let ms = |n: u64| start + Duration::from_millis(n);
    let mut repeat = RepeatState::new(Duration::from_millis(250), Duration::from_millis(83));
    let mut state = ButtonState::new();

    repeat.poll(&held(&mut state, Buttons::A, ms(0)), ms(0));
    assert_eq!(
        repeat.poll(&held(&mut state, Buttons::A | Buttons::B, ms(200)), ms(200)),
        Some(false)
    );
    assert_eq!(
        repeat.poll(&held(&mut state, Buttons::A | Buttons::B, ms(300)), ms(300)),
        None
    );
    assert_eq!(
        repeat.poll(&held(&mut state, Buttons::A | Buttons::B, ms(451)), ms(451)),
        Some(true)
    );
}

#[test]
fn test_release_is_not_a_press() {
    let start = Instant::now();
    let mut repeat = RepeatState::new(Duration::from_millis(250), Duration::from_millis(83));
    let mut state = ButtonState::new();

    repeat.poll(&held(&mut state, Buttons::A | Buttons::B, start), start);
    let later = start + Duration::from_millis(10);
    assert_eq!(repeat.poll(&held(&mut state, Buttons::A, later), later), None);

    let idle = start + Duration::from_secs(1);
    assert_eq!(repeat.poll(&held(&mut state, Buttons::empty(), idle), idle), None);
    let idle = idle + Duration::from_secs(1);
    assert_eq!(repeat.poll(&held(&mut state, Buttons::empty(), idle), idle), None);
}
