use std::collections::VecDeque;

use aurora::button::Buttons;
use aurora::driver::{
    AppletFocus, ConsoleDriver, ConsoleHost, DriverError, FRAMEBUFFER_COUNT, GraphicsError,
    HostEvent, OperationMode, PlatformDriver, SharedFontKind,
};
use aurora::fonts::FontStash;
use aurora::theme::ThemeVariant;
use aurora_vg::CellCanvas;

/// Records every call the driver makes.
struct FakeHost {
    canvas: CellCanvas,
    mode: OperationMode,
    focus: AppletFocus,
    held: Buttons,
    /// Events made available by each `main_loop` call, in order.
    script: VecDeque<Vec<HostEvent>>,
    /// `main_loop` results, true once exhausted.
    alive: VecDeque<bool>,
    events: VecDeque<HostEvent>,
    calls: Vec<String>,
    main_loops: usize,
    fonts: Vec<SharedFontKind>,
    next_slot: usize,
}

impl FakeHost {
    fn new() -> Self {
        Self {
            canvas: CellCanvas::new(8.0, 16.0),
            mode: OperationMode::Handheld,
            focus: AppletFocus::InFocus,
            held: Buttons::empty(),
            script: VecDeque::new(),
            alive: VecDeque::new(),
            events: VecDeque::new(),
            calls: Vec::new(),
            main_loops: 0,
            fonts: Vec::new(),
            next_slot: 0,
        }
    }
}

impl ConsoleHost for FakeHost {
    type Canvas = CellCanvas;

    fn main_loop(&mut self) -> bool {
        self.main_loops += 1;
        if let Some(batch) = self.script.pop_front() {
            self.events.extend(batch);
        }
        self.alive.pop_front().unwrap_or(true)
    }

    fn take_event(&mut self) -> Option<HostEvent> {
        self.events.pop_front()
    }

    fn operation_mode(&self) -> OperationMode {
        self.mode
    }

    fn focus(&self) -> AppletFocus {
        self.focus
    }

    fn keys_held(&mut self) -> Buttons {
        self.held
    }

    fn theme_variant(&self) -> ThemeVariant {
        ThemeVariant::Dark
    }

    fn shared_font(&mut self, kind: SharedFontKind) -> Option<Vec<u8>> {
        self.fonts.contains(&kind).then(|| vec![0u8; 16])
    }

    fn create_framebuffers(&mut self, width: u32, height: u32, count: usize) -> Result<(), GraphicsError> {
        self.calls.push(format!("create {}x{} x{}", width, height, count));
        Ok(())
    }

    fn destroy_framebuffers(&mut self) {
        self.calls.push("destroy".to_string());
    }

    fn wait_idle(&mut self) -> Result<(), GraphicsError> {
        self.calls.push("wait idle".to_string());
        Ok(())
    }

    fn update_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(format!("viewport {}x{}", width, height));
    }

    fn acquire_image(&mut self) -> Result<usize, GraphicsError> {
        let slot = self.next_slot;
        self.next_slot = (self.next_slot + 1) % FRAMEBUFFER_COUNT;
        self.calls.push(format!("acquire {}", slot));
        Ok(slot)
    }

    fn submit(&mut self, slot: usize) -> Result<(), GraphicsError> {
        self.calls.push(format!("submit {}", slot));
        Ok(())
    }

    fn present(&mut self, slot: usize) -> Result<(), GraphicsError> {
        self.calls.push(format!("present {}", slot));
        Ok(())
    }

    fn canvas(&mut self) -> &mut CellCanvas {
        &mut self.canvas
    }

    fn report_fatal(&mut self, error: &GraphicsError) {
        self.calls.push(format!("fatal {}", error));
    }
}

fn initialized(host: FakeHost) -> ConsoleDriver<FakeHost> {
    let mut driver = ConsoleDriver::new(host);
    driver
        .initialize("test", 1280, 720)
        .expect("fake host initializes");
    driver.host_mut().calls.clear();
    driver
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_initialize_creates_handheld_framebuffers() {
    let mut driver = ConsoleDriver::new(FakeHost::new());

    driver
        .initialize("test", 1280, 720)
        .expect("fake host initializes");

    assert_eq!(
        driver.host().calls,
        vec!["create 1280x720 x2", "viewport 1280x720"]
    );
    assert_eq!(driver.take_size_change(), Some((1280, 720)));
    assert_eq!(driver.take_size_change(), None);
}

#[test]
fn test_initialize_docked() {
    let mut host = FakeHost::new();
    host.mode = OperationMode::Docked;
    let mut driver = ConsoleDriver::new(host);

    driver
        .initialize("test", 1280, 720)
        .expect("fake host initializes");

    assert_eq!(driver.framebuffer_size(), (1920, 1080));
}

#[test]
fn test_exit_before_initialize() {
    let mut driver = ConsoleDriver::new(FakeHost::new());

    assert!(matches!(driver.exit(), Err(DriverError::NotInitialized)));
}

#[test]
fn test_exit_releases_framebuffers() {
    let mut driver = initialized(FakeHost::new());

    driver.exit().expect("initialized driver exits");

    assert_eq!(driver.host().calls, vec!["wait idle", "destroy"]);
    assert!(matches!(driver.exit(), Err(DriverError::NotInitialized)));
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_samples_buttons() {
    let mut host = FakeHost::new();
    host.held = Buttons::A | Buttons::DUP;
    let mut driver = initialized(host);

    assert!(driver.update());

    assert_eq!(driver.keys_down(), Buttons::A | Buttons::DUP);
    assert!(driver.is_any_key_down());

    assert!(driver.update());
    assert_eq!(driver.keys_down(), Buttons::empty());
    assert_eq!(driver.keys_held(), Buttons::A | Buttons::DUP);
    assert!(!driver.have_key_states_changed());
}

#[test]
fn test_update_false_when_host_exits() {
    let mut host = FakeHost::new();
    host.alive.push_back(false);
    let mut driver = initialized(host);

    assert!(!driver.update());
}

#[test]
fn test_quit_stops_before_host_loop() {
    let mut driver = initialized(FakeHost::new());
    driver.quit();

    assert!(!driver.update());
    assert_eq!(driver.host().main_loops, 0);
}

#[test]
fn test_update_waits_while_out_of_focus() {
    let mut host = FakeHost::new();
    host.script.extend([
        vec![HostEvent::FocusChanged(AppletFocus::OutOfFocus)],
        vec![],
        vec![HostEvent::FocusChanged(AppletFocus::Background)],
        vec![HostEvent::FocusChanged(AppletFocus::InFocus)],
    ]);
    let mut driver = initialized(host);

    assert!(driver.update());

    assert_eq!(driver.host().main_loops, 4);
}

#[test]
fn test_host_exit_while_out_of_focus() {
    let mut host = FakeHost::new();
    host.script
        .push_back(vec![HostEvent::FocusChanged(AppletFocus::OutOfFocus)]);
    host.alive.extend([true, true, false]);
    let mut driver = initialized(host);

    assert!(!driver.update());
    assert_eq!(driver.host().main_loops, 3);
}

#[test]
fn test_operation_mode_change_recreates_framebuffers() {
    let mut driver = initialized(FakeHost::new());
    driver.take_size_change();
    driver.host_mut().mode = OperationMode::Docked;
    driver
        .host_mut()
        .script
        .push_back(vec![HostEvent::OperationModeChanged]);

    assert!(driver.update());

    assert_eq!(
        driver.host().calls,
        vec![
            "wait idle",
            "destroy",
            "viewport 1920x1080",
            "create 1920x1080 x2"
        ]
    );
    assert_eq!(driver.framebuffer_size(), (1920, 1080));
    assert_eq!(driver.take_size_change(), Some((1920, 1080)));
}

// =============================================================================
// Frames
// =============================================================================

#[test]
fn test_frame_acquires_submits_presents() {
    let mut driver = initialized(FakeHost::new());

    for _ in 0..3 {
        driver.frame();
        driver.swap_buffers();
    }

    assert_eq!(
        driver.host().calls,
        vec![
            "acquire 0",
            "submit 0",
            "present 0",
            "acquire 1",
            "submit 1",
            "present 1",
            "acquire 0",
            "submit 0",
            "present 0"
        ]
    );
}

#[test]
fn test_swap_without_frame_presents_nothing() {
    let mut driver = initialized(FakeHost::new());

    driver.swap_buffers();

    assert!(driver.host().calls.is_empty());
}

// =============================================================================
// Platform services
// =============================================================================

#[test]
fn test_system_theme_comes_from_host() {
    let driver = ConsoleDriver::new(FakeHost::new());

    assert_eq!(driver.system_theme_variant(), Some(ThemeVariant::Dark));
}

#[test]
fn test_shared_fonts_loaded_with_korean_fallback() {
    let mut host = FakeHost::new();
    host.fonts = vec![SharedFontKind::Standard, SharedFontKind::Korean];
    let mut driver = initialized(host);
    let mut fonts = FontStash::default();

    driver.load_system_fonts(&mut fonts);

    let regular = fonts.regular.expect("standard font loaded");
    let korean = fonts.korean.expect("korean font loaded");
    assert_eq!(fonts.shared_symbols, None);
    assert_eq!(
        driver.host().canvas.fallbacks_of(regular).collect::<Vec<_>>(),
        vec![korean]
    );
}

#[test]
fn test_no_shared_fonts() {
    let mut driver = initialized(FakeHost::new());
    let mut fonts = FontStash::default();

    driver.load_system_fonts(&mut fonts);

    assert_eq!(fonts, FontStash::default());
}

#[test]
fn test_graphics_error_display() {
    let error = GraphicsError::new("acquire image", "device lost", 0x2c);

    assert_eq!(error.to_string(), "acquire image: device lost (code 0x2c)");
    assert_eq!(
        DriverError::from(error).to_string(),
        "graphics error: acquire image: device lost (code 0x2c)"
    );
}
