//! Terminal backend built on crossterm.
//!
//! The terminal stands in for a desktop window: one character cell is a
//! nominal 8x16 pixel block, the alternate screen is "fullscreen" and the
//! main screen is "windowed".

use std::io::{self, Write};
use std::panic;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use aurora_vg::{Canvas, CellCanvas, Presenter};
use crossterm::{
    cursor,
    event::{
        self, DisableFocusChange, EnableFocusChange, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};

use super::keymap::KeyboardState;
use super::{DriverError, PlatformDriver};
use crate::button::{ButtonState, Buttons};

pub const CELL_WIDTH: u32 = 8;
pub const CELL_HEIGHT: u32 = 16;

/// External gamepad. When attached, it replaces the keyboard mapping.
pub trait GamepadSource {
    /// Currently held buttons, or `None` when no pad is connected.
    fn poll(&mut self) -> Option<Buttons>;
}

/// Set while a session owns the terminal. The panic hook restores the
/// terminal only when it is set.
static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);
static KEYBOARD_FLAGS_PUSHED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

fn mark_session_active(keyboard_flags_pushed: bool) {
    KEYBOARD_FLAGS_PUSHED.store(keyboard_flags_pushed, Ordering::SeqCst);
    SESSION_ACTIVE.store(true, Ordering::SeqCst);
}

/// Claim the restore of the active session. Returns whether keyboard flags
/// must be popped, or `None` when no session is active.
fn take_active_session() -> Option<bool> {
    SESSION_ACTIVE
        .swap(false, Ordering::SeqCst)
        .then(|| KEYBOARD_FLAGS_PUSHED.load(Ordering::SeqCst))
}

/// Restore the terminal before the panic message is printed. Installed once
/// per process.
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            if let Some(pop_keyboard_flags) = take_active_session() {
                let _ = restore_terminal(pop_keyboard_flags);
            }
            original_hook(panic_info);
        }));
    });
}

/// Raw mode, alternate screen, hidden cursor and focus reporting for as
/// long as it lives.
struct TerminalSession {
    reports_release: bool,
    alternate: bool,
    active: bool,
}

impl TerminalSession {
    fn enter() -> io::Result<Self> {
        install_panic_hook();

        terminal::enable_raw_mode()?;
        mark_session_active(false);
        // Dropped on a setup error, which restores what was already changed
        let mut session = Self {
            reports_release: false,
            alternate: true,
            active: true,
        };

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide, EnableFocusChange)?;

        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
            session.reports_release = true;
            mark_session_active(true);
        }

        Ok(session)
    }

    fn set_alternate(&mut self, alternate: bool) -> io::Result<()> {
        if alternate == self.alternate {
            return Ok(());
        }
        let mut stdout = io::stdout();
        if alternate {
            execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        } else {
            execute!(stdout, LeaveAlternateScreen, cursor::Hide)?;
        }
        self.alternate = alternate;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        match take_active_session() {
            Some(pop_keyboard_flags) => restore_terminal(pop_keyboard_flags),
            None => Ok(()),
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn restore_terminal(pop_keyboard_flags: bool) -> io::Result<()> {
    let mut stdout = io::stdout();
    if pop_keyboard_flags {
        execute!(stdout, PopKeyboardEnhancementFlags)?;
    }
    execute!(stdout, DisableFocusChange, LeaveAlternateScreen, cursor::Show)?;
    terminal::disable_raw_mode()
}

fn cells_to_pixels(cols: u16, rows: u16) -> (u32, u32) {
    (cols as u32 * CELL_WIDTH, rows as u32 * CELL_HEIGHT)
}

pub struct DesktopDriver {
    canvas: CellCanvas,
    presenter: Presenter,
    buttons: ButtonState,
    keyboard: KeyboardState,
    gamepad: Option<Box<dyn GamepadSource>>,
    session: Option<TerminalSession>,
    size_change: Option<(u32, u32)>,
    focused: bool,
    quit: bool,
}

impl Default for DesktopDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DesktopDriver {
    pub fn new() -> Self {
        Self {
            canvas: CellCanvas::new(CELL_WIDTH as f32, CELL_HEIGHT as f32),
            presenter: Presenter::new(),
            buttons: ButtonState::new(),
            keyboard: KeyboardState::default(),
            gamepad: None,
            session: None,
            size_change: None,
            focused: true,
            quit: false,
        }
    }

    /// Read buttons from `gamepad` instead of the keyboard while it is
    /// connected.
    pub fn with_gamepad(mut self, gamepad: impl GamepadSource + 'static) -> Self {
        self.gamepad = Some(Box::new(gamepad));
        self
    }

    pub fn is_fullscreen(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.alternate)
    }

    fn toggle_fullscreen(&mut self) -> io::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        let fullscreen = !session.alternate;
        session.set_alternate(fullscreen)?;
        log::info!(
            "[desktop] switched to {} mode",
            if fullscreen { "fullscreen" } else { "windowed" }
        );

        self.presenter.invalidate();
        let (cols, rows) = terminal::size()?;
        self.size_change = Some(cells_to_pixels(cols, rows));
        Ok(())
    }

    /// Returns false when the window was asked to close.
    fn handle_event(&mut self, event: Event) -> io::Result<bool> {
        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) => {
                let pressed = kind != KeyEventKind::Release;
                if pressed
                    && modifiers.contains(KeyModifiers::CONTROL)
                    && code == KeyCode::Char('c')
                {
                    log::info!("[desktop] close requested");
                    return Ok(false);
                }
                if modifiers.contains(KeyModifiers::ALT) && code == KeyCode::Enter {
                    if kind == KeyEventKind::Press {
                        self.toggle_fullscreen()?;
                    }
                    return Ok(true);
                }
                self.keyboard.apply(code, kind);
            }
            Event::Resize(cols, rows) => {
                self.presenter.invalidate();
                self.size_change = Some(cells_to_pixels(cols, rows));
            }
            Event::FocusGained => self.focused = true,
            Event::FocusLost => {
                log::debug!("[desktop] lost focus, waiting for events");
                self.focused = false;
            }
            _ => {}
        }
        Ok(true)
    }

    fn pump_events(&mut self) -> io::Result<bool> {
        // Unfocused: block instead of spinning
        if !self.focused && !self.handle_event(event::read()?)? {
            return Ok(false);
        }
        while event::poll(Duration::ZERO)? {
            if !self.handle_event(event::read()?)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn fatal(&mut self, error: io::Error) -> ! {
        if let Some(mut session) = self.session.take() {
            let _ = session.restore();
        }
        log::error!("[desktop] terminal write failed: {}", error);
        eprintln!("fatal: terminal write failed: {}", error);
        std::process::exit(1);
    }
}

impl PlatformDriver for DesktopDriver {
    fn initialize(&mut self, title: &str, width: u32, height: u32) -> Result<(), DriverError> {
        log::debug!("[desktop] requested window size {}x{}", width, height);

        let session = TerminalSession::enter()?;
        execute!(io::stdout(), SetTitle(title))?;

        self.keyboard = KeyboardState::new(session.reports_release);
        log::info!(
            "[desktop] terminal session started (key releases: {})",
            session.reports_release
        );
        self.session = Some(session);

        let (cols, rows) = terminal::size()?;
        self.size_change = Some(cells_to_pixels(cols, rows));
        self.presenter.invalidate();
        Ok(())
    }

    fn exit(&mut self) -> Result<(), DriverError> {
        let Some(mut session) = self.session.take() else {
            return Err(DriverError::NotInitialized);
        };
        session.restore()?;
        log::info!("[desktop] terminal session ended");
        Ok(())
    }

    fn quit(&mut self) {
        self.quit = true;
    }

    fn update(&mut self) -> bool {
        if self.quit {
            return false;
        }
        if self.session.is_none() {
            log::error!("[desktop] update called before initialize");
            return false;
        }

        match self.pump_events() {
            Ok(true) => {}
            Ok(false) => return false,
            Err(err) => {
                log::error!("[desktop] event polling failed: {}", err);
                return false;
            }
        }

        let held = self
            .gamepad
            .as_mut()
            .and_then(|pad| pad.poll())
            .unwrap_or_else(|| self.keyboard.held());
        self.buttons.update(held, Instant::now());
        self.keyboard.end_poll();

        !self.quit
    }

    fn frame(&mut self) {
        // The cell canvas clears itself in begin_frame
    }

    fn swap_buffers(&mut self) {
        let mut stdout = io::stdout().lock();
        let result = self
            .presenter
            .present(&mut stdout, self.canvas.buffer())
            .and_then(|()| stdout.flush());
        drop(stdout);

        if let Err(err) = result {
            self.fatal(err);
        }
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
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_restore_is_claimed_once() {
        assert_eq!(take_active_session(), None);

        mark_session_active(true);
        assert_eq!(take_active_session(), Some(true));
        // After a normal exit a later panic finds nothing to restore
        assert_eq!(take_active_session(), None);

        mark_session_active(false);
        assert_eq!(take_active_session(), Some(false));
        assert_eq!(take_active_session(), None);
    }
}
