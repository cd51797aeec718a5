//! Keyboard to button mapping for the desktop driver.

use crossterm::event::{KeyCode, KeyEventKind};

use crate::button::Buttons;

/// Button a key stands for, if any.
pub fn map_key(code: KeyCode) -> Option<Buttons> {
    let button = match code {
        KeyCode::Left => Buttons::DLEFT,
        KeyCode::Up => Buttons::DUP,
        KeyCode::Right => Buttons::DRIGHT,
        KeyCode::Down => Buttons::DDOWN,
        KeyCode::Esc => Buttons::PLUS,
        KeyCode::F(1) => Buttons::MINUS,
        KeyCode::Enter => Buttons::A,
        KeyCode::Backspace => Buttons::B,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'x' => Buttons::X,
            'y' => Buttons::Y,
            'q' => Buttons::LSTICK,
            'e' => Buttons::RSTICK,
            'l' => Buttons::L,
            'r' => Buttons::R,
            _ => return None,
        },
        _ => return None,
    };
    Some(button)
}

/// Buttons held on the keyboard.
///
/// Terminals that report key releases keep a key held until it is released.
/// Other terminals only report presses, so a key counts as held for the
/// poll its press arrived in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    held: Buttons,
    reports_release: bool,
}

impl KeyboardState {
    pub fn new(reports_release: bool) -> Self {
        Self {
            held: Buttons::empty(),
            reports_release,
        }
    }

    pub fn reports_release(&self) -> bool {
        self.reports_release
    }

    pub fn apply(&mut self, code: KeyCode, kind: KeyEventKind) {
        let Some(button) = map_key(code) else {
            return;
        };
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.held |= button,
            KeyEventKind::Release => self.held.remove(button),
        }
    }

    pub fn held(&self) -> Buttons {
        self.held
    }

    /// Called once the buttons of a poll have been sampled.
    pub fn end_poll(&mut self) {
        if !self.reports_release {
            self.held = Buttons::empty();
        }
    }
}
