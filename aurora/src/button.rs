//! Logical gamepad buttons and their edge-triggered state.

use std::time::Instant;

bitflags::bitflags! {
    /// A set of logical buttons. Keyboards and touch are mapped onto these
    /// by the platform driver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const X = 1 << 2;
        const Y = 1 << 3;
        const LSTICK = 1 << 4;
        const RSTICK = 1 << 5;
        const L = 1 << 6;
        const R = 1 << 7;
        const PLUS = 1 << 8;
        const MINUS = 1 << 9;
        const DLEFT = 1 << 10;
        const DUP = 1 << 11;
        const DRIGHT = 1 << 12;
        const DDOWN = 1 << 13;
    }
}

impl Buttons {
    /// The four directional pad buttons.
    pub const DPAD: Buttons = Buttons::DLEFT
        .union(Buttons::DUP)
        .union(Buttons::DRIGHT)
        .union(Buttons::DDOWN);

    /// Short display name of a single button, used by hint footers.
    pub fn label(self) -> &'static str {
        LABELS
            .iter()
            .find(|(button, _)| *button == self)
            .map_or("?", |(_, label)| label)
    }
}

const LABELS: [(Buttons, &str); 14] = [
    (Buttons::A, "A"),
    (Buttons::B, "B"),
    (Buttons::X, "X"),
    (Buttons::Y, "Y"),
    (Buttons::LSTICK, "LS"),
    (Buttons::RSTICK, "RS"),
    (Buttons::L, "L"),
    (Buttons::R, "R"),
    (Buttons::PLUS, "+"),
    (Buttons::MINUS, "-"),
    (Buttons::DLEFT, "Left"),
    (Buttons::DUP, "Up"),
    (Buttons::DRIGHT, "Right"),
    (Buttons::DDOWN, "Down"),
];

/// Two consecutive snapshots of the held buttons.
///
/// A bit is in exactly one of `down()`, `held() - down()`, `up()`, or none
/// of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    held: Buttons,
    held_prev: Buttons,
    changed_at: Option<Instant>,
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a new snapshot. `now` is remembered when the held set changes.
    pub fn update(&mut self, held: Buttons, now: Instant) {
        self.held_prev = self.held;
        self.held = held;
        if self.held != self.held_prev {
            self.changed_at = Some(now);
        }
    }

    /// Newly pressed since the previous snapshot.
    pub fn down(&self) -> Buttons {
        self.held & !self.held_prev
    }

    /// Released since the previous snapshot.
    pub fn up(&self) -> Buttons {
        self.held_prev & !self.held
    }

    pub fn held(&self) -> Buttons {
        self.held
    }

    pub fn changed(&self) -> bool {
        self.held != self.held_prev
    }

    pub fn any_held(&self) -> bool {
        !self.held.is_empty()
    }

    /// When the held set last changed.
    pub fn changed_at(&self) -> Option<Instant> {
        self.changed_at
    }
}
