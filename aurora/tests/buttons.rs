use std::time::Instant;

use aurora::button::{ButtonState, Buttons};

fn masks() -> Vec<Buttons> {
    vec![
        Buttons::empty(),
        Buttons::A,
        Buttons::B,
        Buttons::A | Buttons::B,
        Buttons::DUP | Buttons::X,
        Buttons::DPAD,
        Buttons::PLUS | Buttons::MINUS | Buttons::A,
        Buttons::all(),
    ]
}

fn transition(from: Buttons, to: Buttons) -> ButtonState {
    let now = Instant::now();
    let mut state = ButtonState::new();
    state.update(from, now);
    state.update(to, now);
    state
}

// =============================================================================
// Edges
// =============================================================================

#[test]
fn test_down_after_disjoint_transition() {
    for from in masks() {
        for to in masks() {
            if from.intersects(to) {
                continue;
            }
            let state = transition(from, to);
            assert_eq!(state.down(), to, "{:?} -> {:?}", from, to);
            assert!(!state.down().intersects(from));
        }
    }
}

#[test]
fn test_down_never_reports_held_bits() {
    for from in masks() {
        for to in masks() {
            let state = transition(from, to);
            assert!(!state.down().intersects(from));
            assert_eq!(state.down(), to - from);
        }
    }
}

#[test]
fn test_edges_partition_every_bit() {
    for from in masks() {
        for to in masks() {
            let state = transition(from, to);
            let still_held = state.held() - state.down();

            for bit in Buttons::all().iter() {
                let memberships = [
                    state.down().contains(bit),
                    still_held.contains(bit),
                    state.up().contains(bit),
                ]
                .iter()
                .filter(|m| **m)
                .count();
                assert!(memberships <= 1, "{:?} in several sets", bit);

                let expected_none = !from.contains(bit) && !to.contains(bit);
                assert_eq!(memberships == 0, expected_none, "{:?} {:?} -> {:?}", bit, from, to);
            }
        }
    }
}

#[test]
fn test_changed_and_any_held() {
    let state = transition(Buttons::A, Buttons::A);
    assert!(!state.changed());
    assert!(state.any_held());

    let state = transition(Buttons::A, Buttons::empty());
    assert!(state.changed());
    assert!(!state.any_held());
    assert_eq!(state.up(), Buttons::A);
}

#[test]
fn test_changed_at_only_moves_on_change() {
    let start = Instant::now();
    let later = start + std::time::Duration::from_millis(100);
    let mut state = ButtonState::new();

    state.update(Buttons::A, start);
    state.update(Buttons::A, later);

    assert_eq!(state.changed_at(), Some(start));
}

// =============================================================================
// Masks
// =============================================================================

#[test]
fn test_dpad_is_the_four_directions() {
    assert_eq!(Buttons::DPAD.bits().count_ones(), 4);
    assert!(Buttons::DPAD.contains(Buttons::DLEFT | Buttons::DUP | Buttons::DRIGHT | Buttons::DDOWN));
    assert!(!Buttons::DPAD.intersects(Buttons::A | Buttons::PLUS));
}

#[test]
fn test_button_bit_order() {
    assert_eq!(Buttons::A.bits(), 1);
    assert_eq!(Buttons::PLUS.bits(), 1 << 8);
    assert_eq!(Buttons::DDOWN.bits(), 1 << 13);
}

#[test]
fn test_labels() {
    assert_eq!(Buttons::A.label(), "A");
    assert_eq!(Buttons::PLUS.label(), "+");
    assert_eq!(Buttons::DDOWN.label(), "Down");
    assert_eq!((Buttons::A | Buttons::B).label(), "?");
}
