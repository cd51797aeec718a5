use std::time::Duration;

use aurora::animation::{Easing, Shake};
use aurora::prelude::*;

// =============================================================================
// Easing
// =============================================================================

#[test]
fn test_easing_linear() {
    let easing = Easing::Linear;
    assert_eq!(easing.apply(0.0), 0.0);
    assert_eq!(easing.apply(0.5), 0.5);
    assert_eq!(easing.apply(1.0), 1.0);
}

#[test]
fn test_easing_ease_in() {
    let easing = Easing::EaseIn;
    assert_eq!(easing.apply(0.0), 0.0);
    assert_eq!(easing.apply(1.0), 1.0);
    // Ease in is slow at start
    assert!(easing.apply(0.5) < 0.5);
}

#[test]
fn test_easing_ease_out() {
    let easing = Easing::EaseOut;
    assert_eq!(easing.apply(0.0), 0.0);
    assert_eq!(easing.apply(1.0), 1.0);
    // Ease out is fast at start
    assert!(easing.apply(0.5) > 0.5);
}

#[test]
fn test_easing_ease_in_out() {
    let easing = Easing::EaseInOut;
    assert_eq!(easing.apply(0.0), 0.0);
    assert_eq!(easing.apply(0.5), 0.5);
    assert_eq!(easing.apply(1.0), 1.0);
    assert!(easing.apply(0.25) < 0.25);
    assert!(easing.apply(0.75) > 0.75);
}

// =============================================================================
// Shake
// =============================================================================

#[test]
fn test_shake_moves_along_direction() {
    let shake = Shake {
        direction: FocusDirection::Right,
        progress: 0.05,
    };
    let (dx, dy) = shake.offset(15.0);
    assert!(dx > 0.0);
    assert_eq!(dy, 0.0);

    let shake = Shake {
        direction: FocusDirection::Up,
        progress: 0.05,
    };
    let (dx, dy) = shake.offset(15.0);
    assert_eq!(dx, 0.0);
    assert!(dy < 0.0);
}

#[test]
fn test_shake_rests_at_ends() {
    for progress in [0.0, 1.0] {
        let shake = Shake {
            direction: FocusDirection::Left,
            progress,
        };
        let (dx, dy) = shake.offset(15.0);
        assert!(dx.abs() < 1e-3);
        assert_eq!(dy, 0.0);
    }
}

#[test]
fn test_shake_stays_within_amplitude() {
    for step in 0..=100 {
        let shake = Shake {
            direction: FocusDirection::Down,
            progress: step as f32 / 100.0,
        };
        let (_, dy) = shake.offset(15.0);
        assert!(dy.abs() <= 15.0);
    }
}

// =============================================================================
// Tweens
// =============================================================================

#[test]
fn test_fade_in_progresses_with_time() {
    let mut ui = Ui::new("test", Style::horizon(), Theme::horizon(), ThemeVariant::Light);
    let view = ui.tree_mut().insert(Label::focusable("fading"));
    let start = ui.now();
    ui.push_view(view, ViewAnimation::Fade);
    assert_eq!(ui.tree().alpha(view), 0.0);

    ui.advance_to(start + Duration::from_millis(125));
    let halfway = ui.tree().alpha(view);
    // Ease out is past the midpoint at half time
    assert!(halfway > 0.5 && halfway < 1.0);

    ui.advance_to(start + Duration::from_millis(250));
    assert_eq!(ui.tree().alpha(view), 1.0);
    assert!(ui.animator().is_empty());
}

#[test]
fn test_destroyed_view_drops_its_tweens() {
    let mut ui = Ui::new("test", Style::horizon(), Theme::horizon(), ThemeVariant::Light);
    let view = ui.tree_mut().insert(Label::focusable("gone"));
    ui.push_view(view, ViewAnimation::SlideLeft);
    assert_eq!(ui.animator().len(), 2);

    ui.clear();

    assert!(ui.animator().is_empty());
}
