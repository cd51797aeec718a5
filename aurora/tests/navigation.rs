use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use aurora::button::Buttons;
use aurora::prelude::*;

fn new_ui() -> Ui {
    Ui::new("test", Style::horizon(), Theme::horizon(), ThemeVariant::Light)
}

fn settle(ui: &mut Ui) {
    for _ in 0..10 {
        let later = ui.now() + Duration::from_secs(1);
        ui.advance_to(later);
    }
}

/// Horizontal root holding a vertical column [a, b] and a label c.
struct Grid {
    root: ViewId,
    column: ViewId,
    a: ViewId,
    b: ViewId,
    c: ViewId,
}

fn pushed_grid(ui: &mut Ui) -> Grid {
    let tree = ui.tree_mut();
    let root = tree.insert(BoxLayout::horizontal());
    let column = tree.insert(BoxLayout::vertical());
    let a = tree.insert(Label::focusable("a"));
    let b = tree.insert(Label::focusable("b"));
    let c = tree.insert(Label::focusable("c"));
    tree.add_child(root, column);
    tree.add_child(column, a);
    tree.add_child(column, b);
    tree.add_child(root, c);

    ui.push_view(root, ViewAnimation::Fade);
    settle(ui);
    Grid {
        root,
        column,
        a,
        b,
        c,
    }
}

// =============================================================================
// Directions
// =============================================================================

#[test]
fn test_direction_from_buttons_order() {
    assert_eq!(FocusDirection::from_buttons(Buttons::DDOWN), Some(FocusDirection::Down));
    assert_eq!(
        FocusDirection::from_buttons(Buttons::DUP | Buttons::DDOWN),
        Some(FocusDirection::Down)
    );
    assert_eq!(
        FocusDirection::from_buttons(Buttons::DLEFT | Buttons::DRIGHT),
        Some(FocusDirection::Left)
    );
    assert_eq!(FocusDirection::from_buttons(Buttons::A), None);
}

#[test]
fn test_direction_axis_and_sign() {
    assert!(FocusDirection::Left.is_horizontal());
    assert!(!FocusDirection::Up.is_horizontal());
    assert_eq!(FocusDirection::Down.sign(), 1.0);
    assert_eq!(FocusDirection::Left.sign(), -1.0);
}

// =============================================================================
// Navigation
// =============================================================================

#[test]
fn test_push_focuses_first_focusable_child() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);

    assert_eq!(ui.focus(), Some(grid.a));
    assert!(ui.tree().is_focused(grid.a));
    assert!(!ui.tree().is_focused(grid.root));
}

#[test]
fn test_navigate_within_parent() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);

    ui.navigate(FocusDirection::Down);

    assert_eq!(ui.focus(), Some(grid.b));
    assert!(!ui.tree().is_focused(grid.a));
    assert!(ui.tree().is_focused(grid.b));
}

#[test]
fn test_navigate_walks_up_to_grandparent() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);
    ui.navigate(FocusDirection::Down);

    ui.navigate(FocusDirection::Right);
    assert_eq!(ui.focus(), Some(grid.c));

    // Back into the column lands on its default focus
    ui.navigate(FocusDirection::Left);
    assert_eq!(ui.focus(), Some(grid.a));
}

#[test]
fn test_dead_end_shakes_and_keeps_focus() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);
    assert!(!ui.animator().is_animating(grid.a));

    ui.navigate(FocusDirection::Up);

    assert_eq!(ui.focus(), Some(grid.a));
    assert!(ui.animator().is_animating(grid.a));

    settle(&mut ui);
    assert!(!ui.animator().is_animating(grid.a));
}

#[test]
fn test_dead_end_at_last_child() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);
    ui.navigate(FocusDirection::Right);
    assert_eq!(ui.focus(), Some(grid.c));

    ui.navigate(FocusDirection::Right);

    assert_eq!(ui.focus(), Some(grid.c));
    assert!(ui.animator().is_animating(grid.c));
}

#[test]
fn test_root_focus_does_not_move() {
    let mut ui = new_ui();
    let label = ui.tree_mut().insert(Label::focusable("alone"));
    ui.push_view(label, ViewAnimation::Fade);
    settle(&mut ui);
    assert_eq!(ui.focus(), Some(label));

    ui.navigate(FocusDirection::Down);

    assert_eq!(ui.focus(), Some(label));
    assert!(!ui.animator().is_animating(label));
}

#[test]
fn test_navigation_skips_unfocusable_children() {
    let mut ui = new_ui();
    let tree = ui.tree_mut();
    let root = tree.insert(BoxLayout::vertical());
    let first = tree.insert(Label::focusable("first"));
    let title = tree.insert(Label::new("title"));
    let last = tree.insert(Label::focusable("last"));
    tree.add_child(root, first);
    tree.add_child(root, title);
    tree.add_child(root, last);
    ui.push_view(root, ViewAnimation::Fade);
    settle(&mut ui);

    ui.navigate(FocusDirection::Down);
    assert_eq!(ui.focus(), Some(last));

    ui.navigate(FocusDirection::Up);
    assert_eq!(ui.focus(), Some(first));
}

#[test]
fn test_default_focus_index() {
    let mut ui = new_ui();
    let tree = ui.tree_mut();
    let root = tree.insert(BoxLayout::vertical().default_focus_index(1));
    let first = tree.insert(Label::focusable("first"));
    let second = tree.insert(Label::focusable("second"));
    tree.add_child(root, first);
    tree.add_child(root, second);
    ui.push_view(root, ViewAnimation::Fade);

    assert_eq!(ui.focus(), Some(second));
}

// =============================================================================
// Dispatch
// =============================================================================

#[test]
fn test_dpad_press_navigates() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);

    ui.on_buttons_pressed(Buttons::DDOWN, false);

    assert_eq!(ui.focus(), Some(grid.b));
}

#[test]
fn test_consumed_dpad_press_does_not_navigate() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);
    ui.tree_mut()
        .register_action(grid.a, "Swallow", Buttons::DDOWN, true, |_| true);

    ui.on_buttons_pressed(Buttons::DDOWN, false);

    assert_eq!(ui.focus(), Some(grid.a));
}

#[test]
fn test_repeat_moves_while_focus_changes() {
    let mut ui = new_ui();
    let tree = ui.tree_mut();
    let root = tree.insert(BoxLayout::vertical());
    let items: Vec<ViewId> = (0..3)
        .map(|i| {
            let id = tree.insert(Label::focusable(format!("item {}", i)));
            tree.add_child(root, id);
            id
        })
        .collect();
    ui.push_view(root, ViewAnimation::Fade);
    settle(&mut ui);

    ui.on_buttons_pressed(Buttons::DDOWN, false);
    ui.on_buttons_pressed(Buttons::DDOWN, true);
    assert_eq!(ui.focus(), Some(items[2]));

    // The first repeat into the dead end shakes, later ones are dropped
    ui.on_buttons_pressed(Buttons::DDOWN, true);
    assert!(ui.animator().is_animating(items[2]));
    settle(&mut ui);
    ui.on_buttons_pressed(Buttons::DDOWN, true);
    assert_eq!(ui.focus(), Some(items[2]));
    assert!(!ui.animator().is_animating(items[2]));
}

#[test]
fn test_repeat_does_not_refire_action() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);
    let fired = Rc::new(RefCell::new(0));
    let seen = fired.clone();
    ui.tree_mut().register_action(grid.a, "Open", Buttons::A, false, move |_| {
        *fired.borrow_mut() += 1;
        true
    });

    ui.on_buttons_pressed(Buttons::A, false);
    ui.on_buttons_pressed(Buttons::A, true);
    ui.on_buttons_pressed(Buttons::A, true);

    assert_eq!(*seen.borrow(), 1);
}

// =============================================================================
// Focus events
// =============================================================================

#[test]
fn test_focus_change_event() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);
    let changes = Rc::new(RefCell::new(Vec::new()));
    let sink = changes.clone();
    ui.focus_change_event()
        .subscribe(move |focus| sink.borrow_mut().push(*focus));

    ui.navigate(FocusDirection::Down);
    ui.give_focus(Some(grid.column));
    ui.give_focus(None);

    assert_eq!(*changes.borrow(), vec![Some(grid.b), Some(grid.a), None]);
}

#[test]
fn test_give_focus_to_same_view_is_silent() {
    let mut ui = new_ui();
    let grid = pushed_grid(&mut ui);
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    ui.hints_update_event()
        .subscribe(move |_| *sink.borrow_mut() += 1);

    ui.give_focus(Some(grid.a));

    assert_eq!(*count.borrow(), 0);
}

#[test]
fn test_unsubscribed_listener_not_called() {
    let mut ui = new_ui();
    pushed_grid(&mut ui);
    let count = Rc::new(RefCell::new(0));
    let sink = count.clone();
    let id = ui
        .focus_change_event()
        .subscribe(move |_| *sink.borrow_mut() += 1);

    assert!(ui.focus_change_event().unsubscribe(id));
    ui.navigate(FocusDirection::Down);

    assert_eq!(*count.borrow(), 0);
}
