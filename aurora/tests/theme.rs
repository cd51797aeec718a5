use std::time::Duration;

use aurora::prelude::*;

// =============================================================================
// Variant
// =============================================================================

#[test]
fn test_variant_from_env_value() {
    assert_eq!(ThemeVariant::from_env_value(Some("dark")), ThemeVariant::Dark);
    assert_eq!(ThemeVariant::from_env_value(Some("DARK")), ThemeVariant::Dark);
    assert_eq!(ThemeVariant::from_env_value(Some("Dark")), ThemeVariant::Dark);
    assert_eq!(ThemeVariant::from_env_value(Some("light")), ThemeVariant::Light);
    assert_eq!(ThemeVariant::from_env_value(Some("darker")), ThemeVariant::Light);
    assert_eq!(ThemeVariant::from_env_value(Some("")), ThemeVariant::Light);
    assert_eq!(ThemeVariant::from_env_value(None), ThemeVariant::Light);
}

#[test]
fn test_theme_values_per_variant() {
    let theme = Theme::horizon();

    assert_eq!(theme.values(ThemeVariant::Light), &theme.light);
    assert_eq!(theme.values(ThemeVariant::Dark), &theme.dark);
    assert_ne!(theme.light.background, theme.dark.background);
    assert_ne!(theme.light.text, theme.dark.text);
}

#[test]
fn test_switching_variant() {
    let mut ui = Ui::new("test", Style::horizon(), Theme::horizon(), ThemeVariant::Light);

    ui.set_theme_variant(ThemeVariant::Dark);

    assert_eq!(ui.theme_values(), &Theme::horizon().dark);
}

// =============================================================================
// Style
// =============================================================================

#[test]
fn test_style_durations() {
    let style = Style::horizon();

    assert_eq!(
        style.transition_duration(ViewAnimation::Fade),
        Duration::from_millis(250)
    );
    assert_eq!(
        style.transition_duration(ViewAnimation::SlideLeft),
        Duration::from_millis(125)
    );
    assert_eq!(
        style.transition_duration(ViewAnimation::SlideRight),
        Duration::from_millis(125)
    );
    assert_eq!(style.notification_timeout, Duration::from_secs(4));
    assert_eq!(style.notification_max, 8);
}

#[test]
fn test_only_fade_waits() {
    assert!(ViewAnimation::Fade.waits());
    assert!(!ViewAnimation::SlideLeft.waits());
    assert!(!ViewAnimation::SlideRight.waits());
    assert_eq!(ViewAnimation::default(), ViewAnimation::Fade);
}
