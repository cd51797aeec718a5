//! Metrics and animation timings.

use std::time::Duration;

use crate::stack::ViewAnimation;

/// Sizes are in logical units of the 1280-wide content area.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
    /// Fade in/out of a pushed or popped view.
    pub animation_show: Duration,
    /// Same, for the slide animations.
    pub animation_show_slide: Duration,
    pub animation_shake: Duration,
    /// Horizontal travel of the slide animations.
    pub slide_offset: f32,
    /// Peak displacement of the dead-end shake.
    pub shake_amplitude: f32,
    pub framerate_counter_width: f32,
    pub framerate_counter_height: f32,
    pub notification_width: f32,
    pub notification_height: f32,
    pub notification_padding: f32,
    pub notification_timeout: Duration,
    pub notification_slide: Duration,
    pub notification_max: usize,
}

impl Style {
    pub fn horizon() -> Self {
        Self {
            animation_show: Duration::from_millis(250),
            animation_show_slide: Duration::from_millis(125),
            animation_shake: Duration::from_millis(200),
            slide_offset: 60.0,
            shake_amplitude: 15.0,
            framerate_counter_width: 125.0,
            framerate_counter_height: 26.0,
            notification_width: 280.0,
            notification_height: 48.0,
            notification_padding: 16.0,
            notification_timeout: Duration::from_secs(4),
            notification_slide: Duration::from_millis(250),
            notification_max: 8,
        }
    }

    /// Show/hide duration for a view transition.
    pub fn transition_duration(&self, animation: ViewAnimation) -> Duration {
        match animation {
            ViewAnimation::Fade => self.animation_show,
            ViewAnimation::SlideLeft | ViewAnimation::SlideRight => self.animation_show_slide,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::horizon()
    }
}
