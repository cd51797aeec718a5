//! Tweens of node properties, advanced once per frame.
//!
//! A tween may carry a stack completion. The completion is handed back when
//! the tween finishes, when it is replaced by another tween of the same
//! property, or when its view is destroyed, so a transition always hears
//! back from every animation it started.

use std::f32::consts::PI;
use std::time::{Duration, Instant};

use crate::focus::FocusDirection;
use crate::stack::StackEvent;
use crate::view::{ViewId, ViewTree};

/// Easing function for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed
    #[default]
    Linear,
    /// Slow start, fast end
    EaseIn,
    /// Fast start, slow end
    EaseOut,
    /// Slow start and end
    EaseInOut,
}

impl Easing {
    /// Map normalized time (0.0 to 1.0) to normalized progress.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// Animated node property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Alpha,
    TranslateX,
    Shake,
}

/// Dead-end wiggle of the focus highlight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shake {
    pub direction: FocusDirection,
    /// 0.0 to 1.0 over the shake duration.
    pub progress: f32,
}

impl Shake {
    /// Highlight displacement: a decaying oscillation along the direction
    /// of travel.
    pub fn offset(&self, amplitude: f32) -> (f32, f32) {
        let p = self.progress.clamp(0.0, 1.0);
        let distance = (p * PI * 6.0).sin() * (1.0 - p) * amplitude * self.direction.sign();
        if self.direction.is_horizontal() {
            (distance, 0.0)
        } else {
            (0.0, distance)
        }
    }
}

#[derive(Debug)]
struct Tween {
    target: ViewId,
    property: Property,
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
    easing: Easing,
    shake: Option<FocusDirection>,
    completion: Option<StackEvent>,
}

impl Tween {
    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn apply(&self, tree: &mut ViewTree, progress: f32) {
        let value = self.from + (self.to - self.from) * self.easing.apply(progress);
        match self.property {
            Property::Alpha => tree.set_alpha(self.target, value),
            Property::TranslateX => {
                let (_, y) = tree.translation(self.target);
                tree.set_translation(self.target, value, y);
            }
            Property::Shake => {
                let shake = self.shake.filter(|_| progress < 1.0).map(|direction| Shake {
                    direction,
                    progress: value,
                });
                tree.set_shake(self.target, shake);
            }
        }
    }
}

/// Running tweens, at most one per view and property.
#[derive(Debug, Default)]
pub struct Animator {
    tweens: Vec<Tween>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tween `property` of `target` from `from` to `to`. Returns the
    /// completion of the tween it replaces, if any.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn start(
        &mut self,
        target: ViewId,
        property: Property,
        from: f32,
        to: f32,
        now: Instant,
        duration: Duration,
        easing: Easing,
        completion: Option<StackEvent>,
    ) -> Option<StackEvent> {
        let replaced = self.kill(target, property);
        self.tweens.push(Tween {
            target,
            property,
            from,
            to,
            start: now,
            duration,
            easing,
            shake: None,
            completion,
        });
        replaced
    }

    pub(crate) fn start_shake(
        &mut self,
        target: ViewId,
        direction: FocusDirection,
        now: Instant,
        duration: Duration,
    ) -> Option<StackEvent> {
        let replaced = self.kill(target, Property::Shake);
        self.tweens.push(Tween {
            target,
            property: Property::Shake,
            from: 0.0,
            to: 1.0,
            start: now,
            duration,
            easing: Easing::Linear,
            shake: Some(direction),
            completion: None,
        });
        replaced
    }

    /// Stop a tween where it is. Returns its completion.
    pub(crate) fn kill(&mut self, target: ViewId, property: Property) -> Option<StackEvent> {
        let index = self
            .tweens
            .iter()
            .position(|t| t.target == target && t.property == property)?;
        self.tweens.remove(index).completion
    }

    /// Drop every tween of the given views. Returns their completions.
    pub(crate) fn kill_targets(&mut self, targets: &[ViewId]) -> Vec<StackEvent> {
        let mut completions = Vec::new();
        self.tweens.retain_mut(|tween| {
            if targets.contains(&tween.target) {
                completions.extend(tween.completion.take());
                false
            } else {
                true
            }
        });
        completions
    }

    /// Apply every tween at `now`. Finished tweens, and tweens whose view is
    /// gone, are removed and their completions returned in start order.
    pub(crate) fn advance(&mut self, now: Instant, tree: &mut ViewTree) -> Vec<StackEvent> {
        let mut completions = Vec::new();
        self.tweens.retain_mut(|tween| {
            if !tree.contains(tween.target) {
                completions.extend(tween.completion.take());
                return false;
            }
            let progress = tween.progress(now);
            tween.apply(tree, progress);
            if progress >= 1.0 {
                completions.extend(tween.completion.take());
                false
            } else {
                true
            }
        });
        completions
    }

    pub fn is_animating(&self, target: ViewId) -> bool {
        self.tweens.iter().any(|t| t.target == target)
    }

    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Drop every tween without delivering completions.
    pub fn clear(&mut self) {
        self.tweens.clear();
    }
}
