//! The view stack and its transitions.
//!
//! Pushing and popping update the stack, the focus stack and the input
//! block right away. The show/hide animations of a transition run one
//! transition at a time: a push or pop requested while another transition is
//! animating waits in a queue and starts when the previous one has heard
//! back from every animation it started.
//!
//! Animation completions come back as [`StackEvent`]s and are processed
//! until the queue is empty.

use std::collections::VecDeque;

use aurora_vg::Rect;

use crate::Ui;
use crate::animation::{Easing, Property};
use crate::button::Buttons;
use crate::view::ViewId;

/// Upper bound on events handled in one pass.
const MAX_STACK_EVENTS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewAnimation {
    /// Cross-fade: the outgoing view finishes fading before the incoming
    /// one starts.
    #[default]
    Fade,
    /// Both views animate at the same time, moving left.
    SlideLeft,
    /// Both views animate at the same time, moving right.
    SlideRight,
}

impl ViewAnimation {
    /// Whether the second half of the transition waits for the first.
    pub fn waits(self) -> bool {
        self == ViewAnimation::Fade
    }
}

pub type PopCallback = Box<dyn FnOnce(&mut Ui)>;

/// Completion of a show or hide started by a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum StackEvent {
    /// The pushed view is fully shown.
    PushShown,
    /// The view below a pushed view finished hiding.
    PushOutgoingHidden {
        incoming: ViewId,
        animation: ViewAnimation,
        wait: bool,
    },
    /// The popped view finished hiding.
    PopHidden {
        outgoing: ViewId,
        exposed: Option<ViewId>,
        animation: ViewAnimation,
        wait: bool,
    },
    /// The view exposed by a pop is fully shown.
    PopShown { unblock: bool },
}

enum StackCommand {
    Push {
        view: ViewId,
        animation: ViewAnimation,
    },
    Pop {
        view: ViewId,
        animation: ViewAnimation,
        callback: Option<PopCallback>,
    },
}

#[derive(Default)]
struct Transition {
    /// Completions not processed yet.
    pending: usize,
    callback: Option<PopCallback>,
}

#[derive(Debug, Clone, Copy)]
struct StackEntry {
    view: ViewId,
    /// Popped, still animating out.
    dismissing: bool,
}

/// Stacked top-level views plus the saved focus of each covered view.
#[derive(Default)]
pub struct ViewStack {
    entries: Vec<StackEntry>,
    focus_stack: Vec<Option<ViewId>>,
    transition: Option<Transition>,
    queue: VecDeque<StackCommand>,
    pub(crate) events: VecDeque<StackEvent>,
    processing: bool,
}

impl std::fmt::Debug for ViewStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewStack")
            .field("entries", &self.entries)
            .field("focus_stack", &self.focus_stack)
            .field("transitioning", &self.transition.is_some())
            .field("queued", &self.queue.len())
            .finish()
    }
}

impl ViewStack {
    /// Views that are stacked and not being popped.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| !e.dismissing).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topmost view that is not being popped.
    pub fn top(&self) -> Option<ViewId> {
        self.entries
            .iter()
            .rev()
            .find(|e| !e.dismissing)
            .map(|e| e.view)
    }

    /// Every stacked view bottom to top, including views animating out.
    pub fn views(&self) -> impl DoubleEndedIterator<Item = ViewId> + '_ {
        self.entries.iter().map(|e| e.view)
    }

    pub fn focus_stack_len(&self) -> usize {
        self.focus_stack.len()
    }

    /// A transition is animating or waiting to start.
    pub fn is_busy(&self) -> bool {
        self.transition.is_some() || !self.queue.is_empty()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Closest view below `view` that is not being popped.
    fn below(&self, view: ViewId) -> Option<ViewId> {
        let index = self.entries.iter().position(|e| e.view == view)?;
        self.entries[..index]
            .iter()
            .rev()
            .find(|e| !e.dismissing)
            .map(|e| e.view)
    }

    fn remove(&mut self, view: ViewId) {
        self.entries.retain(|e| e.view != view);
    }

    fn track(&mut self) {
        if let Some(transition) = self.transition.as_mut() {
            transition.pending += 1;
        }
    }
}

impl Ui {
    /// Push `view` on top of the stack and give it focus.
    pub fn push_view(&mut self, view: ViewId, animation: ViewAnimation) {
        if !self.tree.contains(view) {
            log::warn!("[stack] refusing to push a destroyed view");
            return;
        }

        self.input_block.block();

        self.tree
            .register_action(view, "Exit", Buttons::PLUS, false, |ui| {
                ui.quit();
                true
            });
        self.tree
            .register_action(view, "FPS", Buttons::MINUS, true, |ui| {
                ui.toggle_framerate_display();
                true
            });

        let content = Rect::from_size(self.content_width, self.content_height);
        self.tree.set_boundaries(view, content);
        self.tree.invalidate(view);
        self.tree.will_appear(view, true);

        if !self.stack.is_empty() {
            log::debug!(
                "[stack] pushing {} to the focus stack",
                self.focus
                    .map_or_else(|| "nothing".to_string(), |f| self.tree.describe(f))
            );
            self.stack.focus_stack.push(self.focus);
        }

        self.give_focus(Some(view));
        self.stack.entries.push(StackEntry {
            view,
            dismissing: false,
        });

        if self.stack.is_busy() {
            log::debug!("[stack] queueing push of {}", self.tree.describe(view));
            // Invisible and see-through until its turn
            self.tree.set_alpha(view, 0.0);
            self.tree.set_force_translucent(view, true);
            self.stack.queue.push_back(StackCommand::Push { view, animation });
        } else {
            self.start_push(view, animation);
        }

        self.process_stack_events();
        self.hints_updated.fire(&());
    }

    /// Pop the top view. The root view is never popped.
    pub fn pop_view(&mut self, animation: ViewAnimation) {
        self.pop(animation, None);
    }

    /// Pop the top view and call `callback` once the exposed view is shown.
    pub fn pop_view_with(&mut self, animation: ViewAnimation, callback: impl FnOnce(&mut Ui) + 'static) {
        self.pop(animation, Some(Box::new(callback)));
    }

    fn pop(&mut self, animation: ViewAnimation, callback: Option<PopCallback>) {
        if self.stack.len() <= 1 {
            return;
        }
        let Some(view) = self.stack.top() else {
            return;
        };

        self.input_block.block();
        self.tree.will_disappear(view, true);
        self.tree.set_force_translucent(view, true);
        if let Some(entry) = self.stack.entries.iter_mut().find(|e| e.view == view) {
            entry.dismissing = true;
        }

        if let Some(previous) = self.stack.focus_stack.pop() {
            // The saved focus may have been destroyed while it was covered
            let restored = previous
                .filter(|p| self.tree.default_focus(*p).is_some())
                .or_else(|| self.stack.below(view));
            log::debug!(
                "[stack] restoring focus to {}",
                restored.map_or_else(|| "nothing".to_string(), |f| self.tree.describe(f))
            );
            self.give_focus(restored);
        }

        if self.stack.is_busy() {
            log::debug!("[stack] queueing pop of {}", self.tree.describe(view));
            self.stack.queue.push_back(StackCommand::Pop {
                view,
                animation,
                callback,
            });
        } else {
            self.start_pop(view, animation, callback);
        }

        self.process_stack_events();
        self.hints_updated.fire(&());
    }

    fn start_push(&mut self, view: ViewId, animation: ViewAnimation) {
        self.stack.transition = Some(Transition::default());
        self.tree.set_force_translucent(view, false);

        let previous = self.stack.below(view);
        let wait = animation.waits();
        let fade_out = previous.filter(|previous| {
            !self.tree.is_translucent(*previous) && !self.tree.is_translucent(view)
        });

        log::debug!(
            "[stack] showing {} ({:?}, fade out: {})",
            self.tree.describe(view),
            animation,
            fade_out.is_some()
        );

        match fade_out {
            Some(previous) => {
                // Translucent until the view below is gone
                self.tree.set_force_translucent(view, true);
                self.tree.set_alpha(view, 0.0);
                if !wait {
                    self.show_view(view, animation, StackEvent::PushShown);
                }
                self.hide_view(
                    previous,
                    animation,
                    StackEvent::PushOutgoingHidden {
                        incoming: view,
                        animation,
                        wait,
                    },
                );
            }
            None => self.show_view(view, animation, StackEvent::PushShown),
        }
    }

    fn start_pop(&mut self, view: ViewId, animation: ViewAnimation, callback: Option<PopCallback>) {
        self.stack.transition = Some(Transition {
            pending: 0,
            callback,
        });

        let wait = animation.waits();
        let exposed = self.stack.below(view);

        log::debug!("[stack] hiding {} ({:?})", self.tree.describe(view), animation);

        self.hide_view(
            view,
            animation,
            StackEvent::PopHidden {
                outgoing: view,
                exposed,
                animation,
                wait,
            },
        );

        if !wait {
            if let Some(exposed) = exposed {
                self.tree.will_appear(exposed, false);
                if self.tree.is_hidden(exposed) {
                    self.show_view(exposed, animation, StackEvent::PopShown { unblock: false });
                } else {
                    self.run_pop_callback();
                }
            }
        }
    }

    fn handle_stack_event(&mut self, event: StackEvent) {
        match event {
            StackEvent::PushShown => self.input_block.unblock(),
            StackEvent::PushOutgoingHidden {
                incoming,
                animation,
                wait,
            } => {
                self.tree.set_force_translucent(incoming, false);
                if wait {
                    self.show_view(incoming, animation, StackEvent::PushShown);
                }
            }
            StackEvent::PopHidden {
                outgoing,
                exposed,
                animation,
                wait,
            } => {
                self.tree.set_force_translucent(outgoing, false);
                self.stack.remove(outgoing);
                self.destroy_view(outgoing);

                if wait {
                    match exposed.filter(|exposed| self.tree.contains(*exposed)) {
                        Some(exposed) if self.tree.is_hidden(exposed) => {
                            self.tree.will_appear(exposed, false);
                            self.show_view(exposed, animation, StackEvent::PopShown { unblock: true });
                            return;
                        }
                        _ => self.run_pop_callback(),
                    }
                }
                self.input_block.unblock();
            }
            StackEvent::PopShown { unblock } => {
                self.run_pop_callback();
                if unblock {
                    self.input_block.unblock();
                }
            }
        }
    }

    fn run_pop_callback(&mut self) {
        let callback = self
            .stack
            .transition
            .as_mut()
            .and_then(|transition| transition.callback.take());
        if let Some(callback) = callback {
            callback(self);
        }
    }

    /// Handle queued stack events until none are left. Nested calls return
    /// immediately; the outer call picks up their events.
    pub(crate) fn process_stack_events(&mut self) {
        if self.stack.processing {
            return;
        }
        self.stack.processing = true;

        let mut handled = 0;
        while let Some(event) = self.stack.events.pop_front() {
            handled += 1;
            if handled > MAX_STACK_EVENTS {
                log::warn!(
                    "[stack] over {} transition events in one pass, dropping {}",
                    MAX_STACK_EVENTS,
                    self.stack.events.len() + 1
                );
                self.stack.events.clear();
                break;
            }

            log::trace!("[stack] {:?}", event);
            if let Some(transition) = self.stack.transition.as_mut() {
                transition.pending = transition.pending.saturating_sub(1);
            }
            self.handle_stack_event(event);
            self.finish_transition();
        }

        self.stack.processing = false;
    }

    /// End the current transition once all its completions are in, then
    /// start the next queued one.
    fn finish_transition(&mut self) {
        loop {
            let Some(transition) = self.stack.transition.as_mut() else {
                return;
            };
            if transition.pending > 0 {
                return;
            }
            if let Some(callback) = transition.callback.take() {
                callback(self);
                continue;
            }
            self.stack.transition = None;

            match self.stack.queue.pop_front() {
                Some(StackCommand::Push { view, animation }) => self.start_push(view, animation),
                Some(StackCommand::Pop {
                    view,
                    animation,
                    callback,
                }) => self.start_pop(view, animation, callback),
                None => return,
            }
        }
    }

    // =========================================================================
    // Show / hide
    // =========================================================================

    /// Animate `view` in outside of any stack transition.
    pub fn show(&mut self, view: ViewId, animation: ViewAnimation) {
        self.animate_in(view, animation, None);
        self.process_stack_events();
    }

    /// Animate `view` out outside of any stack transition. The view stays
    /// in the tree, hidden.
    pub fn hide(&mut self, view: ViewId, animation: ViewAnimation) {
        self.animate_out(view, animation, None);
        self.process_stack_events();
    }

    /// Fade `view` in as part of the current transition. `completion` is
    /// queued when the fade ends.
    fn show_view(&mut self, view: ViewId, animation: ViewAnimation, completion: StackEvent) {
        self.stack.track();
        self.animate_in(view, animation, Some(completion));
    }

    fn animate_in(&mut self, view: ViewId, animation: ViewAnimation, completion: Option<StackEvent>) {
        if !self.tree.contains(view) {
            self.stack.events.extend(completion);
            return;
        }

        self.tree.set_hidden(view, false);
        let duration = self.style.transition_duration(animation);
        let from_x = match animation {
            ViewAnimation::Fade => 0.0,
            ViewAnimation::SlideLeft => self.style.slide_offset,
            ViewAnimation::SlideRight => -self.style.slide_offset,
        };
        let (_, y) = self.tree.translation(view);
        self.tree.set_translation(view, from_x, y);
        self.tree.set_alpha(view, 0.0);

        if duration.is_zero() {
            self.finish_instantly(view, 1.0, 0.0, completion);
            return;
        }

        let now = self.now;
        let mut replaced = Vec::new();
        if from_x != 0.0 {
            replaced.extend(self.animator.start(
                view,
                Property::TranslateX,
                from_x,
                0.0,
                now,
                duration,
                Easing::EaseOut,
                None,
            ));
        } else {
            replaced.extend(self.animator.kill(view, Property::TranslateX));
        }
        replaced.extend(self.animator.start(
            view,
            Property::Alpha,
            0.0,
            1.0,
            now,
            duration,
            Easing::EaseOut,
            completion,
        ));
        self.stack.events.extend(replaced);
    }

    /// Fade `view` out as part of the current transition. An already hidden
    /// view completes at once.
    fn hide_view(&mut self, view: ViewId, animation: ViewAnimation, completion: StackEvent) {
        self.stack.track();
        self.animate_out(view, animation, Some(completion));
    }

    fn animate_out(&mut self, view: ViewId, animation: ViewAnimation, completion: Option<StackEvent>) {
        if !self.tree.contains(view) || self.tree.is_hidden(view) {
            self.stack.events.extend(completion);
            return;
        }

        self.tree.set_hidden(view, true);
        let duration = self.style.transition_duration(animation);
        let (from_x, _) = self.tree.translation(view);
        let to_x = match animation {
            ViewAnimation::Fade => from_x,
            ViewAnimation::SlideLeft => -self.style.slide_offset,
            ViewAnimation::SlideRight => self.style.slide_offset,
        };

        if duration.is_zero() {
            self.finish_instantly(view, 0.0, to_x, completion);
            return;
        }

        let now = self.now;
        let alpha = self.tree.alpha(view);
        let mut replaced = Vec::new();
        if to_x != from_x {
            replaced.extend(self.animator.start(
                view,
                Property::TranslateX,
                from_x,
                to_x,
                now,
                duration,
                Easing::EaseIn,
                None,
            ));
        }
        replaced.extend(self.animator.start(
            view,
            Property::Alpha,
            alpha,
            0.0,
            now,
            duration,
            Easing::EaseIn,
            completion,
        ));
        self.stack.events.extend(replaced);
    }

    fn finish_instantly(&mut self, view: ViewId, alpha: f32, x: f32, completion: Option<StackEvent>) {
        let mut replaced = Vec::new();
        replaced.extend(self.animator.kill(view, Property::Alpha));
        replaced.extend(self.animator.kill(view, Property::TranslateX));
        self.tree.set_alpha(view, alpha);
        let (_, y) = self.tree.translation(view);
        self.tree.set_translation(view, x, y);
        self.stack.events.extend(replaced);
        self.stack.events.extend(completion);
    }

    /// Destroy `view` and its subtree, delivering the completions of any
    /// animation still running on them.
    pub(crate) fn destroy_view(&mut self, view: ViewId) {
        let removed = self.tree.remove(view);
        let completions = self.animator.kill_targets(&removed);
        self.stack.events.extend(completions);

        if self.focus.is_some_and(|focus| removed.contains(&focus)) {
            log::debug!("[stack] focused view destroyed");
            self.focus = None;
            let fallback = self.stack.top().filter(|top| self.tree.contains(*top));
            self.give_focus(fallback);
            if self.focus.is_none() {
                self.focus_changed.fire(&None);
            }
        }
    }

    /// Destroy a view that is not stacked, such as a child of a stacked
    /// view. Focus held inside it moves to the top view's default focus.
    pub fn remove_view(&mut self, view: ViewId) {
        if self.stack.views().any(|stacked| stacked == view) {
            log::warn!("[stack] refusing to remove stacked view {}", self.tree.describe(view));
            return;
        }
        self.destroy_view(view);
        self.hints_updated.fire(&());
    }

    /// `will_disappear` and destroy every stacked view.
    pub fn clear(&mut self) {
        let views: Vec<ViewId> = self.stack.views().collect();
        self.stack.entries.clear();
        for view in views {
            self.tree.will_disappear(view, true);
            self.destroy_view(view);
        }
        self.stack.focus_stack.clear();
        self.stack.transition = None;
        self.stack.queue.clear();
        self.stack.events.clear();
    }

    /// Views drawn this frame, top first: every view down to and including
    /// the first one that is not translucent.
    pub fn visible_views(&self) -> Vec<ViewId> {
        let mut visible = Vec::new();
        for view in self.stack.views().rev() {
            visible.push(view);
            if !self.tree.is_translucent(view) {
                break;
            }
        }
        visible
    }

    pub fn stack(&self) -> &ViewStack {
        &self.stack
    }

    pub fn stack_len(&self) -> usize {
        self.stack.len()
    }

    pub fn focus_stack_len(&self) -> usize {
        self.stack.focus_stack_len()
    }
}
