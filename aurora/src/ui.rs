//! The UI context: every piece of state the views, actions and the run
//! loop share.

use std::time::Instant;

use aurora_vg::{Canvas, Rect};

use crate::animation::Animator;
use crate::event::Event;
use crate::fonts::FontStash;
use crate::frame::FrameContext;
use crate::framerate::FramerateCounter;
use crate::input::InputBlock;
use crate::notifications::Notifications;
use crate::stack::{ViewAnimation, ViewStack};
use crate::style::Style;
use crate::tasks::TaskScheduler;
use crate::theme::{Theme, ThemeValues, ThemeVariant};
use crate::view::{ViewId, ViewTree};
use crate::views::CrashView;

/// Logical width of the content area. Heights follow the window's aspect.
pub const CONTENT_WIDTH: f32 = 1280.0;
pub const CONTENT_HEIGHT: f32 = 720.0;

pub struct Ui {
    pub(crate) tree: ViewTree,
    pub(crate) stack: ViewStack,
    pub(crate) animator: Animator,
    pub(crate) tasks: TaskScheduler,
    pub(crate) notifications: Notifications,
    pub(crate) framerate: Option<FramerateCounter>,
    pub(crate) input_block: InputBlock,
    pub(crate) focus: Option<ViewId>,
    pub(crate) repetition_old_focus: Option<ViewId>,
    pub(crate) focus_changed: Event<Option<ViewId>>,
    pub(crate) hints_updated: Event<()>,
    pub(crate) style: Style,
    pub(crate) theme: Theme,
    pub(crate) variant: ThemeVariant,
    pub(crate) fonts: FontStash,
    pub(crate) title: String,
    pub(crate) window_width: u32,
    pub(crate) window_height: u32,
    pub(crate) window_scale: f32,
    pub(crate) content_width: f32,
    pub(crate) content_height: f32,
    pub(crate) now: Instant,
    pub(crate) quit_requested: bool,
}

impl std::fmt::Debug for Ui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ui")
            .field("title", &self.title)
            .field("stack", &self.stack)
            .field("focus", &self.focus)
            .field("input_block", &self.input_block)
            .field("window", &(self.window_width, self.window_height))
            .finish_non_exhaustive()
    }
}

impl Ui {
    pub fn new(title: impl Into<String>, style: Style, theme: Theme, variant: ThemeVariant) -> Self {
        Self {
            tree: ViewTree::new(),
            stack: ViewStack::default(),
            animator: Animator::new(),
            tasks: TaskScheduler::new(),
            notifications: Notifications::new(),
            framerate: None,
            input_block: InputBlock::new(),
            focus: None,
            repetition_old_focus: None,
            focus_changed: Event::new(),
            hints_updated: Event::new(),
            style,
            theme,
            variant,
            fonts: FontStash::default(),
            title: title.into(),
            window_width: CONTENT_WIDTH as u32,
            window_height: CONTENT_HEIGHT as u32,
            window_scale: 1.0,
            content_width: CONTENT_WIDTH,
            content_height: CONTENT_HEIGHT,
            now: Instant::now(),
            quit_requested: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn tree(&self) -> &ViewTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ViewTree {
        &mut self.tree
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn tasks(&self) -> &TaskScheduler {
        &self.tasks
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn framerate_counter(&self) -> Option<&FramerateCounter> {
        self.framerate.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn theme_variant(&self) -> ThemeVariant {
        self.variant
    }

    pub fn set_theme_variant(&mut self, variant: ThemeVariant) {
        self.variant = variant;
    }

    pub fn theme_values(&self) -> &ThemeValues {
        self.theme.values(self.variant)
    }

    pub fn fonts(&self) -> &FontStash {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontStash {
        &mut self.fonts
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    pub fn window_scale(&self) -> f32 {
        self.window_scale
    }

    pub fn content_size(&self) -> (f32, f32) {
        (self.content_width, self.content_height)
    }

    /// Frame time. Every animation and task started during a frame uses it.
    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn set_now(&mut self, now: Instant) {
        self.now = now;
    }

    pub fn focus_change_event(&mut self) -> &mut Event<Option<ViewId>> {
        &mut self.focus_changed
    }

    pub fn hints_update_event(&mut self) -> &mut Event<()> {
        &mut self.hints_updated
    }

    // =========================================================================
    // Input blocking
    // =========================================================================

    pub fn block_inputs(&mut self) {
        self.input_block.block();
    }

    pub fn unblock_inputs(&mut self) {
        self.input_block.unblock();
    }

    pub fn is_input_blocked(&self) -> bool {
        self.input_block.is_blocked()
    }

    pub fn input_block_count(&self) -> u32 {
        self.input_block.count()
    }

    // =========================================================================
    // Quit
    // =========================================================================

    /// Ask the run loop to stop after this frame.
    pub fn quit(&mut self) {
        log::info!("[ui] quit requested");
        self.quit_requested = true;
    }

    pub fn is_quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn take_quit_request(&mut self) -> bool {
        std::mem::take(&mut self.quit_requested)
    }

    // =========================================================================
    // Overlays
    // =========================================================================

    pub fn notify(&mut self, text: impl Into<String>) {
        let max = self.style.notification_max;
        self.notifications.notify(text, self.now, max);
    }

    pub fn set_display_framerate(&mut self, enabled: bool) {
        match (self.framerate.is_some(), enabled) {
            (false, true) => {
                log::info!("[ui] enabling framerate counter");
                self.framerate = Some(FramerateCounter::new(self.now));
                self.resize_framerate_counter();
            }
            (true, false) => {
                log::info!("[ui] disabling framerate counter");
                self.framerate = None;
            }
            _ => {}
        }
    }

    pub fn toggle_framerate_display(&mut self) {
        self.set_display_framerate(self.framerate.is_none());
    }

    fn resize_framerate_counter(&mut self) {
        let width = self.style.framerate_counter_width;
        let height = self.style.framerate_counter_height;
        if let Some(counter) = self.framerate.as_mut() {
            counter.set_boundaries(Rect::new(CONTENT_WIDTH - width, 0.0, width, height));
        }
    }

    /// Show a full-screen error whose A action quits.
    pub fn crash(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::error!("[ui] crash: {}", text);
        let view = self.tree.insert(CrashView::new(text));
        CrashView::register_actions(&mut self.tree, view);
        self.push_view(view, ViewAnimation::Fade);
    }

    // =========================================================================
    // Window
    // =========================================================================

    /// Rescale the content area to a new window size and resize everything
    /// that depends on it.
    pub fn on_window_size_changed(&mut self, width: u32, height: u32) {
        log::debug!(
            "[ui] window size changed: {}x{} -> {}x{}",
            self.window_width,
            self.window_height,
            width,
            height
        );

        let width = width.max(1);
        let height = height.max(1);
        self.window_scale = width as f32 / CONTENT_WIDTH;
        self.content_width = CONTENT_WIDTH;
        self.content_height = (height as f32 / self.window_scale).round();
        self.window_width = width;
        self.window_height = height;

        let content = Rect::from_size(self.content_width, self.content_height);
        let views: Vec<ViewId> = self.stack.views().collect();
        for view in views {
            self.tree.set_boundaries(view, content);
            self.tree.invalidate(view);
            self.tree.window_size_changed(view);
        }

        self.notifications.set_boundaries(content);
        self.resize_framerate_counter();
    }

    // =========================================================================
    // Frame
    // =========================================================================

    /// Advance animations to the frame time and handle their completions.
    pub fn advance_animations(&mut self) {
        let completions = self.animator.advance(self.now, &mut self.tree);
        self.stack.events.extend(completions);
        self.process_stack_events();
    }

    /// Set the frame time and advance animations to it.
    pub fn advance_to(&mut self, now: Instant) {
        self.now = now;
        self.advance_animations();
    }

    /// Shake the focus highlight of `view` after a navigation dead end.
    pub fn shake_highlight(&mut self, view: ViewId, direction: crate::focus::FocusDirection) {
        let duration = self.style.animation_shake;
        let replaced = self.animator.start_shake(view, direction, self.now, duration);
        self.stack.events.extend(replaced);
    }

    /// Draw the visible views and the overlays into `canvas`.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        let visible = self.visible_views();
        for view in &visible {
            self.tree.layout(*view);
        }

        let width = self.window_width as f32;
        let height = self.window_height.max(1) as f32;
        let pixel_ratio = width / height;

        canvas.begin_frame(width, height, pixel_ratio);
        canvas.scale(self.window_scale);

        let Ui {
            tree,
            framerate,
            notifications,
            style,
            theme,
            variant,
            fonts,
            now,
            ..
        } = self;

        let mut ctx = FrameContext {
            pixel_ratio,
            canvas,
            fonts,
            theme: theme.values(*variant),
            style,
            now: *now,
        };

        for view in visible.iter().rev() {
            tree.draw(*view, &mut ctx);
        }
        if let Some(counter) = framerate.as_mut() {
            counter.frame(&mut ctx);
        }
        notifications.frame(&mut ctx);

        ctx.canvas.reset_transform();
        ctx.canvas.end_frame();
    }

    /// Everything torn down when the application exits, in reverse order of
    /// creation. The platform driver is shut down by the caller in between.
    pub(crate) fn teardown(&mut self) {
        self.animator.clear();
        self.framerate = None;
        self.tasks.clear();
        self.notifications.clear();
    }
}
