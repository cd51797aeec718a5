pub mod action;
pub mod animation;
pub mod app;
pub mod button;
pub mod driver;
pub mod event;
pub mod focus;
pub mod fonts;
pub mod frame;
pub mod framerate;
pub mod input;
pub mod notifications;
pub mod stack;
pub mod style;
pub mod tasks;
pub mod theme;
pub mod ui;
pub mod view;
pub mod views;

pub use app::{AppConfig, AppError, Application};
pub use ui::Ui;

pub mod prelude {
    pub use crate::action::{ActionId, ActionInfo};
    pub use crate::animation::Easing;
    pub use crate::app::{AppConfig, AppError, Application};
    pub use crate::button::{ButtonState, Buttons};
    pub use crate::driver::{DriverError, GraphicsError, PlatformDriver};
    pub use crate::focus::FocusDirection;
    pub use crate::frame::{FrameContext, NodeFrame};
    pub use crate::stack::ViewAnimation;
    pub use crate::style::Style;
    pub use crate::theme::{Theme, ThemeValues, ThemeVariant};
    pub use crate::ui::Ui;
    pub use crate::view::{View, ViewId, ViewTree};
    pub use crate::views::{Axis, BoxLayout, CrashView, Label};

    #[cfg(feature = "desktop")]
    pub use crate::driver::DesktopDriver;
}
