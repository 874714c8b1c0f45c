//! prize_wheel_widget
//!
//! Stateful prize wheel component built on `prize_wheel_core`.
//!
//! Responsibilities:
//! - own one wheel's sectors and rotation state
//! - drive idle rotation from host frame callbacks
//! - start spins, track the one in flight, commit it on completion
//! - report results through a callback or the surface fallback
//!
//! Non-goals:
//! - no DOM (hosts implement `WheelSurface`)
//! - no threads, no timers of its own

pub mod animation;
pub mod idle;
pub mod layout;
pub mod options;
pub mod reporter;
pub mod surface;
pub mod widget;

pub use animation::{
    AnimationController,
    SpinCompletion,
    SpinTicket,
};

pub use idle::{IdleDriver, IdleTick};
pub use layout::{SectorLayout, SectorPaint};
pub use options::{
    WheelOptions, DEFAULT_BTN_TEXT, DEFAULT_COLOR_EVEN, DEFAULT_COLOR_ODD, DEFAULT_COLOR_THIRD,
    DEFAULT_EASING,
};
pub use reporter::{ResultReporter, SpinResult};

pub use surface::{
    FrameTicket,
    HeadlessSurface,
    SpinAnimation,
    WheelSurface,
};

pub use widget::WheelWidget;
