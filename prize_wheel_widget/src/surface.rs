//! Presentation seam: everything the widget needs from the host page.
//!
//! The widget never touches a DOM. A host implements `WheelSurface` over its
//! own rendering (browser elements, a canvas, a test recorder) and drives the
//! frame loop by handing `FrameTicket`s back through `WheelWidget::on_frame`.

use prize_wheel_core::rotate_css;

use crate::layout::SectorLayout;

/// Handle for one requested animation frame.
///
/// Tickets are single-use; cancelling the idle driver invalidates any ticket
/// still queued on the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameTicket(pub u64);

/// A timed rotation the surface should run on its own.
///
/// The surface interpolates from `from` to `to` with `easing` and must keep
/// the wheel at `to` once finished (fill forward), then report completion
/// with `ticket`.
#[derive(Clone, Debug, PartialEq)]
pub struct SpinAnimation {
    pub ticket: u64,
    pub from: f64,
    pub to: f64,
    pub duration_ms: u32,
    pub easing: String,
}

pub trait WheelSurface {
    /// Build the wheel face. Called once at mount.
    fn render_sectors(&mut self, _layout: &SectorLayout, _button_text: &str) {}

    /// Apply a displayed rotation in `[0, 360)`.
    fn set_rotation(&mut self, displayed_deg: f64);

    /// Schedule a frame callback carrying `ticket`.
    fn request_frame(&mut self, ticket: FrameTicket);

    fn cancel_frame(&mut self, _ticket: FrameTicket) {}

    /// Start a fire-and-forget spin transition.
    fn animate_rotation(&mut self, animation: &SpinAnimation);

    fn set_spin_enabled(&mut self, _enabled: bool) {}

    /// Write the `data-result` attribute on the widget root.
    fn set_result_attr(&mut self, value: &str);

    /// Blocking user-visible prompt, used when no result callback is registered.
    fn alert(&mut self, text: &str);
}

/// In-memory surface that records what it was asked to show.
///
/// Useful for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct HeadlessSurface {
    pub rotation: f64,
    /// CSS transform matching `rotation`.
    pub transform: String,
    pub pending_frame: Option<FrameTicket>,
    pub cancelled_frames: Vec<FrameTicket>,
    pub animations: Vec<SpinAnimation>,
    pub spin_enabled: bool,
    pub result_attr: Option<String>,
    pub alerts: Vec<String>,
    pub layout: Option<SectorLayout>,
    pub button_text: String,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self {
            spin_enabled: true,
            ..Self::default()
        }
    }

    pub fn last_animation(&self) -> Option<&SpinAnimation> {
        self.animations.last()
    }
}

impl WheelSurface for HeadlessSurface {
    fn render_sectors(&mut self, layout: &SectorLayout, button_text: &str) {
        self.layout = Some(layout.clone());
        self.button_text = button_text.to_string();
    }

    fn set_rotation(&mut self, displayed_deg: f64) {
        self.rotation = displayed_deg;
        self.transform = rotate_css(displayed_deg);
    }

    fn request_frame(&mut self, ticket: FrameTicket) {
        self.pending_frame = Some(ticket);
    }

    fn cancel_frame(&mut self, ticket: FrameTicket) {
        if self.pending_frame == Some(ticket) {
            self.pending_frame = None;
        }
        self.cancelled_frames.push(ticket);
    }

    fn animate_rotation(&mut self, animation: &SpinAnimation) {
        self.animations.push(animation.clone());
    }

    fn set_spin_enabled(&mut self, enabled: bool) {
        self.spin_enabled = enabled;
    }

    fn set_result_attr(&mut self, value: &str) {
        self.result_attr = Some(value.to_string());
    }

    fn alert(&mut self, text: &str) {
        self.alerts.push(text.to_string());
    }
}
