//! Idle rotation driver.
//!
//! Advances the wheel at a fixed angular velocity on every host frame while
//! no spin is in flight. Each tick hands out the ticket for the next frame;
//! only the most recent ticket is honoured, so a frame that was already queued
//! when the driver got cancelled cannot touch the rotation afterwards.

use prize_wheel_core::WheelState;

use crate::surface::FrameTicket;

/// What a frame callback did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum IdleTick {
    /// Rotation advanced; the host should deliver `next` on its next frame.
    Advanced { displayed: f64, next: FrameTicket },
    /// A spin is in flight; the driver stopped rescheduling itself.
    Suspended,
    /// Ticket was cancelled or superseded; nothing happened.
    Stale,
}

#[derive(Clone, Debug)]
pub struct IdleDriver {
    velocity: f64,
    last_time_ms: f64,
    next_ticket: u64,
    pending: Option<FrameTicket>,
}

impl IdleDriver {
    pub fn new(velocity: f64) -> Self {
        Self {
            velocity,
            last_time_ms: 0.0,
            next_ticket: 0,
            pending: None,
        }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    fn issue(&mut self) -> FrameTicket {
        self.next_ticket += 1;
        let t = FrameTicket(self.next_ticket);
        self.pending = Some(t);
        t
    }

    /// (Re)start from `now_ms`. Any earlier ticket becomes stale.
    pub fn start(&mut self, now_ms: f64) -> FrameTicket {
        self.last_time_ms = now_ms;
        self.issue()
    }

    /// Stop rescheduling. Returns the ticket that was still queued, if any.
    pub fn cancel(&mut self) -> Option<FrameTicket> {
        self.pending.take()
    }

    pub fn tick(&mut self, ticket: FrameTicket, now_ms: f64, state: &mut WheelState) -> IdleTick {
        if self.pending != Some(ticket) {
            return IdleTick::Stale;
        }
        if state.spinning {
            self.pending = None;
            return IdleTick::Suspended;
        }

        // frame timestamps may trail the start baseline slightly
        let elapsed_secs = ((now_ms - self.last_time_ms) / 1000.0).max(0.0);
        self.last_time_ms = now_ms;
        state.advance_idle(self.velocity, elapsed_secs);

        IdleTick::Advanced {
            displayed: state.displayed_rotation(),
            next: self.issue(),
        }
    }
}
