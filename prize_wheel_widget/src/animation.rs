//! Spin animation bookkeeping.
//!
//! The surface runs the actual transition. This side only remembers which
//! plan is in flight and resolves its completion exactly once.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use prize_wheel_core::{Result, SpinOutcome, SpinPlan, WheelError};

use crate::surface::SpinAnimation;

/// Proof that a spin was started. Hand it back to `WheelWidget::finish_spin`
/// when the surface reports the transition as finished.
#[derive(Debug, PartialEq, Eq)]
pub struct SpinTicket(u64);

impl SpinTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Resolves with the outcome once the spin completes.
///
/// Yields `None` if the widget was dropped with the spin still in flight.
#[derive(Debug)]
pub struct SpinCompletion {
    rx: oneshot::Receiver<SpinOutcome>,
}

impl SpinCompletion {
    /// Non-blocking check.
    pub fn try_outcome(&mut self) -> Option<SpinOutcome> {
        self.rx.try_recv().ok().flatten()
    }
}

impl Future for SpinCompletion {
    type Output = Option<SpinOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(|r| r.ok())
    }
}

/// A spin that has been started and not finished yet.
#[derive(Debug)]
pub struct InFlight {
    pub id: u64,
    pub plan: SpinPlan,
    done: oneshot::Sender<SpinOutcome>,
}

impl InFlight {
    /// Resolve the completion future. A dropped receiver is fine.
    pub fn resolve(self, outcome: SpinOutcome) {
        let _ = self.done.send(outcome);
    }
}

#[derive(Debug, Default)]
pub struct AnimationController {
    last_id: u64,
    in_flight: Option<InFlight>,
}

impl AnimationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn pending_id(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    /// Register `plan` as the spin in flight and describe the transition to run.
    pub fn begin(
        &mut self,
        plan: SpinPlan,
        duration_ms: u32,
        easing: &str,
    ) -> (SpinTicket, SpinAnimation, SpinCompletion) {
        self.last_id += 1;
        let id = self.last_id;
        let (tx, rx) = oneshot::channel();

        let animation = SpinAnimation {
            ticket: id,
            from: plan.from_rotation,
            to: plan.target_rotation,
            duration_ms,
            easing: easing.to_string(),
        };
        self.in_flight = Some(InFlight { id, plan, done: tx });

        (SpinTicket(id), animation, SpinCompletion { rx })
    }

    /// Take the in-flight spin matching `id`.
    pub fn finish(&mut self, id: u64) -> Result<InFlight> {
        match self.in_flight.take() {
            Some(f) if f.id == id => Ok(f),
            other => {
                let pending = other.as_ref().map(|f| f.id);
                self.in_flight = other;
                Err(WheelError::StaleTicket { ticket: id, pending })
            }
        }
    }
}
