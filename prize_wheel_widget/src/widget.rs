//! One prize wheel instance.
//!
//! `WheelWidget` owns the sector set, the rotation state and the two drivers
//! that mutate it: the idle driver between spins and the animation controller
//! during a spin. `spinning` on the state is the only guard between them.
//!
//! No IO. No threads. The host delivers frames and spin completions.

use log::{debug, info, warn};
use prize_wheel_core::{
    resolve_sectors, resolve_spin, spin_outcome, RandomSource, Result, RngSource, Sector,
    SectorInput, SpinOutcome, SpinStrategy, WheelCfg, WheelError, WheelState,
};
use rand::rngs::StdRng;

use crate::animation::{AnimationController, SpinCompletion, SpinTicket};
use crate::idle::{IdleDriver, IdleTick};
use crate::layout::SectorLayout;
use crate::options::WheelOptions;
use crate::reporter::{ResultReporter, SpinResult};
use crate::surface::{FrameTicket, WheelSurface};

pub struct WheelWidget<S: WheelSurface, R: RandomSource = RngSource<StdRng>> {
    surface: S,
    rng: R,
    options: WheelOptions,
    cfg: WheelCfg,
    sectors: Vec<Sector>,
    strategy: SpinStrategy,
    layout: SectorLayout,
    state: WheelState,
    idle: IdleDriver,
    animation: AnimationController,
    reporter: ResultReporter,
    last_result: Option<SpinResult>,
}

impl<S: WheelSurface> WheelWidget<S> {
    /// Mount with an entropy-seeded random source.
    pub fn mount_default(
        target: Option<S>,
        items: &[SectorInput],
        options: WheelOptions,
    ) -> Option<Self> {
        Self::mount(target, items, options, RngSource::from_entropy())
    }
}

impl<S: WheelSurface, R: RandomSource> WheelWidget<S, R> {
    /// Build the wheel on `target`.
    ///
    /// A missing target or options failing `WheelOptions::validate` abort
    /// quietly with `None`. An empty `items` list still mounts, but the wheel
    /// stays inert.
    pub fn mount(
        target: Option<S>,
        items: &[SectorInput],
        options: WheelOptions,
        rng: R,
    ) -> Option<Self> {
        let Some(mut surface) = target else {
            warn!("prize wheel: no target surface, widget not built");
            return None;
        };
        if let Err(e) = options.validate() {
            warn!("prize wheel: {e}, widget not built");
            return None;
        }

        let sectors = resolve_sectors(items);
        let strategy = SpinStrategy::for_sectors(&sectors);
        let layout = SectorLayout::build(&sectors, &options);
        let cfg = options.to_cfg();
        let state = WheelState::new(sectors.len());

        surface.render_sectors(&layout, &options.btn_text);
        surface.set_rotation(state.displayed_rotation());
        if sectors.is_empty() {
            warn!("prize wheel: mounted without sectors, spins are disabled");
        } else {
            debug!("prize wheel: mounted {} sectors, strategy={:?}", sectors.len(), strategy);
        }

        Some(Self {
            surface,
            rng,
            idle: IdleDriver::new(cfg.idle_velocity),
            options,
            cfg,
            sectors,
            strategy,
            layout,
            state,
            animation: AnimationController::new(),
            reporter: ResultReporter::default(),
            last_result: None,
        })
    }

    /// Register the result callback. Without one, results go to `alert`.
    pub fn on_result<F>(&mut self, f: F)
    where
        F: FnMut(&SpinResult) + 'static,
    {
        self.reporter.set_callback(Box::new(f));
    }

    /// Start (or restart) idle rotation with `now_ms` as the time baseline.
    pub fn start(&mut self, now_ms: f64) {
        if self.state.spinning {
            return;
        }
        if let Some(old) = self.idle.cancel() {
            self.surface.cancel_frame(old);
        }
        let ticket = self.idle.start(now_ms);
        self.surface.request_frame(ticket);
    }

    /// Host frame callback. Returns true while idle rotation keeps going.
    pub fn on_frame(&mut self, ticket: FrameTicket, now_ms: f64) -> bool {
        match self.idle.tick(ticket, now_ms, &mut self.state) {
            IdleTick::Advanced { displayed, next } => {
                self.surface.set_rotation(displayed);
                self.surface.request_frame(next);
                true
            }
            IdleTick::Suspended => false,
            IdleTick::Stale => {
                debug!("prize wheel: dropped stale frame {:?}", ticket);
                false
            }
        }
    }

    /// Trigger a spin.
    ///
    /// `Ok(None)` when a spin is already in flight: repeated triggers are
    /// ignored. `Err(NoSectors)` on an empty wheel.
    pub fn spin(&mut self) -> Result<Option<(SpinTicket, SpinCompletion)>> {
        if self.state.spinning {
            return Ok(None);
        }
        if self.sectors.is_empty() {
            warn!("prize wheel: spin refused, no sectors");
            return Err(WheelError::NoSectors);
        }

        self.state.spinning = true;
        if let Some(t) = self.idle.cancel() {
            self.surface.cancel_frame(t);
        }

        let plan = match resolve_spin(&self.state, &self.sectors, &self.cfg, &mut self.rng) {
            Ok(p) => p,
            Err(e) => {
                self.state.spinning = false;
                return Err(e);
            }
        };
        info!(
            "prize wheel: spin {:?} {:.1} -> {:.1} ({} turns)",
            plan.strategy, plan.from_rotation, plan.target_rotation, plan.spins
        );

        self.surface.set_spin_enabled(false);
        let (ticket, anim, done) =
            self.animation.begin(plan, self.options.spin_duration, &self.options.easing);
        self.surface.animate_rotation(&anim);
        Ok(Some((ticket, done)))
    }

    /// Completion handler for the spin transition.
    pub fn finish_spin(&mut self, ticket: SpinTicket, now_ms: f64) -> Result<SpinOutcome> {
        self.finish_spin_id(ticket.id(), now_ms)
    }

    /// As `finish_spin`, for hosts that only carry the raw ticket id.
    pub fn finish_spin_id(&mut self, id: u64, now_ms: f64) -> Result<SpinOutcome> {
        let flight = self.animation.finish(id).map_err(|e| {
            warn!("prize wheel: {e}");
            e
        })?;

        self.state.commit(flight.plan.target_rotation);
        self.surface.set_rotation(self.state.displayed_rotation());

        let outcome = spin_outcome(&flight.plan, &self.sectors)?;
        info!(
            "prize wheel: landed on #{} value={} at {:.1}",
            outcome.winning_index,
            outcome.value,
            self.state.displayed_rotation()
        );
        let result = self.reporter.report(&mut self.surface, &outcome);
        self.last_result = Some(result);

        self.surface.set_spin_enabled(true);
        flight.resolve(outcome.clone());
        self.start(now_ms);
        Ok(outcome)
    }

    pub fn state(&self) -> &WheelState {
        &self.state
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    pub fn strategy(&self) -> SpinStrategy {
        self.strategy
    }

    pub fn layout(&self) -> &SectorLayout {
        &self.layout
    }

    pub fn options(&self) -> &WheelOptions {
        &self.options
    }

    pub fn is_spinning(&self) -> bool {
        self.state.spinning
    }

    pub fn is_idling(&self) -> bool {
        self.idle.is_running()
    }

    /// Value last written to `data-result`.
    pub fn last_result(&self) -> Option<&SpinResult> {
        self.last_result.as_ref()
    }

    pub fn pending_spin(&self) -> Option<u64> {
        self.animation.pending_id()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
