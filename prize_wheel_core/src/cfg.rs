/// Visual pacing: full turns per second of spin duration.
pub const SPINS_PER_SECOND: f64 = 1.5;

/// Share of one sector's width the weighted landing jitter may span.
pub const JITTER_SPAN: f64 = 0.7;

#[derive(Clone, Debug, PartialEq)]
pub struct WheelCfg {
    /// Idle rotation speed, degrees per second.
    pub idle_velocity: f64,
    pub spin_duration_ms: u32,
    pub min_spins: u32,
    pub max_spins: u32,
}

impl Default for WheelCfg {
    fn default() -> Self {
        Self {
            idle_velocity: 20.0,
            spin_duration_ms: 5000,
            min_spins: 5,
            max_spins: 10,
        }
    }
}

impl WheelCfg {
    /// Inclusive range of full turns a spin may take.
    ///
    /// The lower end is the pacing floor `ceil(duration_s * SPINS_PER_SECOND)`
    /// raised to `min_spins`, capped at `max_spins`. A `max_spins` below
    /// `min_spins` is lifted to `min_spins`.
    pub fn spin_range(&self) -> (u32, u32) {
        let hi = self.max_spins.max(self.min_spins);
        let paced = (self.spin_duration_ms as f64 / 1000.0 * SPINS_PER_SECOND).ceil() as u32;
        let lo = paced.max(self.min_spins).min(hi);
        (lo, hi)
    }
}
