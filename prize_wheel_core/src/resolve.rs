use serde::{Deserialize, Serialize};

use crate::angle::{normalize_deg, sector_at_angle, sector_center};
use crate::cfg::{WheelCfg, JITTER_SPAN};
use crate::error::{Result, WheelError};
use crate::rng::RandomSource;
use crate::sector::{has_explicit_weights, Sector};
use crate::state::WheelState;

/// How the winner is chosen.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpinStrategy {
    /// Random landing angle; the winner is read off the final rotation.
    Uniform,
    /// Winner drawn from resolved probabilities; the landing angle is aimed at it.
    Weighted,
}

impl SpinStrategy {
    pub fn for_sectors(sectors: &[Sector]) -> Self {
        if has_explicit_weights(sectors) {
            SpinStrategy::Weighted
        } else {
            SpinStrategy::Uniform
        }
    }
}

/// Everything the animation needs to run one spin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinPlan {
    pub strategy: SpinStrategy,
    pub from_rotation: f64,
    pub target_rotation: f64,
    /// Full turns added on top of the landing angle.
    pub spins: u32,
    /// Uniform: random offset in `[0, 360)`. Weighted: aimed landing angle incl. jitter.
    pub offset: f64,
    /// Known up front for weighted spins only.
    pub winning_index: Option<usize>,
}

impl SpinPlan {
    /// Sector under the pointer once the wheel rests at `target_rotation`.
    pub fn landed_index(&self, sector_count: usize) -> Option<usize> {
        match self.winning_index {
            Some(idx) if idx < sector_count => Some(idx),
            _ => sector_at_angle(self.target_rotation, sector_count),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub winning_index: usize,
    pub value: String,
    pub label: String,
}

impl SpinOutcome {
    pub fn from_sector(sector: &Sector) -> Self {
        Self {
            winning_index: sector.index,
            value: sector.value.clone(),
            label: sector.label.clone(),
        }
    }
}

/// Draw a whole number of turns in `cfg.spin_range()`.
pub fn draw_spins<R: RandomSource + ?Sized>(cfg: &WheelCfg, rng: &mut R) -> u32 {
    let (lo, hi) = cfg.spin_range();
    // u64 keeps `hi - lo + 1` and the offset from wrapping at `u32::MAX`
    let (lo, hi) = (u64::from(lo), u64::from(hi));
    let span = (hi - lo + 1) as f64;
    let pick = lo.saturating_add((rng.next_unit() * span).floor() as u64);
    pick.min(hi) as u32
}

/// First sector whose cumulative probability reaches `r`; last sector if
/// rounding leaves the total short of `r`.
pub fn pick_weighted(sectors: &[Sector], r: f64) -> Option<usize> {
    let mut cumulative = 0.0_f64;
    for s in sectors {
        cumulative += s.probability;
        if cumulative >= r {
            return Some(s.index);
        }
    }
    sectors.last().map(|s| s.index)
}

pub fn plan_uniform(state: &WheelState, spins: u32, offset: f64) -> SpinPlan {
    let from = state.current_rotation;
    SpinPlan {
        strategy: SpinStrategy::Uniform,
        from_rotation: from,
        target_rotation: from + spins as f64 * 360.0 + offset,
        spins,
        offset,
        winning_index: None,
    }
}

/// Aim at the center of sector `index`, shifted by `jitter` degrees.
pub fn plan_weighted(state: &WheelState, index: usize, spins: u32, jitter: f64) -> SpinPlan {
    let from = state.current_rotation;
    let base = from - normalize_deg(from);
    let landing = sector_center(index, state.angular_width) + jitter;
    let mut target = base + spins as f64 * 360.0 + landing;
    while target < from {
        target += 360.0;
    }
    SpinPlan {
        strategy: SpinStrategy::Weighted,
        from_rotation: from,
        target_rotation: target,
        spins,
        offset: landing,
        winning_index: Some(index),
    }
}

/// Compute the next spin. Pure: `state` is not touched.
pub fn resolve_spin<R: RandomSource + ?Sized>(
    state: &WheelState,
    sectors: &[Sector],
    cfg: &WheelCfg,
    rng: &mut R,
) -> Result<SpinPlan> {
    if sectors.is_empty() || state.is_empty() {
        return Err(WheelError::NoSectors);
    }

    match SpinStrategy::for_sectors(sectors) {
        SpinStrategy::Uniform => {
            let spins = draw_spins(cfg, rng);
            let offset = (rng.next_unit() * 360.0).floor();
            Ok(plan_uniform(state, spins, offset))
        }
        SpinStrategy::Weighted => {
            let r = rng.next_unit();
            let index = pick_weighted(sectors, r).ok_or(WheelError::NoSectors)?;
            let spins = draw_spins(cfg, rng);
            let jitter = (rng.next_unit() - 0.5) * state.angular_width * JITTER_SPAN;
            Ok(plan_weighted(state, index, spins, jitter))
        }
    }
}

/// Read the outcome of a finished plan.
pub fn spin_outcome(plan: &SpinPlan, sectors: &[Sector]) -> Result<SpinOutcome> {
    let idx = plan.landed_index(sectors.len()).ok_or(WheelError::NoSectors)?;
    Ok(SpinOutcome::from_sector(&sectors[idx]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::sector::{resolve_sectors, SectorInput};

    fn plain(n: usize) -> Vec<Sector> {
        let items: Vec<_> = (0..n)
            .map(|i| SectorInput::new(format!("L{i}"), format!("v{i}")))
            .collect();
        resolve_sectors(&items)
    }

    #[test]
    fn fallback_is_last_sector() {
        let mut sectors = plain(3);
        for s in &mut sectors {
            s.probability = 0.3;
        }
        assert_eq!(pick_weighted(&sectors, 0.95), Some(2));
        assert_eq!(pick_weighted(&[], 0.5), None);
    }

    #[test]
    fn weighted_target_moves_forward() {
        let mut state = WheelState::new(4);
        state.current_rotation = 359.0;
        let plan = plan_weighted(&state, 0, 0, -10.0);
        assert!(plan.target_rotation >= plan.from_rotation);
        assert_eq!(plan.landed_index(4), Some(0));
    }

    #[test]
    fn draw_spins_top_of_range() {
        let cfg = WheelCfg::default();
        let mut rng = SequenceSource::constant(0.999_999);
        assert_eq!(draw_spins(&cfg, &mut rng), 10);
    }

    #[test]
    fn draw_spins_full_u32_range() {
        let cfg = WheelCfg {
            spin_duration_ms: 0,
            min_spins: 0,
            max_spins: u32::MAX,
            ..WheelCfg::default()
        };
        let mut mid = SequenceSource::constant(0.5);
        assert_eq!(draw_spins(&cfg, &mut mid), 1 << 31);
        let mut top = SequenceSource::constant(0.999_999_999);
        assert!(draw_spins(&cfg, &mut top) > u32::MAX - 8);
        let mut bottom = SequenceSource::constant(0.0);
        assert_eq!(draw_spins(&cfg, &mut bottom), 0);
    }

    #[test]
    fn huge_spin_bounds_still_plan() {
        let cfg = WheelCfg {
            spin_duration_ms: u32::MAX,
            min_spins: u32::MAX,
            max_spins: u32::MAX,
            ..WheelCfg::default()
        };
        let sectors = plain(4);
        let state = WheelState::new(4);
        let mut rng = SequenceSource::constant(0.25);
        let plan = resolve_spin(&state, &sectors, &cfg, &mut rng).unwrap();
        assert_eq!(plan.spins, u32::MAX);
        assert!(plan.target_rotation.is_finite());
    }

    #[test]
    fn empty_wheel_is_refused() {
        let state = WheelState::new(0);
        let mut rng = SequenceSource::constant(0.5);
        let err = resolve_spin(&state, &[], &WheelCfg::default(), &mut rng).unwrap_err();
        assert_eq!(err, WheelError::NoSectors);
    }
}
