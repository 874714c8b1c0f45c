pub mod sector;
pub mod angle;

pub mod cfg;
pub mod error;
pub mod rng;
pub mod state;
pub mod resolve;

pub use sector::{Sector, SectorInput, resolve_sectors, has_explicit_weights};
pub use angle::{normalize_deg, sector_at_angle, sector_center, rotate_css};

pub use cfg::{WheelCfg, SPINS_PER_SECOND, JITTER_SPAN};
pub use error::{Result, WheelError};
pub use rng::{RandomSource, RngSource, SequenceSource};
pub use state::WheelState;
pub use resolve::{
    SpinStrategy, SpinPlan, SpinOutcome,
    resolve_spin, spin_outcome, plan_uniform, plan_weighted, pick_weighted, draw_spins,
};
