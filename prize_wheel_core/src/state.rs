use serde::{Deserialize, Serialize};

use crate::angle::normalize_deg;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WheelState {
    pub sector_count: usize,
    /// Degrees per sector; 0 for an empty wheel.
    pub angular_width: f64,
    /// Cumulative rotation in degrees. Only ever grows.
    pub current_rotation: f64,
    pub spinning: bool,
}

impl WheelState {
    pub fn new(sector_count: usize) -> Self {
        let angular_width = if sector_count == 0 {
            0.0
        } else {
            360.0 / sector_count as f64
        };
        Self {
            sector_count,
            angular_width,
            current_rotation: 0.0,
            spinning: false,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sector_count == 0
    }

    /// Rotation as shown on screen, in `[0, 360)`.
    #[inline]
    pub fn displayed_rotation(&self) -> f64 {
        normalize_deg(self.current_rotation)
    }

    /// Idle advance. No-op while a spin is in flight.
    pub fn advance_idle(&mut self, velocity: f64, elapsed_secs: f64) {
        if self.spinning {
            return;
        }
        self.current_rotation += velocity * elapsed_secs;
    }

    /// Commit the landed rotation of a finished spin.
    pub fn commit(&mut self, rotation: f64) {
        self.current_rotation = rotation;
        self.spinning = false;
    }
}
