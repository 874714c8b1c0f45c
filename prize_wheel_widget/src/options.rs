//! Widget options as accepted from the host page.
//!
//! Keys mirror the JS-side object literal (`idleVelocity`, `spinDuration`, ...);
//! every key is optional. The result callback is registered separately, see
//! `WheelWidget::on_result`.

use prize_wheel_core::{Result, WheelCfg, WheelError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EASING: &str = "cubic-bezier(0.25, 0.1, 0.25, 1)";
pub const DEFAULT_COLOR_EVEN: &str = "var(--slice-color-even, #76071f)";
pub const DEFAULT_COLOR_ODD: &str = "var(--slice-color-odd, #a61635)";
pub const DEFAULT_COLOR_THIRD: &str = "var(--slice-color-third, #c81d40)";
pub const DEFAULT_BTN_TEXT: &str = "Крутить";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelOptions {
    /// Degrees per second while idle.
    pub idle_velocity: f64,
    /// Spin animation length in milliseconds.
    pub spin_duration: u32,
    pub min_spins: u32,
    pub max_spins: u32,
    pub easing: String,
    pub color_even: String,
    pub color_odd: String,
    pub color_third: String,
    pub btn_text: String,
}

impl Default for WheelOptions {
    fn default() -> Self {
        let cfg = WheelCfg::default();
        Self {
            idle_velocity: cfg.idle_velocity,
            spin_duration: cfg.spin_duration_ms,
            min_spins: cfg.min_spins,
            max_spins: cfg.max_spins,
            easing: DEFAULT_EASING.to_string(),
            color_even: DEFAULT_COLOR_EVEN.to_string(),
            color_odd: DEFAULT_COLOR_ODD.to_string(),
            color_third: DEFAULT_COLOR_THIRD.to_string(),
            btn_text: DEFAULT_BTN_TEXT.to_string(),
        }
    }
}

impl WheelOptions {
    /// Parse options JSON. An empty or blank string means all defaults.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let opts: Self =
            serde_json::from_str(raw).map_err(|e| WheelError::InvalidOptions(e.to_string()))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Idle rotation only ever moves forward.
    pub fn validate(&self) -> Result<()> {
        if !self.idle_velocity.is_finite() || self.idle_velocity < 0.0 {
            return Err(WheelError::InvalidOptions(format!(
                "idleVelocity must be a finite, non-negative number, got {}",
                self.idle_velocity
            )));
        }
        Ok(())
    }

    pub fn to_cfg(&self) -> WheelCfg {
        WheelCfg {
            idle_velocity: self.idle_velocity,
            spin_duration_ms: self.spin_duration,
            min_spins: self.min_spins,
            max_spins: self.max_spins,
        }
    }
}
