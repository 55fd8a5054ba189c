//! Humidity, dew point and barometric pressure derived from the indoor temperature.

use serde::{Deserialize, Serialize};

use super::thermal::Band;
use crate::domain::Season;
use crate::utils::math::clamp;

/// Magnus coefficients (Alduchov & Eskridge style, over water).
const MAGNUS_A: f64 = 17.27;
const MAGNUS_B_C: f64 = 237.7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HumidityConfig {
    pub winter_base_pct: f64,
    pub summer_base_pct: f64,
    pub shoulder_base_pct: f64,
    /// Temperature above which the room dries out
    pub reference_temp_f: f64,
    /// Percentage points lost per degree above the reference
    pub drop_per_degree_pct: f64,
    pub band_pct: Band,
}

impl Default for HumidityConfig {
    fn default() -> Self {
        Self {
            winter_base_pct: 30.0,
            summer_base_pct: 50.0,
            shoulder_base_pct: 45.0,
            reference_temp_f: 70.0,
            drop_per_degree_pct: 0.5,
            band_pct: Band::new(20.0, 60.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressureConfig {
    pub indoor_offset_in: f64,
    pub band_in: Band,
}

impl Default for PressureConfig {
    fn default() -> Self {
        Self {
            indoor_offset_in: 0.02,
            band_in: Band::new(28.0, 31.0),
        }
    }
}

/// Seasonal base humidity, reduced while the room sits above the reference temperature.
pub fn indoor_humidity(cfg: &HumidityConfig, season: Season, temp_f: f64) -> f64 {
    let base = match season {
        Season::Winter => cfg.winter_base_pct,
        Season::Summer => cfg.summer_base_pct,
        Season::Shoulder => cfg.shoulder_base_pct,
    };
    let excess = (temp_f - cfg.reference_temp_f).max(0.0);
    cfg.band_pct.clamp(base - excess * cfg.drop_per_degree_pct)
}

/// Dew point in °F by inverting the Magnus formula.
///
/// Relative humidity is held to `[1, 100]` so the logarithm stays finite.
pub fn dew_point_f(temp_f: f64, relative_humidity_pct: f64) -> f64 {
    let rh = clamp(relative_humidity_pct, Some(1.0), Some(100.0));
    let tc = (temp_f - 32.0) * 5.0 / 9.0;
    let alpha = (MAGNUS_A * tc) / (MAGNUS_B_C + tc) + (rh / 100.0).ln();
    let dc = MAGNUS_B_C * alpha / (MAGNUS_A - alpha);
    dc * 9.0 / 5.0 + 32.0
}

pub fn indoor_pressure_in(cfg: &PressureConfig, outdoor_in: f64) -> f64 {
    cfg.band_in.clamp(outdoor_in + cfg.indoor_offset_in)
}
