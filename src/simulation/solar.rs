//! Solar radiation and UV index seen by the indoor sensor.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::schedule::DailyWindow;
use crate::domain::{Season, SkyCondition};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarLevel {
    /// W/m²
    pub radiation: f64,
    pub uv_index: f64,
}

impl SolarLevel {
    pub const DARK: SolarLevel = SolarLevel {
        radiation: 0.0,
        uv_index: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarConfig {
    pub curtains_closed: bool,
    pub daylight: DailyWindow,
    /// Reading through closed curtains or under cloud
    pub dim: SolarLevel,
    pub winter_peak: SolarLevel,
    pub shoulder_peak: SolarLevel,
    pub summer_peak: SolarLevel,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            curtains_closed: false,
            daylight: DailyWindow::from_hm((6, 0), (18, 0)),
            dim: SolarLevel {
                radiation: 50.0,
                uv_index: 0.2,
            },
            winter_peak: SolarLevel {
                radiation: 300.0,
                uv_index: 2.0,
            },
            shoulder_peak: SolarLevel {
                radiation: 550.0,
                uv_index: 4.5,
            },
            summer_peak: SolarLevel {
                radiation: 800.0,
                uv_index: 7.0,
            },
        }
    }
}

impl SolarConfig {
    fn peak_for(&self, season: Season) -> SolarLevel {
        match season {
            Season::Winter => self.winter_peak,
            Season::Shoulder => self.shoulder_peak,
            Season::Summer => self.summer_peak,
        }
    }
}

pub fn indoor_solar(
    cfg: &SolarConfig,
    local: NaiveDateTime,
    season: Season,
    sky: SkyCondition,
) -> SolarLevel {
    if !cfg.daylight.contains(local) {
        return SolarLevel::DARK;
    }
    if cfg.curtains_closed || !sky.is_sunny() {
        return cfg.dim;
    }
    cfg.peak_for(season)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn local(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[rstest]
    #[case(5, 59)]
    #[case(18, 1)]
    #[case(23, 0)]
    fn test_dark_outside_daylight(#[case] h: u32, #[case] m: u32) {
        let level = indoor_solar(
            &SolarConfig::default(),
            local(h, m),
            Season::Summer,
            SkyCondition::Clear,
        );
        assert_eq!(level, SolarLevel::DARK);
    }

    #[test]
    fn test_closed_curtains_ignore_sky() {
        let cfg = SolarConfig {
            curtains_closed: true,
            ..SolarConfig::default()
        };
        let level = indoor_solar(&cfg, local(12, 0), Season::Summer, SkyCondition::Clear);
        assert_eq!(level.radiation, 50.0);
        assert_eq!(level.uv_index, 0.2);
    }

    #[test]
    fn test_overcast_falls_back_to_dim() {
        let level = indoor_solar(
            &SolarConfig::default(),
            local(12, 0),
            Season::Summer,
            SkyCondition::Overcast,
        );
        assert_eq!(level, SolarConfig::default().dim);
    }

    #[test]
    fn test_seasonal_peaks_ordered() {
        let cfg = SolarConfig::default();
        let at = local(12, 0);
        let summer = indoor_solar(&cfg, at, Season::Summer, SkyCondition::Clear);
        let shoulder = indoor_solar(&cfg, at, Season::Shoulder, SkyCondition::Few);
        let winter = indoor_solar(&cfg, at, Season::Winter, SkyCondition::SkyClear);
        assert!(summer.radiation > shoulder.radiation && shoulder.radiation > winter.radiation);
        assert!(summer.uv_index > shoulder.uv_index && shoulder.uv_index > winter.uv_index);
    }
}
