//! # Indoor Wind
//!
//! The indoor anemometer follows the reference station's wind, except during
//! the nightly "bedtime" windows when a fan ramps the reading linearly toward
//! a fixed ceiling. Weeknight windows start Sunday through Thursday evening;
//! weekend windows start Friday and Saturday night.

use chrono::{Datelike, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use super::schedule::DailyWindow;
use crate::utils::math::{clamp, fluctuate, interpolate, time_factor};
use crate::utils::random::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindConfig {
    pub bedtime_ceiling_mph: f64,
    pub weeknight: DailyWindow,
    pub weekend_night: DailyWindow,
    pub direction_deg: f64,
    pub direction_jitter_deg: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            bedtime_ceiling_mph: 10.0,
            weeknight: DailyWindow::from_hm((20, 0), (5, 30)),
            weekend_night: DailyWindow::from_hm((22, 0), (2, 0)),
            direction_deg: 230.0,
            direction_jitter_deg: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindReading {
    pub speed_mph: f64,
    /// Never below `speed_mph`; not capped by the bedtime ceiling
    pub gust_mph: f64,
    pub direction_deg: u16,
    /// Elapsed fraction of the active bedtime window, if any
    pub bedtime_progress: Option<f64>,
}

/// Progress through whichever bedtime window is active at `local`.
pub fn bedtime_progress(cfg: &WindConfig, local: NaiveDateTime) -> Option<f64> {
    let weekend = cfg
        .weekend_night
        .occurrence_at(local)
        .filter(|(start, _)| matches!(start.weekday(), Weekday::Fri | Weekday::Sat));
    let weeknight = || {
        cfg.weeknight
            .occurrence_at(local)
            .filter(|(start, _)| !matches!(start.weekday(), Weekday::Fri | Weekday::Sat))
    };

    weekend
        .or_else(weeknight)
        .map(|(start, end)| time_factor(local, start, end))
}

pub fn indoor_wind<R: RandomSource + ?Sized>(
    cfg: &WindConfig,
    local: NaiveDateTime,
    outdoor_speed_mph: f64,
    outdoor_gust_mph: f64,
    rng: &mut R,
) -> WindReading {
    let base = clamp(outdoor_speed_mph, Some(0.0), None);
    let progress = bedtime_progress(cfg, local);

    let speed_mph = match progress {
        Some(factor) => clamp(
            interpolate(base, cfg.bedtime_ceiling_mph, factor),
            Some(base),
            Some(cfg.bedtime_ceiling_mph),
        ),
        None => base,
    };
    let gust_mph = clamp(outdoor_gust_mph.max(speed_mph), Some(0.0), None);

    let bearing = fluctuate(cfg.direction_deg, cfg.direction_jitter_deg, rng);
    let direction_deg = (bearing.round() as i64).rem_euclid(360) as u16;

    WindReading {
        speed_mph,
        gust_mph,
        direction_deg,
        bedtime_progress: progress,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::random::ScriptedRandom;
    use chrono::NaiveDate;

    /// 2026-01-05 is a Monday.
    fn local(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 1, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn wind_at(at: NaiveDateTime, speed: f64, gust: f64) -> WindReading {
        indoor_wind(&WindConfig::default(), at, speed, gust, &mut ScriptedRandom::new([0.5]))
    }

    #[test]
    fn test_daytime_follows_outdoor() {
        let w = wind_at(local(5, 12, 0), 4.2, 9.0);
        assert_eq!(w.speed_mph, 4.2);
        assert_eq!(w.gust_mph, 9.0);
        assert_eq!(w.bedtime_progress, None);
    }

    #[test]
    fn test_weeknight_ramp_start_midway_end() {
        // Monday 20:00 -> Tuesday 05:30
        let start = wind_at(local(5, 20, 0), 2.0, 3.0);
        assert_eq!(start.speed_mph, 2.0);

        let mid = wind_at(local(6, 0, 45), 2.0, 3.0);
        assert!(mid.speed_mph > 2.0 && mid.speed_mph < 10.0);
        assert!((mid.speed_mph - 6.0).abs() < 1e-9);

        let end = wind_at(local(6, 5, 30), 2.0, 3.0);
        assert_eq!(end.speed_mph, 10.0);
        assert_eq!(end.gust_mph, 10.0);

        let after = wind_at(local(6, 5, 31), 2.0, 3.0);
        assert_eq!(after.speed_mph, 2.0);
    }

    #[test]
    fn test_weekend_night_window() {
        // Friday 2026-01-09: the weeknight window does not start
        assert_eq!(wind_at(local(9, 21, 0), 1.0, 1.0).bedtime_progress, None);
        let late = wind_at(local(9, 23, 0), 2.0, 2.0);
        assert_eq!(late.bedtime_progress, Some(0.25));
        assert!((late.speed_mph - 4.0).abs() < 1e-9);
        // Saturday 01:00 still belongs to Friday night
        assert_eq!(wind_at(local(10, 1, 0), 2.0, 2.0).bedtime_progress, Some(0.75));
        // Saturday 03:00 is outside both windows
        assert_eq!(wind_at(local(10, 3, 0), 2.0, 2.0).bedtime_progress, None);
    }

    #[test]
    fn test_sunday_night_is_a_weeknight() {
        // Sunday 2026-01-11 21:00
        assert!(wind_at(local(11, 21, 0), 0.0, 0.0).bedtime_progress.is_some());
        // Monday 03:00 continues Sunday night
        assert!(wind_at(local(12, 3, 0), 0.0, 0.0).bedtime_progress.is_some());
    }

    #[test]
    fn test_ceiling_wins_over_strong_outdoor_wind() {
        let w = wind_at(local(5, 22, 0), 14.0, 20.0);
        assert_eq!(w.speed_mph, 10.0);
        assert_eq!(w.gust_mph, 20.0);
    }

    #[test]
    fn test_negative_outdoor_wind_clamped() {
        let w = wind_at(local(5, 12, 0), -3.0, -1.0);
        assert_eq!(w.speed_mph, 0.0);
        assert_eq!(w.gust_mph, 0.0);
    }

    #[test]
    fn test_direction_jitter_and_wrap() {
        let cfg = WindConfig::default();
        let w = indoor_wind(&cfg, local(5, 12, 0), 1.0, 1.0, &mut ScriptedRandom::new([0.0]));
        assert_eq!(w.direction_deg, 220);

        let north = WindConfig {
            direction_deg: 355.0,
            ..cfg
        };
        let w = indoor_wind(&north, local(5, 12, 0), 1.0, 1.0, &mut ScriptedRandom::new([1.0]));
        assert_eq!(w.direction_deg, 5);
    }
}
