//! # Recurring Time-of-Day Windows
//!
//! Every scheduled effect in the indoor model (thermostat ramps, bedtime
//! wind, daylight, the baseline drift) is expressed as a window on the local
//! wall clock that recurs every day. A window whose end is not after its
//! start wraps past midnight into the next day.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::utils::math::{interpolate, time_factor};

/// Build a wall-clock time from hour and minute.
pub(crate) fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

/// Daily window `[start, end]` on the local clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DailyWindow {
    pub fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    /// Convenience constructor from `(hour, minute)` pairs.
    pub fn from_hm(start: (u32, u32), end: (u32, u32)) -> Self {
        Self::new(hm(start.0, start.1), hm(end.0, end.1))
    }

    pub fn wraps_midnight(&self) -> bool {
        self.end <= self.start
    }

    /// The concrete occurrence of this window that contains `at`, if any.
    ///
    /// Both ends are inclusive. For a wrapping window the occurrence may have
    /// started on the previous calendar day.
    pub fn occurrence_at(&self, at: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let date = at.date();

        if !self.wraps_midnight() {
            let start = date.and_time(self.start);
            let end = date.and_time(self.end);
            return (at >= start && at <= end).then_some((start, end));
        }

        let today_start = date.and_time(self.start);
        if at >= today_start {
            let end = date.succ_opt()?.and_time(self.end);
            return Some((today_start, end));
        }

        let start = date.pred_opt()?.and_time(self.start);
        let end = date.and_time(self.end);
        (at <= end).then_some((start, end))
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        self.occurrence_at(at).is_some()
    }

    /// Elapsed fraction of the occurrence containing `at`, `None` outside.
    pub fn progress(&self, at: NaiveDateTime) -> Option<f64> {
        self.occurrence_at(at)
            .map(|(start, end)| time_factor(at, start, end))
    }
}

/// Values that drift over the baseline window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineValues {
    pub temp_f: f64,
    pub baro_in: f64,
    pub rain_in: f64,
    pub daily_rain_in: f64,
}

impl BaselineValues {
    pub fn interpolate(&self, peak: &BaselineValues, factor: f64) -> BaselineValues {
        BaselineValues {
            temp_f: interpolate(self.temp_f, peak.temp_f, factor),
            baro_in: interpolate(self.baro_in, peak.baro_in, factor),
            rain_in: interpolate(self.rain_in, peak.rain_in, factor),
            daily_rain_in: interpolate(self.daily_rain_in, peak.daily_rain_in, factor),
        }
    }
}

/// Start/peak value tables interpolated across a recurring daily window.
///
/// Before the window the start values hold, after it the peak values hold
/// until midnight. A window that wraps midnight falls back to the start
/// values outside of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineSchedule {
    pub window: DailyWindow,
    pub start: BaselineValues,
    pub peak: BaselineValues,
}

impl Default for BaselineSchedule {
    fn default() -> Self {
        let values = BaselineValues {
            temp_f: 70.0,
            baro_in: 30.30,
            rain_in: 0.0,
            daily_rain_in: 0.0,
        };
        Self {
            window: DailyWindow::from_hm((18, 54), (23, 59)),
            start: values,
            peak: values,
        }
    }
}

impl BaselineSchedule {
    pub fn factor(&self, at: NaiveDateTime) -> f64 {
        if self.window.wraps_midnight() {
            return self.window.progress(at).unwrap_or(0.0);
        }
        let date = at.date();
        time_factor(
            at,
            date.and_time(self.window.start),
            date.and_time(self.window.end),
        )
    }

    pub fn values_at(&self, at: NaiveDateTime) -> BaselineValues {
        self.start.interpolate(&self.peak, self.factor(at))
    }
}
