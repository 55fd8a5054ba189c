//! # Indoor Temperature Model
//!
//! Derives the indoor air temperature from season, local time and the
//! outdoor reading, with a simple HVAC reliability model on top:
//!
//! 1. Seasonal offset on the baseline (building thermal lag)
//! 2. Heating gate on outdoor temperature
//! 3. One shared reliability roll: failed / weak / full heating
//! 4. Weekday thermostat recovery ramps (morning, afternoon)
//! 5. Weekend and Friday-evening boost tiered by outdoor cold
//! 6. Cooling outside winter once the room is hot, with its own roll
//! 7. Heating overshoot that lifts the winter ceiling
//! 8. Final clamp: winter ceiling, or the fixed comfort band otherwise

use chrono::{Datelike, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::schedule::{hm, DailyWindow};
use crate::domain::Season;
use crate::utils::math::{clamp, interpolate};
use crate::utils::random::RandomSource;

/// Closed numeric band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        clamp(value, Some(self.min), Some(self.max))
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Linear thermostat recovery ramp inside a daily window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledRamp {
    pub window: DailyWindow,
    pub max_gain_f: f64,
}

impl ScheduledRamp {
    /// Heat added at `at` for the given heating strength; zero outside the window.
    pub fn contribution(&self, at: NaiveDateTime, strength: f64) -> f64 {
        self.window
            .progress(at)
            .map(|factor| interpolate(0.0, self.max_gain_f * strength, factor))
            .unwrap_or(0.0)
    }
}

/// Flat weekend boost applied while the outdoor temperature is below `below_f`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoostTier {
    pub below_f: f64,
    pub gain_f: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct OvershootConfig {
    pub threshold_f: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub probability: f64,
    pub amount_f: Band,
}

/// Reliability rolls split `[0, 1)` into bands: `[0, failure_probability)`
/// fails, `[failure_probability, weak_below)` is weak, the rest is normal.
fn check_roll_bands(failure_probability: f64, weak_below: f64) -> Result<(), ValidationError> {
    if failure_probability <= weak_below {
        Ok(())
    } else {
        let mut err = ValidationError::new("roll_bands");
        err.message = Some("weak_below must not be less than failure_probability".into());
        Err(err)
    }
}

fn validate_heating_bands(cfg: &HeatingConfig) -> Result<(), ValidationError> {
    check_roll_bands(cfg.failure_probability, cfg.weak_below)
}

fn validate_cooling_bands(cfg: &CoolingConfig) -> Result<(), ValidationError> {
    check_roll_bands(cfg.failure_probability, cfg.weak_below)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_heating_bands"))]
pub struct HeatingConfig {
    /// Heating only runs while outdoor temperature is below this
    pub gate_outdoor_f: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub failure_probability: f64,
    /// Upper edge of the weak band; rolls in `[failure_probability, weak_below)` are weak
    #[validate(range(min = 0.0, max = 1.0))]
    pub weak_below: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub weak_multiplier: f64,
    pub morning_ramp: ScheduledRamp,
    pub afternoon_ramp: ScheduledRamp,
    /// Checked coldest first; first match wins
    pub weekend_boost: Vec<BoostTier>,
    pub friday_evening_from: NaiveTime,
    #[validate(nested)]
    pub overshoot: OvershootConfig,
}

impl Default for HeatingConfig {
    fn default() -> Self {
        Self {
            gate_outdoor_f: 55.0,
            failure_probability: 0.05,
            weak_below: 0.15,
            weak_multiplier: 0.4,
            morning_ramp: ScheduledRamp {
                window: DailyWindow::from_hm((4, 30), (6, 0)),
                max_gain_f: 6.0,
            },
            afternoon_ramp: ScheduledRamp {
                window: DailyWindow::from_hm((15, 15), (16, 30)),
                max_gain_f: 4.5,
            },
            weekend_boost: vec![
                BoostTier { below_f: 15.0, gain_f: 7.0 },
                BoostTier { below_f: 28.0, gain_f: 5.0 },
                BoostTier { below_f: 38.0, gain_f: 3.0 },
            ],
            friday_evening_from: hm(18, 0),
            overshoot: OvershootConfig {
                threshold_f: 75.0,
                probability: 0.25,
                amount_f: Band::new(0.3, 1.6),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_cooling_bands"))]
pub struct CoolingConfig {
    pub threshold_f: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub failure_probability: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub weak_below: f64,
    pub weak_removal_f: Band,
    pub normal_removal_f: Band,
    pub high_demand_from_f: f64,
    pub high_demand_extra_f: f64,
}

impl Default for CoolingConfig {
    fn default() -> Self {
        Self {
            threshold_f: 80.0,
            failure_probability: 0.08,
            weak_below: 0.18,
            weak_removal_f: Band::new(0.2, 0.6),
            normal_removal_f: Band::new(0.8, 1.6),
            high_demand_from_f: 85.0,
            high_demand_extra_f: 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalOffsets {
    pub winter_f: f64,
    pub summer_f: f64,
    pub shoulder_f: f64,
}

impl SeasonalOffsets {
    pub fn for_season(&self, season: Season) -> f64 {
        match season {
            Season::Winter => self.winter_f,
            Season::Summer => self.summer_f,
            Season::Shoulder => self.shoulder_f,
        }
    }
}

impl Default for SeasonalOffsets {
    fn default() -> Self {
        Self {
            winter_f: 3.5,
            summer_f: 1.0,
            shoulder_f: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureLimits {
    /// Winter ceiling before overshoot
    pub winter_ceiling_f: f64,
    /// Fixed band outside winter
    pub comfort_band_f: Band,
}

impl Default for TemperatureLimits {
    fn default() -> Self {
        Self {
            winter_ceiling_f: 76.0,
            comfort_band_f: Band::new(70.0, 85.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct ThermalConfig {
    pub seasonal_offsets: SeasonalOffsets,
    #[validate(nested)]
    pub heating: HeatingConfig,
    #[validate(nested)]
    pub cooling: CoolingConfig,
    pub limits: TemperatureLimits,
}

/// Outcome of the heating gate and reliability roll for one run.
///
/// `heating_failed` and `weak_heating` are never both set, and
/// `overshoot_f` stays zero unless heating ran and the room reached the
/// overshoot threshold.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HeatingState {
    pub heating_allowed: bool,
    pub heating_failed: bool,
    pub weak_heating: bool,
    pub overshoot_f: f64,
}

impl HeatingState {
    /// Output multiplier shared by every heating effect of the run.
    pub fn strength(&self, weak_multiplier: f64) -> f64 {
        if !self.heating_allowed || self.heating_failed {
            0.0
        } else if self.weak_heating {
            weak_multiplier
        } else {
            1.0
        }
    }

    pub fn is_running(&self) -> bool {
        self.heating_allowed && !self.heating_failed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CoolingOutcome {
    /// Winter, or the room stayed below the cooling threshold
    Idle,
    Failed,
    Weak { removed_f: f64 },
    Normal { removed_f: f64 },
}

impl CoolingOutcome {
    pub fn removed_f(&self) -> f64 {
        match self {
            CoolingOutcome::Weak { removed_f } | CoolingOutcome::Normal { removed_f } => *removed_f,
            CoolingOutcome::Idle | CoolingOutcome::Failed => 0.0,
        }
    }
}

/// Indoor temperature together with every contribution that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub temp_f: f64,
    pub season: Season,
    /// Baseline plus seasonal offset
    pub seasonal_baseline_f: f64,
    pub ramp_gain_f: f64,
    pub boost_gain_f: f64,
    pub heating: HeatingState,
    pub cooling: CoolingOutcome,
    /// Upper bound applied by the final clamp
    pub ceiling_f: f64,
}

impl TemperatureReading {
    pub fn heating_gain_f(&self) -> f64 {
        self.ramp_gain_f + self.boost_gain_f
    }
}

pub struct TemperatureModel {
    config: ThermalConfig,
}

impl TemperatureModel {
    pub fn new(config: ThermalConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    /// Run steps 1-8 for one local instant.
    ///
    /// Random draws happen in a fixed order: heating roll (only when heating
    /// is allowed), cooling roll and amount (only when cooling engages),
    /// overshoot roll and amount (only when heating ran and the room is warm).
    pub fn compute<R: RandomSource + ?Sized>(
        &self,
        local: NaiveDateTime,
        outdoor_f: f64,
        baseline_f: f64,
        rng: &mut R,
    ) -> TemperatureReading {
        let cfg = &self.config;
        let season = Season::from_month(local.month());

        let seasonal_baseline_f = baseline_f + cfg.seasonal_offsets.for_season(season);
        let mut temp = seasonal_baseline_f;

        let mut heating = self.roll_heating(outdoor_f, rng);
        let strength = heating.strength(cfg.heating.weak_multiplier);

        let mut ramp_gain_f = 0.0;
        let mut boost_gain_f = 0.0;
        if strength > 0.0 {
            if is_weekday(local) {
                ramp_gain_f = cfg.heating.morning_ramp.contribution(local, strength)
                    + cfg.heating.afternoon_ramp.contribution(local, strength);
            }
            if self.is_boost_period(local) {
                boost_gain_f = self.boost_for(outdoor_f) * strength;
            }
        }
        temp += ramp_gain_f + boost_gain_f;

        let cooling = if !season.is_winter() && temp >= cfg.cooling.threshold_f {
            self.roll_cooling(temp, rng)
        } else {
            CoolingOutcome::Idle
        };
        temp -= cooling.removed_f();

        let overshoot = &cfg.heating.overshoot;
        if heating.is_running()
            && temp >= overshoot.threshold_f
            && rng.next_unit() < overshoot.probability
        {
            heating.overshoot_f = rng.uniform(overshoot.amount_f.min, overshoot.amount_f.max);
        }

        let (temp_f, ceiling_f) = if season.is_winter() {
            let ceiling = cfg.limits.winter_ceiling_f + heating.overshoot_f;
            (clamp(temp, None, Some(ceiling)), ceiling)
        } else {
            let band = cfg.limits.comfort_band_f;
            (band.clamp(temp), band.max)
        };

        TemperatureReading {
            temp_f,
            season,
            seasonal_baseline_f,
            ramp_gain_f,
            boost_gain_f,
            heating,
            cooling,
            ceiling_f,
        }
    }

    fn roll_heating<R: RandomSource + ?Sized>(&self, outdoor_f: f64, rng: &mut R) -> HeatingState {
        let cfg = &self.config.heating;
        if outdoor_f >= cfg.gate_outdoor_f {
            return HeatingState::default();
        }

        let roll = rng.next_unit();
        let heating_failed = roll < cfg.failure_probability;
        let weak_heating = !heating_failed && roll < cfg.weak_below;

        HeatingState {
            heating_allowed: true,
            heating_failed,
            weak_heating,
            overshoot_f: 0.0,
        }
    }

    fn roll_cooling<R: RandomSource + ?Sized>(&self, temp_f: f64, rng: &mut R) -> CoolingOutcome {
        let cfg = &self.config.cooling;
        let roll = rng.next_unit();

        if roll < cfg.failure_probability {
            CoolingOutcome::Failed
        } else if roll < cfg.weak_below {
            CoolingOutcome::Weak {
                removed_f: rng.uniform(cfg.weak_removal_f.min, cfg.weak_removal_f.max),
            }
        } else {
            let mut removed_f = rng.uniform(cfg.normal_removal_f.min, cfg.normal_removal_f.max);
            if temp_f >= cfg.high_demand_from_f {
                removed_f += cfg.high_demand_extra_f;
            }
            CoolingOutcome::Normal { removed_f }
        }
    }

    /// Weekends, and Friday from the configured evening hour.
    fn is_boost_period(&self, local: NaiveDateTime) -> bool {
        match local.weekday() {
            Weekday::Sat | Weekday::Sun => true,
            Weekday::Fri => local.time() >= self.config.heating.friday_evening_from,
            _ => false,
        }
    }

    fn boost_for(&self, outdoor_f: f64) -> f64 {
        self.config
            .heating
            .weekend_boost
            .iter()
            .find(|tier| outdoor_f < tier.below_f)
            .map(|tier| tier.gain_f)
            .unwrap_or(0.0)
    }
}

fn is_weekday(local: NaiveDateTime) -> bool {
    !matches!(local.weekday(), Weekday::Sat | Weekday::Sun)
}
