//! # Indoor Environment Model
//!
//! Coordinates the temperature, moisture, wind and solar components into one
//! synthetic indoor reading. The evaluation order is fixed: temperature,
//! then humidity (needs temperature), then dew point (needs both), then the
//! independent quantities.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::moisture::{
    dew_point_f, indoor_humidity, indoor_pressure_in, HumidityConfig, PressureConfig,
};
use super::schedule::{BaselineSchedule, BaselineValues};
use super::solar::{indoor_solar, SolarConfig, SolarLevel};
use super::thermal::{TemperatureModel, TemperatureReading, ThermalConfig};
use super::wind::{indoor_wind, WindConfig, WindReading};
use crate::domain::{SimulationInput, SimulationOutput};
use crate::utils::random::RandomSource;

/// Every table the indoor model reads, fixed at construction time.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate)]
pub struct IndoorModelConfig {
    /// Seed for reproducible runs; entropy when unset
    pub random_seed: Option<u64>,
    pub baseline: BaselineSchedule,
    #[validate(nested)]
    pub thermal: ThermalConfig,
    pub humidity: HumidityConfig,
    pub pressure: PressureConfig,
    pub wind: WindConfig,
    pub solar: SolarConfig,
}

/// Output plus the intermediate readings behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    pub output: SimulationOutput,
    pub baseline: BaselineValues,
    pub temperature: TemperatureReading,
    pub wind: WindReading,
    pub solar: SolarLevel,
}

pub struct IndoorModel {
    config: IndoorModelConfig,
    timezone: Tz,
    temperature: TemperatureModel,
}

impl IndoorModel {
    pub fn new(config: IndoorModelConfig, timezone: Tz) -> Self {
        let temperature = TemperatureModel::new(config.thermal.clone());
        Self {
            config,
            timezone,
            temperature,
        }
    }

    pub fn config(&self) -> &IndoorModelConfig {
        &self.config
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// One deterministic pass over the model for the given random draws.
    pub fn simulate<R: RandomSource + ?Sized>(
        &self,
        input: &SimulationInput,
        rng: &mut R,
    ) -> Simulation {
        let cfg = &self.config;
        let local = input
            .current_timestamp
            .with_timezone(&self.timezone)
            .naive_local();

        let baseline = cfg.baseline.values_at(local);

        let temperature = self
            .temperature
            .compute(local, input.outdoor_temperature_f, baseline.temp_f, rng);
        let temp_f = temperature.temp_f;

        let humidity = indoor_humidity(&cfg.humidity, temperature.season, temp_f);
        let dewpoint = dew_point_f(temp_f, humidity);

        let outdoor_pressure = input.outdoor_pressure_in.unwrap_or(baseline.baro_in);
        let pressure = indoor_pressure_in(&cfg.pressure, outdoor_pressure);

        let wind = indoor_wind(
            &cfg.wind,
            local,
            input.outdoor_wind_speed_mph,
            input.outdoor_wind_gust_mph,
            rng,
        );

        let solar = indoor_solar(
            &cfg.solar,
            local,
            temperature.season,
            input.outdoor_sky_condition,
        );

        let output = SimulationOutput {
            indoor_temp_f: temp_f,
            indoor_humidity_pct: humidity,
            indoor_dewpoint_f: dewpoint,
            indoor_pressure_in_hg: pressure,
            indoor_wind_speed_mph: wind.speed_mph,
            indoor_wind_gust_mph: wind.gust_mph,
            indoor_wind_dir_deg: wind.direction_deg,
            solar_radiation: solar.radiation,
            uv_index: solar.uv_index,
            sky_condition_code: input.outdoor_sky_condition,
        };

        Simulation {
            output,
            baseline,
            temperature,
            wind,
            solar,
        }
    }
}
