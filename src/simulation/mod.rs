//! # Indoor Environment Simulation
//!
//! Produces plausible indoor weather-station readings from the local time,
//! the season and an outdoor reference reading.
//!
//! ## Components
//!
//! - **Schedule**: recurring daily windows and the baseline drift tables
//! - **Thermal**: indoor temperature with heating/cooling reliability rolls
//! - **Moisture**: humidity, dew point and barometric pressure
//! - **Wind**: outdoor-following wind with the bedtime ramp
//! - **Solar**: daylight radiation and UV behind the window
//! - **Environment**: orchestrates all of the above into one reading
//!
//! ## Usage
//!
//! ```rust
//! use chrono::Utc;
//! use indoor_weather_sim::domain::{SimulationInput, SkyCondition};
//! use indoor_weather_sim::simulation::{IndoorModel, IndoorModelConfig};
//! use indoor_weather_sim::utils::StdRandom;
//!
//! let model = IndoorModel::new(IndoorModelConfig::default(), chrono_tz::America::Chicago);
//! let input = SimulationInput {
//!     current_timestamp: Utc::now(),
//!     outdoor_temperature_f: 28.0,
//!     outdoor_wind_speed_mph: 4.0,
//!     outdoor_wind_gust_mph: 9.0,
//!     outdoor_sky_condition: SkyCondition::Clear,
//!     outdoor_pressure_in: None,
//! };
//!
//! let sim = model.simulate(&input, &mut StdRandom::seeded(42));
//! assert!(sim.output.indoor_humidity_pct >= 20.0);
//! ```

pub mod environment;
pub mod moisture;
pub mod schedule;
pub mod solar;
pub mod thermal;
pub mod wind;

pub use environment::{IndoorModel, IndoorModelConfig, Simulation};
pub use moisture::{
    dew_point_f, indoor_humidity, indoor_pressure_in, HumidityConfig, PressureConfig,
};
pub use schedule::{BaselineSchedule, BaselineValues, DailyWindow};
pub use solar::{indoor_solar, SolarConfig, SolarLevel};
pub use thermal::{
    Band, BoostTier, CoolingConfig, CoolingOutcome, HeatingConfig, HeatingState, OvershootConfig,
    ScheduledRamp, SeasonalOffsets, TemperatureLimits, TemperatureModel, TemperatureReading,
    ThermalConfig,
};
pub use wind::{bedtime_progress, indoor_wind, WindConfig, WindReading};
