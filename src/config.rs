use anyhow::{anyhow, Result};
use chrono_tz::Tz;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

use crate::domain::SkyCondition;
use crate::outdoor::OutdoorConditions;
use crate::report::{wunderground::DEFAULT_UPLOAD_URL, ReportFormatter};
use crate::simulation::IndoorModelConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Config {
    #[validate(nested)]
    pub station: StationConfig,
    #[validate(nested)]
    pub outdoor: OutdoorConfig,
    #[validate(nested)]
    pub publish: PublishConfig,
    #[validate(nested)]
    pub scheduler: SchedulerConfig,
    #[validate(nested)]
    pub model: IndoorModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StationConfig {
    /// Station identifier at the ingestion service
    pub id: String,
    pub password: String,
    #[validate(length(min = 1))]
    pub software_type: String,
    /// IANA zone of the simulated station
    #[validate(length(min = 1))]
    pub timezone: String,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            password: String::new(),
            software_type: "vws versionxx".to_string(),
            timezone: "America/Chicago".to_string(),
        }
    }
}

impl StationConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("invalid station timezone `{}`: {}", self.timezone, e))
    }

    pub fn has_credentials(&self) -> bool {
        !self.id.trim().is_empty() && !self.password.trim().is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OutdoorConfig {
    /// Nearby reference station supplying wind and outdoor temperature
    #[validate(length(min = 1))]
    pub station_id: String,
    pub api_key: String,
    #[validate(length(min = 1))]
    pub base_url: String,
    #[validate(range(min = 1))]
    pub timeout_seconds: u64,
    pub fallback: FallbackConfig,
}

impl Default for OutdoorConfig {
    fn default() -> Self {
        Self {
            station_id: "KMNBABBI".to_string(),
            api_key: String::new(),
            base_url: "https://api.weather.com".to_string(),
            timeout_seconds: 5,
            fallback: FallbackConfig::default(),
        }
    }
}

impl OutdoorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Reading used whenever the reference station cannot be read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    pub wind_speed_mph: f64,
    pub wind_gust_mph: f64,
    pub temp_f: f64,
    pub sky: SkyCondition,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        let defaults = OutdoorConditions::default();
        Self {
            wind_speed_mph: defaults.wind_speed_mph,
            wind_gust_mph: defaults.wind_gust_mph,
            temp_f: defaults.temp_f,
            sky: defaults.sky,
        }
    }
}

impl FallbackConfig {
    pub fn conditions(&self) -> OutdoorConditions {
        OutdoorConditions {
            wind_speed_mph: self.wind_speed_mph,
            wind_gust_mph: self.wind_gust_mph,
            temp_f: self.temp_f,
            sky: self.sky,
            pressure_in: None,
        }
        .normalized()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PublishConfig {
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(range(min = 1))]
    pub timeout_seconds: u64,
    /// Send the formatted UTC time instead of `now`
    pub send_timestamp: bool,
    pub clouds: String,
    pub weather: Option<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPLOAD_URL.to_string(),
            timeout_seconds: 10,
            send_timestamp: false,
            clouds: "BKN250".to_string(),
            weather: None,
        }
    }
}

impl PublishConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SchedulerConfig {
    /// Run repeatedly at this interval; a single tick when unset
    #[validate(range(min = 1))]
    pub interval_seconds: Option<u64>,
}

impl SchedulerConfig {
    pub fn interval(&self) -> Option<Duration> {
        self.interval_seconds.map(Duration::from_secs)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("PWS__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn formatter(&self) -> ReportFormatter {
        ReportFormatter {
            station_id: self.station.id.clone(),
            password: self.station.password.clone(),
            software_type: self.station.software_type.clone(),
            send_timestamp: self.publish.send_timestamp,
            clouds: self.publish.clouds.clone(),
            weather_override: self.publish.weather.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
    }

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::from_figment(defaults()).unwrap();
        assert_eq!(cfg.outdoor.timeout_seconds, 5);
        assert_eq!(cfg.publish.timeout_seconds, 10);
        assert_eq!(cfg.station.software_type, "vws versionxx");
        assert_eq!(cfg.model.thermal.heating.gate_outdoor_f, 55.0);
        assert!(cfg.scheduler.interval().is_none());
        assert!(!cfg.station.has_credentials());
    }

    #[test]
    fn test_toml_overrides() {
        let figment = defaults().merge(Toml::string(
            r#"
            [station]
            id = "KTEST1"
            password = "pw"
            timezone = "UTC"

            [scheduler]
            interval_seconds = 300

            [model.thermal.heating.morning_ramp.window]
            start = "05:00:00"
            end = "06:30:00"

            [model.solar]
            curtains_closed = true
            "#,
        ));
        let cfg = Config::from_figment(figment).unwrap();
        assert!(cfg.station.has_credentials());
        assert_eq!(cfg.station.tz().unwrap(), chrono_tz::UTC);
        assert_eq!(cfg.scheduler.interval(), Some(Duration::from_secs(300)));
        assert_eq!(
            cfg.model.thermal.heating.morning_ramp.window.start,
            chrono::NaiveTime::from_hms_opt(5, 0, 0).unwrap()
        );
        assert!(cfg.model.solar.curtains_closed);
        // untouched siblings keep their defaults
        assert_eq!(cfg.model.thermal.heating.morning_ramp.max_gain_f, 6.0);
    }

    #[test]
    fn test_probability_out_of_range_rejected() {
        let figment = defaults().merge(Toml::string(
            r#"
            [model.thermal.cooling]
            failure_probability = 1.5
            "#,
        ));
        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let figment = defaults().merge(Toml::string("[publish]\ntimeout_seconds = 0\n"));
        assert!(Config::from_figment(figment).is_err());
    }

    #[test]
    fn test_bad_timezone() {
        let station = StationConfig {
            timezone: "Mars/Olympus".into(),
            ..Default::default()
        };
        assert!(station.tz().is_err());
    }

    #[test]
    fn test_formatter_carries_station_metadata() {
        let mut cfg = Config::default();
        cfg.station.id = "KTEST1".into();
        cfg.publish.weather = Some("RA".into());
        let f = cfg.formatter();
        assert_eq!(f.station_id, "KTEST1");
        assert_eq!(f.clouds, "BKN250");
        assert_eq!(f.weather_override.as_deref(), Some("RA"));
    }
}
