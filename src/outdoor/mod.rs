//! Outdoor reference conditions.
//!
//! The indoor model always needs a usable outdoor reading, so providers never
//! return an error: a failed fetch yields the configured fallback values and
//! carries the failure reason in [`ReadingSource::Fallback`].

pub mod weather_com;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::SkyCondition;

pub use weather_com::WeatherComClient;

/// Why a live reading could not be used.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("response contained no observations")]
    NoObservation,
    #[error("observation is missing `{0}`")]
    MissingField(&'static str),
    #[error("unknown sky condition code `{0}`")]
    UnknownSky(String),
}

impl FetchError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Http(e) if e.is_timeout())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutdoorConditions {
    pub wind_speed_mph: f64,
    pub wind_gust_mph: f64,
    pub temp_f: f64,
    pub sky: SkyCondition,
    pub pressure_in: Option<f64>,
}

impl OutdoorConditions {
    /// Wind never negative, gust never below the sustained speed.
    pub fn normalized(mut self) -> Self {
        self.wind_speed_mph = self.wind_speed_mph.max(0.0);
        self.wind_gust_mph = self.wind_gust_mph.max(self.wind_speed_mph).max(0.0);
        self
    }
}

impl Default for OutdoorConditions {
    fn default() -> Self {
        Self {
            wind_speed_mph: 0.0,
            wind_gust_mph: 0.0,
            temp_f: 45.0,
            sky: SkyCondition::Clear,
            pressure_in: None,
        }
    }
}

#[derive(Debug)]
pub enum ReadingSource {
    Live,
    Fallback(FetchError),
}

/// Outdoor conditions together with where they came from.
#[derive(Debug)]
pub struct OutdoorReading {
    pub conditions: OutdoorConditions,
    pub source: ReadingSource,
}

impl OutdoorReading {
    pub fn live(conditions: OutdoorConditions) -> Self {
        Self {
            conditions,
            source: ReadingSource::Live,
        }
    }

    pub fn fallback(conditions: OutdoorConditions, reason: FetchError) -> Self {
        Self {
            conditions,
            source: ReadingSource::Fallback(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, ReadingSource::Fallback(_))
    }

    pub fn fallback_reason(&self) -> Option<&FetchError> {
        match &self.source {
            ReadingSource::Fallback(reason) => Some(reason),
            ReadingSource::Live => None,
        }
    }
}

#[async_trait]
pub trait ConditionsProvider: Send + Sync {
    /// Current conditions at `station_id`; falls back instead of failing.
    async fn fetch(&self, station_id: &str) -> OutdoorReading;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_wind() {
        let c = OutdoorConditions {
            wind_speed_mph: -2.0,
            wind_gust_mph: -5.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(c.wind_speed_mph, 0.0);
        assert_eq!(c.wind_gust_mph, 0.0);

        let c = OutdoorConditions {
            wind_speed_mph: 8.0,
            wind_gust_mph: 5.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(c.wind_gust_mph, 8.0);
    }

    #[test]
    fn test_fallback_reason_is_observable() {
        let reading =
            OutdoorReading::fallback(OutdoorConditions::default(), FetchError::NoObservation);
        assert!(reading.is_fallback());
        assert!(matches!(reading.fallback_reason(), Some(FetchError::NoObservation)));

        let live = OutdoorReading::live(OutdoorConditions::default());
        assert!(!live.is_fallback());
        assert!(live.fallback_reason().is_none());
    }
}
