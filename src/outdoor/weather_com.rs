//! Personal weather station observations (weather.com PWS API)
//!
//! Reads the current observation of a nearby reference station to drive the
//! indoor model with realistic wind and outdoor temperature.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{ConditionsProvider, FetchError, OutdoorConditions, OutdoorReading};
use crate::domain::SkyCondition;

/// weather.com PWS client with a fixed fallback reading
pub struct WeatherComClient {
    client: Client,
    base_url: String,
    api_key: String,
    fallback: OutdoorConditions,
}

impl WeatherComClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        fallback: OutdoorConditions,
    ) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
            fallback,
        })
    }

    pub fn fallback(&self) -> &OutdoorConditions {
        &self.fallback
    }

    /// Fetch the current observation, surfacing every failure.
    pub async fn try_fetch(&self, station_id: &str) -> Result<OutdoorConditions, FetchError> {
        let url = format!(
            "{}/v2/pws/observations/current",
            self.base_url.trim_end_matches('/')
        );

        debug!(%url, station_id, "fetching reference observation");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("stationId", station_id),
                ("format", "json"),
                ("units", "e"),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let parsed: ObservationResponse = serde_json::from_str(&body)?;
        parse_observation(parsed)
    }
}

#[async_trait]
impl ConditionsProvider for WeatherComClient {
    async fn fetch(&self, station_id: &str) -> OutdoorReading {
        match self.try_fetch(station_id).await {
            Ok(conditions) => {
                info!(
                    station_id,
                    temp_f = conditions.temp_f,
                    wind_speed_mph = conditions.wind_speed_mph,
                    wind_gust_mph = conditions.wind_gust_mph,
                    sky = %conditions.sky,
                    "reference observation received"
                );
                OutdoorReading::live(conditions)
            }
            Err(e) => {
                warn!(
                    station_id,
                    error = %e,
                    timeout = e.is_timeout(),
                    "using fallback outdoor conditions"
                );
                OutdoorReading::fallback(self.fallback, e)
            }
        }
    }
}

fn parse_observation(response: ObservationResponse) -> Result<OutdoorConditions, FetchError> {
    let observation = response
        .observations
        .into_iter()
        .next()
        .ok_or(FetchError::NoObservation)?;
    let imperial = observation.imperial.ok_or(FetchError::MissingField("imperial"))?;

    let sky = match imperial.sky_code {
        Some(code) => code
            .trim()
            .parse::<SkyCondition>()
            .map_err(|_| FetchError::UnknownSky(code.clone()))?,
        None => SkyCondition::default(),
    };

    Ok(OutdoorConditions {
        wind_speed_mph: imperial.wind_speed.ok_or(FetchError::MissingField("windSpeed"))?,
        wind_gust_mph: imperial.wind_gust.ok_or(FetchError::MissingField("windGust"))?,
        temp_f: imperial.temp.ok_or(FetchError::MissingField("temp"))?,
        sky,
        pressure_in: imperial.pressure,
    }
    .normalized())
}

// weather.com API response structures
#[derive(Debug, Deserialize)]
struct ObservationResponse {
    #[serde(default)]
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    imperial: Option<Imperial>,
}

#[derive(Debug, Deserialize)]
struct Imperial {
    #[serde(rename = "windSpeed")]
    wind_speed: Option<f64>,
    #[serde(rename = "windGust")]
    wind_gust: Option<f64>,
    temp: Option<f64>,
    pressure: Option<f64>,
    #[serde(rename = "skyCode")]
    sky_code: Option<String>,
}
