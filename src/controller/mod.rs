//! Station loop: fetch outdoor conditions, simulate, publish.
//!
//! A tick never fails. Outdoor problems are absorbed by the provider's
//! fallback reading and upload problems are logged and reported back in
//! [`TickOutcome::published`].

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::SimulationInput;
use crate::outdoor::{ConditionsProvider, OutdoorReading, WeatherComClient};
use crate::report::{
    PublishError, PublishResponse, ReportFormatter, ReportSink, WundergroundPublisher,
};
use crate::simulation::{IndoorModel, Simulation};
use crate::utils::random::{RandomSource, StdRandom};

/// Everything one tick produced.
#[derive(Debug)]
pub struct TickOutcome {
    pub reading: OutdoorReading,
    pub simulation: Simulation,
    pub published: Result<PublishResponse, PublishError>,
}

impl TickOutcome {
    pub fn accepted(&self) -> bool {
        matches!(&self.published, Ok(resp) if resp.is_success())
    }
}

pub struct Station<R: RandomSource = StdRandom> {
    provider: Arc<dyn ConditionsProvider>,
    sink: Arc<dyn ReportSink>,
    model: IndoorModel,
    formatter: ReportFormatter,
    outdoor_station_id: String,
    rng: R,
}

impl Station<StdRandom> {
    /// Wire the HTTP clients and the model from configuration.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let timezone = cfg.station.tz()?;
        let provider = WeatherComClient::new(
            cfg.outdoor.base_url.clone(),
            cfg.outdoor.api_key.clone(),
            cfg.outdoor.timeout(),
            cfg.outdoor.fallback.conditions(),
        )?;
        let sink = WundergroundPublisher::new(cfg.publish.url.clone(), cfg.publish.timeout())?;

        Ok(Station::new(
            Arc::new(provider),
            Arc::new(sink),
            IndoorModel::new(cfg.model.clone(), timezone),
            cfg.formatter(),
            cfg.outdoor.station_id.clone(),
            StdRandom::from_seed(cfg.model.random_seed),
        ))
    }
}

impl<R: RandomSource> Station<R> {
    pub fn new(
        provider: Arc<dyn ConditionsProvider>,
        sink: Arc<dyn ReportSink>,
        model: IndoorModel,
        formatter: ReportFormatter,
        outdoor_station_id: String,
        rng: R,
    ) -> Self {
        Self {
            provider,
            sink,
            model,
            formatter,
            outdoor_station_id,
            rng,
        }
    }

    pub fn model(&self) -> &IndoorModel {
        &self.model
    }

    pub async fn tick(&mut self, now: DateTime<Utc>) -> TickOutcome {
        let reading = self.provider.fetch(&self.outdoor_station_id).await;
        let outdoor = reading.conditions;

        let input = SimulationInput {
            current_timestamp: now,
            outdoor_temperature_f: outdoor.temp_f,
            outdoor_wind_speed_mph: outdoor.wind_speed_mph,
            outdoor_wind_gust_mph: outdoor.wind_gust_mph,
            outdoor_sky_condition: outdoor.sky,
            outdoor_pressure_in: outdoor.pressure_in,
        };
        let simulation = self.model.simulate(&input, &mut self.rng);
        let out = &simulation.output;

        info!(
            fallback = reading.is_fallback(),
            outdoor_temp_f = outdoor.temp_f,
            temp_f = out.indoor_temp_f,
            humidity_pct = out.indoor_humidity_pct,
            dewpoint_f = out.indoor_dewpoint_f,
            baro_in = out.indoor_pressure_in_hg,
            wind_mph = out.indoor_wind_speed_mph,
            gust_mph = out.indoor_wind_gust_mph,
            wind_dir = out.indoor_wind_dir_deg,
            solar = out.solar_radiation,
            uv = out.uv_index,
            sky = %out.sky_condition_code,
            heating_failed = simulation.temperature.heating.heating_failed,
            weak_heating = simulation.temperature.heating.weak_heating,
            "indoor reading simulated"
        );

        let params = self.formatter.query(out, &simulation.baseline, now);
        let published = self.sink.submit(&params).await;
        match &published {
            Ok(resp) if resp.is_success() => {
                info!(status = resp.status, body = %resp.body.trim(), "report uploaded")
            }
            Ok(resp) => {
                warn!(status = resp.status, body = %resp.body.trim(), "report rejected")
            }
            Err(e) => error!(error = %e, timeout = e.is_timeout(), "report upload failed"),
        }

        TickOutcome {
            reading,
            simulation,
            published,
        }
    }

    /// Tick every `every` until `shutdown` resolves. Ticks never overlap;
    /// missed ticks are skipped. Returns the number of ticks run.
    pub async fn run<F>(&mut self, every: Duration, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(interval_seconds = every.as_secs(), "station scheduler started");
        let mut ticks = 0u64;
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = interval.tick() => {
                    debug!(tick = ticks + 1, "tick started");
                    let outcome = self.tick(Utc::now()).await;
                    ticks += 1;
                    debug!(tick = ticks, accepted = outcome.accepted(), "tick finished");
                }
            }
        }
        info!(ticks, "station scheduler stopped");
        ticks
    }
}
