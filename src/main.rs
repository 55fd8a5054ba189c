use anyhow::Result;
use chrono::Utc;
use indoor_weather_sim::{config, controller, telemetry};
use config::Config;
use controller::Station;
use telemetry::init_tracing;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;

    if !cfg.station.has_credentials() {
        anyhow::bail!(
            "station credentials missing: set PWS__STATION__ID and PWS__STATION__PASSWORD \
            (or [station] id/password in config/default.toml)"
        );
    }
    if cfg.outdoor.api_key.is_empty() {
        warn!("PWS__OUTDOOR__API_KEY not set - outdoor fetch will fall back every tick");
    }

    let mut station = Station::from_config(&cfg)?;
    info!(
        station_id = %cfg.station.id,
        reference_station = %cfg.outdoor.station_id,
        timezone = %station.model().timezone(),
        "starting indoor weather simulator"
    );

    match cfg.scheduler.interval() {
        Some(every) => {
            station.run(every, telemetry::shutdown_signal()).await;
        }
        None => {
            let outcome = station.tick(Utc::now()).await;
            if !outcome.accepted() {
                warn!("upload was not accepted");
            }
        }
    }

    info!("shutdown complete");
    Ok(())
}
