//! Query-string formatting for the station upload protocol.

use chrono::{DateTime, Utc};

use crate::domain::SimulationOutput;
use crate::simulation::BaselineValues;

/// Static metadata sent with every upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFormatter {
    pub station_id: String,
    pub password: String,
    pub software_type: String,
    /// Send the reading time instead of the literal `now`
    pub send_timestamp: bool,
    pub clouds: String,
    /// Fixed weather code; the simulated sky code is used when unset
    pub weather_override: Option<String>,
}

pub type QueryParams = Vec<(&'static str, String)>;

impl ReportFormatter {
    pub fn date_utc(&self, now: DateTime<Utc>) -> String {
        if self.send_timestamp {
            now.format("%Y-%m-%d %H:%M:%S").to_string()
        } else {
            "now".to_string()
        }
    }

    /// All upload parameters for one reading. Rain comes from the baseline
    /// values of the same tick.
    pub fn query(
        &self,
        output: &SimulationOutput,
        baseline: &BaselineValues,
        now: DateTime<Utc>,
    ) -> QueryParams {
        let weather = self
            .weather_override
            .clone()
            .unwrap_or_else(|| output.sky_condition_code.code().to_string());

        vec![
            ("ID", self.station_id.clone()),
            ("PASSWORD", self.password.clone()),
            ("dateutc", self.date_utc(now)),
            ("winddir", format!("{}", output.indoor_wind_dir_deg % 360)),
            ("windspeedmph", format!("{:.1}", output.indoor_wind_speed_mph)),
            ("windgustmph", format!("{:.1}", output.indoor_wind_gust_mph)),
            ("tempf", format!("{:.1}", output.indoor_temp_f)),
            ("rainin", format!("{:.2}", baseline.rain_in.max(0.0))),
            ("dailyrainin", format!("{:.2}", baseline.daily_rain_in.max(0.0))),
            ("baromin", format!("{:.2}", output.indoor_pressure_in_hg)),
            ("dewptf", format!("{:.1}", output.indoor_dewpoint_f)),
            ("humidity", format!("{:.0}", output.indoor_humidity_pct)),
            ("uv", format!("{:.1}", output.uv_index)),
            ("solarradiation", format!("{:.1}", output.solar_radiation)),
            ("weather", weather),
            ("clouds", self.clouds.clone()),
            ("softwaretype", self.software_type.clone()),
            ("action", "updateraw".to_string()),
        ]
    }
}
