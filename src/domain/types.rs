use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

// ============================================================================
// Calendar
// ============================================================================

/// Season classification used by every seasonal table in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Season {
    /// December, January, February
    Winter,
    /// June, July, August
    Summer,
    /// Everything else
    Shoulder,
}

impl Season {
    /// Classify a calendar month (1-12).
    pub fn from_month(month: u32) -> Self {
        match month {
            12 | 1 | 2 => Season::Winter,
            6..=8 => Season::Summer,
            _ => Season::Shoulder,
        }
    }

    pub fn is_winter(&self) -> bool {
        matches!(self, Season::Winter)
    }
}

// ============================================================================
// Sky Condition
// ============================================================================

/// METAR-style sky/weather code as understood by the ingestion endpoint.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum SkyCondition {
    #[default]
    #[serde(rename = "CLR")]
    #[strum(serialize = "CLR")]
    Clear,
    #[serde(rename = "SKC")]
    #[strum(serialize = "SKC")]
    SkyClear,
    #[serde(rename = "FEW")]
    #[strum(serialize = "FEW")]
    Few,
    #[serde(rename = "SCT")]
    #[strum(serialize = "SCT")]
    Scattered,
    #[serde(rename = "BKN")]
    #[strum(serialize = "BKN")]
    Broken,
    #[serde(rename = "OVC")]
    #[strum(serialize = "OVC")]
    Overcast,
    #[serde(rename = "RA")]
    #[strum(serialize = "RA")]
    Rain,
    #[serde(rename = "DZ")]
    #[strum(serialize = "DZ")]
    Drizzle,
    #[serde(rename = "SN")]
    #[strum(serialize = "SN")]
    Snow,
    #[serde(rename = "TS")]
    #[strum(serialize = "TS")]
    Thunderstorm,
    #[serde(rename = "FG")]
    #[strum(serialize = "FG")]
    Fog,
}

impl SkyCondition {
    /// Codes under which direct sun reaches the windows.
    pub fn is_sunny(&self) -> bool {
        matches!(
            self,
            SkyCondition::Clear | SkyCondition::SkyClear | SkyCondition::Few
        )
    }

    pub fn code(&self) -> &str {
        self.as_ref()
    }
}

// ============================================================================
// Model I/O
// ============================================================================

/// Everything the indoor model consumes for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    pub current_timestamp: DateTime<Utc>,
    pub outdoor_temperature_f: f64,
    pub outdoor_wind_speed_mph: f64,
    pub outdoor_wind_gust_mph: f64,
    pub outdoor_sky_condition: SkyCondition,
    /// Station barometer, when the reference station reports one
    pub outdoor_pressure_in: Option<f64>,
}

/// One synthetic indoor reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub indoor_temp_f: f64,
    pub indoor_humidity_pct: f64,
    pub indoor_dewpoint_f: f64,
    pub indoor_pressure_in_hg: f64,
    pub indoor_wind_speed_mph: f64,
    pub indoor_wind_gust_mph: f64,
    pub indoor_wind_dir_deg: u16,
    pub solar_radiation: f64,
    pub uv_index: f64,
    pub sky_condition_code: SkyCondition,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case(12, Season::Winter)]
    #[case(1, Season::Winter)]
    #[case(2, Season::Winter)]
    #[case(3, Season::Shoulder)]
    #[case(5, Season::Shoulder)]
    #[case(6, Season::Summer)]
    #[case(8, Season::Summer)]
    #[case(9, Season::Shoulder)]
    #[case(11, Season::Shoulder)]
    fn test_season_from_month(#[case] month: u32, #[case] expected: Season) {
        assert_eq!(Season::from_month(month), expected);
    }

    #[test]
    fn test_sky_condition_codes() {
        assert_eq!(SkyCondition::from_str("OVC").unwrap(), SkyCondition::Overcast);
        assert_eq!(SkyCondition::Rain.code(), "RA");
        assert_eq!(SkyCondition::Clear.to_string(), "CLR");
        assert!(SkyCondition::from_str("XYZ").is_err());
    }

    #[test]
    fn test_sunny_codes() {
        assert!(SkyCondition::Clear.is_sunny());
        assert!(SkyCondition::Few.is_sunny());
        assert!(!SkyCondition::Broken.is_sunny());
        assert!(!SkyCondition::Rain.is_sunny());
    }

    #[test]
    fn test_sky_condition_serde_uses_codes() {
        let json = serde_json::to_string(&SkyCondition::Scattered).unwrap();
        assert_eq!(json, "\"SCT\"");
        let back: SkyCondition = serde_json::from_str("\"SN\"").unwrap();
        assert_eq!(back, SkyCondition::Snow);
    }
}
