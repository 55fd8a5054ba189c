use indoor_weather_sim::domain::SkyCondition;
use indoor_weather_sim::outdoor::{
    ConditionsProvider, FetchError, OutdoorConditions, WeatherComClient,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const OBSERVATION_PATH: &str = "/v2/pws/observations/current";

fn fallback() -> OutdoorConditions {
    OutdoorConditions {
        wind_speed_mph: 1.0,
        wind_gust_mph: 2.0,
        temp_f: 45.0,
        sky: SkyCondition::Clear,
        pressure_in: None,
    }
}

fn client(server: &MockServer, timeout: Duration) -> WeatherComClient {
    WeatherComClient::new(server.uri(), "test-key", timeout, fallback()).unwrap()
}

#[tokio::test]
async fn test_live_observation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBSERVATION_PATH))
        .and(query_param("stationId", "KREF"))
        .and(query_param("format", "json"))
        .and(query_param("units", "e"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "observations": [{
                "stationID": "KREF",
                "imperial": {
                    "temp": 21.0,
                    "windSpeed": 6.0,
                    "windGust": 11.0,
                    "pressure": 29.95,
                    "skyCode": "SCT"
                }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reading = client(&server, Duration::from_secs(5)).fetch("KREF").await;
    assert!(!reading.is_fallback());
    assert_eq!(reading.conditions.temp_f, 21.0);
    assert_eq!(reading.conditions.wind_speed_mph, 6.0);
    assert_eq!(reading.conditions.wind_gust_mph, 11.0);
    assert_eq!(reading.conditions.pressure_in, Some(29.95));
    assert_eq!(reading.conditions.sky, SkyCondition::Scattered);
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBSERVATION_PATH))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let reading = client(&server, Duration::from_secs(5)).fetch("KREF").await;
    assert!(reading.is_fallback());
    assert_eq!(reading.conditions, fallback());
    assert!(matches!(reading.fallback_reason(), Some(FetchError::Status(500))));
}

#[tokio::test]
async fn test_malformed_body_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBSERVATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let reading = client(&server, Duration::from_secs(5)).fetch("KREF").await;
    assert!(matches!(reading.fallback_reason(), Some(FetchError::Decode(_))));
    assert_eq!(reading.conditions.temp_f, 45.0);
}

#[tokio::test]
async fn test_missing_field_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBSERVATION_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "observations": [{ "imperial": { "temp": 30.0, "windGust": 4.0 } }]
        })))
        .mount(&server)
        .await;

    let reading = client(&server, Duration::from_secs(5)).fetch("KREF").await;
    assert!(matches!(
        reading.fallback_reason(),
        Some(FetchError::MissingField("windSpeed"))
    ));
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(OBSERVATION_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "observations": [] }))
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&server)
        .await;

    let client = client(&server, Duration::from_millis(100));
    let err = client.try_fetch("KREF").await.unwrap_err();
    assert!(err.is_timeout());

    let reading = client.fetch("KREF").await;
    assert!(reading.is_fallback());
    assert_eq!(reading.conditions, fallback());
}
