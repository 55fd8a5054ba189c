use indoor_weather_sim::report::{ReportSink, WundergroundPublisher};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const UPLOAD_PATH: &str = "/weatherstation/updateweatherstation.php";

fn publisher_for(server: &MockServer, timeout: Duration) -> WundergroundPublisher {
    WundergroundPublisher::new(format!("{}{}", server.uri(), UPLOAD_PATH), timeout).unwrap()
}

fn params() -> Vec<(&'static str, String)> {
    vec![
        ("ID", "KTEST1".to_string()),
        ("PASSWORD", "secret".to_string()),
        ("dateutc", "now".to_string()),
        ("tempf", "72.4".to_string()),
        ("clouds", "BKN250".to_string()),
        ("softwaretype", "vws versionxx".to_string()),
        ("action", "updateraw".to_string()),
    ]
}

#[tokio::test]
async fn test_upload_sends_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPLOAD_PATH))
        .and(query_param("ID", "KTEST1"))
        .and(query_param("PASSWORD", "secret"))
        .and(query_param("dateutc", "now"))
        .and(query_param("tempf", "72.4"))
        .and(query_param("softwaretype", "vws versionxx"))
        .and(query_param("action", "updateraw"))
        .respond_with(ResponseTemplate::new(200).set_body_string("success\n"))
        .expect(1)
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_secs(5));
    let resp = publisher.submit(&params()).await.unwrap();
    assert!(resp.is_success());
    assert_eq!(resp.body, "success\n");
}

#[tokio::test]
async fn test_rejection_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_secs(5));
    let resp = publisher.submit(&params()).await.unwrap();
    assert_eq!(resp.status, 401);
    assert!(!resp.is_success());
    assert_eq!(resp.body, "unauthorized");
}

#[tokio::test]
async fn test_unreachable_endpoint_is_an_error() {
    let publisher =
        WundergroundPublisher::new("http://127.0.0.1:9/upload", Duration::from_millis(500))
            .unwrap();
    assert!(publisher.submit(&params()).await.is_err());
}

#[tokio::test]
async fn test_slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(800)))
        .mount(&server)
        .await;

    let publisher = publisher_for(&server, Duration::from_millis(100));
    let err = publisher.submit(&params()).await.unwrap_err();
    assert!(err.is_timeout());
}
