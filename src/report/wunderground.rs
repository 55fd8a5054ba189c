//! Upload to the Weather Underground personal weather station endpoint.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::debug;

use super::{PublishError, PublishResponse, ReportSink};

pub const DEFAULT_UPLOAD_URL: &str =
    "https://weatherstation.wunderground.com/weatherstation/updateweatherstation.php";

#[derive(Clone)]
pub struct WundergroundPublisher {
    client: reqwest::Client,
    url: String,
}

impl WundergroundPublisher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PublishError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("indoor-weather-sim/", env!("CARGO_PKG_VERSION"))),
        );
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ReportSink for WundergroundPublisher {
    async fn submit(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<PublishResponse, PublishError> {
        debug!(url = %self.url, fields = params.len(), "uploading station report");

        let response = self.client.get(&self.url).query(params).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(PublishResponse { status, body })
    }
}
