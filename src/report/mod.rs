//! Station report formatting and upload.

pub mod query;
pub mod wunderground;

use async_trait::async_trait;
use thiserror::Error;

pub use query::{QueryParams, ReportFormatter};
pub use wunderground::WundergroundPublisher;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("upload failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl PublishError {
    pub fn is_timeout(&self) -> bool {
        match self {
            PublishError::Http(e) => e.is_timeout(),
        }
    }
}

/// What the ingestion endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishResponse {
    pub status: u16,
    pub body: String,
}

impl PublishResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ReportSink: Send + Sync {
    async fn submit(
        &self,
        params: &[(&'static str, String)],
    ) -> Result<PublishResponse, PublishError>;
}
