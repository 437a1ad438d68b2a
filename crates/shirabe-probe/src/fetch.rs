//! Ranged download of a file's leading bytes.

use std::future::Future;

use reqwest::Client;
use reqwest::header::RANGE;
use tracing::debug;

use crate::config::ProbeConfig;
use crate::error::{ProbeError, Result};

/// Source of the leading bytes of a file.
pub trait SampleFetcher: Send + Sync {
    fn fetch_sample(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// `Range` header value for the first `sample_bytes` bytes.
#[must_use]
pub fn range_header(sample_bytes: u64) -> String {
    format!("bytes=0-{}", sample_bytes.saturating_sub(1))
}

/// Fetches over HTTP with a `Range` request, reading at most `sample_bytes`
/// even when the server ignores the range.
pub struct HttpSampler {
    http: Client,
    sample_bytes: u64,
}

impl HttpSampler {
    pub fn new(http: Client, sample_bytes: u64) -> Self {
        Self { http, sample_bytes }
    }

    pub fn from_config(config: &ProbeConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::new(http, config.sample_bytes))
    }
}

impl SampleFetcher for HttpSampler {
    async fn fetch_sample(&self, url: &str) -> Result<Vec<u8>> {
        let mut resp = self
            .http
            .get(url)
            .header(RANGE, range_header(self.sample_bytes))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ProbeError::Api {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let cap = usize::try_from(self.sample_bytes).unwrap_or(usize::MAX);
        let mut sample = Vec::with_capacity(cap.min(64 * 1024));
        while let Some(chunk) = resp.chunk().await? {
            let room = cap - sample.len();
            sample.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if sample.len() >= cap {
                break;
            }
        }
        debug!(bytes = sample.len(), partial = status.as_u16() == 206, "sample fetched");

        if sample.is_empty() {
            return Err(ProbeError::EmptySample);
        }
        Ok(sample)
    }
}
