//! HTTP feed source.
//!
//! Downloads the raw feed document over HTTP(S) and parses it into domain
//! records. A single failure is fatal to the run; there are no retries.

use crate::error::DomainerError;
use crate::sources::parse_feed;
use crate::types::DomainRecord;
use std::time::Duration;

/// Feed source that downloads the document from a URL.
#[derive(Clone)]
pub struct HttpSource {
    /// HTTP client for feed requests
    http_client: reqwest::Client,
    /// Overall timeout for the download
    timeout: Duration,
}

impl HttpSource {
    /// Create a new HTTP source with the given download timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainerError> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout + Duration::from_secs(2)) // Add buffer for HTTP timeout
            .build()
            .map_err(|e| {
                DomainerError::network_with_source(
                    "Failed to create feed HTTP client",
                    e.to_string(),
                )
            })?;

        Ok(Self {
            http_client,
            timeout,
        })
    }

    /// Download and parse the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns `DomainerError` if:
    /// - The request fails or times out
    /// - The server responds with a non-success status
    /// - The body contains no valid feed entries
    pub async fn fetch_records(&self, url: &str) -> Result<Vec<DomainRecord>, DomainerError> {
        tracing::debug!("downloading feed from {}", url);

        let result = tokio::time::timeout(self.timeout, self.download(url)).await;

        match result {
            Ok(Ok(body)) => parse_feed(&body, url),
            Ok(Err(e)) => Err(e),
            Err(_) => Err(DomainerError::timeout("feed download", self.timeout)),
        }
    }

    async fn download(&self, url: &str) -> Result<String, DomainerError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainerError::fetch(url, format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainerError::fetch(
                url,
                format!("unexpected status {}", status),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| DomainerError::fetch(url, format!("failed to read body: {}", e)))
    }
}
