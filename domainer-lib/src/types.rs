//! Core data types for the domain feed pipeline.
//!
//! This module defines the main data structures used throughout the library:
//! domain records, the feed source specification, and pipeline configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default URL of the bar-date feed the original tool consumed.
pub const DEFAULT_FEED_URL: &str = "https://data.internetstiftelsen.se/bardate_domains.txt";

/// A single entry of the domain feed.
///
/// Pairs a registrable hostname with the calendar date on which the domain
/// becomes (or became) available. The date is optional: feed rows always
/// carry one, but persisted lists may not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    /// The domain name, normalized to lowercase (e.g., "example.se")
    pub domain: String,

    /// The date the domain becomes available for registration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_on: Option<NaiveDate>,
}

impl DomainRecord {
    /// Create a record without availability metadata.
    pub fn new<D: Into<String>>(domain: D) -> Self {
        Self {
            domain: domain.into(),
            available_on: None,
        }
    }

    /// Create a record with an availability date.
    pub fn with_date<D: Into<String>>(domain: D, available_on: NaiveDate) -> Self {
        Self {
            domain: domain.into(),
            available_on: Some(available_on),
        }
    }
}

impl std::fmt::Display for DomainRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.available_on {
            Some(date) => write!(f, "{}, {}", self.domain, date.format("%Y-%m-%d")),
            None => write!(f, "{}", self.domain),
        }
    }
}

/// Where the raw domain feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Fetch the feed over HTTP(S)
    Url(String),

    /// Read the feed from a local file
    File(PathBuf),
}

impl Default for FeedSource {
    fn default() -> Self {
        Self::Url(DEFAULT_FEED_URL.to_string())
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Configuration options for a pipeline run.
///
/// This struct allows fine-tuning of the fetch and analysis behavior,
/// including timeouts and text-generation parameters.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Where to obtain the raw feed
    pub source: FeedSource,

    /// Timeout for the feed download
    /// Default: 30 seconds
    pub fetch_timeout: Duration,

    /// Timeout for the analysis request
    /// Default: 60 seconds
    pub analysis_timeout: Duration,

    /// Base URL of the chat-completions endpoint
    /// Default: the OpenAI API
    pub api_base: String,

    /// Model name for the analysis request
    pub model: String,

    /// Completion budget for the analysis response
    pub max_tokens: u32,

    /// Sampling temperature for the analysis request
    pub temperature: f64,
}

impl Default for PipelineConfig {
    /// Create a sensible default configuration.
    ///
    /// The analysis parameters match what the tool has always sent:
    /// gpt-3.5-turbo, 1000 max tokens, temperature 0.5.
    fn default() -> Self {
        Self {
            source: FeedSource::default(),
            fetch_timeout: Duration::from_secs(30),
            analysis_timeout: Duration::from_secs(60),
            api_base: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 1000,
            temperature: 0.5,
        }
    }
}

impl PipelineConfig {
    /// Set the feed source.
    pub fn with_source(mut self, source: FeedSource) -> Self {
        self.source = source;
        self
    }

    /// Set a custom feed download timeout.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set a custom analysis request timeout.
    pub fn with_analysis_timeout(mut self, timeout: Duration) -> Self {
        self.analysis_timeout = timeout;
        self
    }

    /// Point the analysis client at a different chat-completions endpoint.
    pub fn with_api_base<S: Into<String>>(mut self, api_base: S) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the analysis model.
    pub fn with_model<S: Into<String>>(mut self, model: S) -> Self {
        self.model = model.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_display() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        let record = DomainRecord::with_date("example.se", date);
        assert_eq!(record.to_string(), "example.se, 2024-12-01");

        let record = DomainRecord::new("example.se");
        assert_eq!(record.to_string(), "example.se");
    }

    #[test]
    fn test_config_builders() {
        let config = PipelineConfig::default()
            .with_source(FeedSource::File(PathBuf::from("feed.txt")))
            .with_model("gpt-4o-mini")
            .with_api_base("http://localhost:9000/v1");

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.api_base, "http://localhost:9000/v1");
        assert!(matches!(config.source, FeedSource::File(_)));
    }
}
