//! Pipeline orchestration.
//!
//! This module provides the primary `DomainPipeline` struct that ties the
//! stages together: fetch from the configured source, normalize and sort,
//! and construct the analysis client when dispatch is requested. The stages
//! run strictly sequentially; filtering is a pure function the caller
//! applies between sorting and analysis.
//!
//! # Example
//!
//! ```rust,no_run
//! use domainer_lib::{DomainPipeline, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = DomainPipeline::new()?;
//!     let records = pipeline.sorted_records().await?;
//!
//!     for record in &records {
//!         println!("{}", record);
//!     }
//!     Ok(())
//! }
//! ```

use crate::analysis::AnalysisClient;
use crate::error::DomainerError;
use crate::sort::normalize_and_sort;
use crate::sources::{FileSource, HttpSource};
use crate::types::{DomainRecord, FeedSource, PipelineConfig};

/// Coordinates a single pipeline run against a configured feed source.
pub struct DomainPipeline {
    /// Configuration settings for this pipeline instance
    config: PipelineConfig,
    /// HTTP source for remote feeds
    http_source: HttpSource,
    /// File source for local feeds
    file_source: FileSource,
}

impl DomainPipeline {
    /// Create a new pipeline with default configuration.
    pub fn new() -> Result<Self, DomainerError> {
        Self::with_config(PipelineConfig::default())
    }

    /// Create a new pipeline with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Result<Self, DomainerError> {
        let http_source = HttpSource::with_timeout(config.fetch_timeout)?;

        Ok(Self {
            config,
            http_source,
            file_source: FileSource::new(),
        })
    }

    /// Fetch raw records from the configured source.
    ///
    /// # Errors
    ///
    /// Returns `DomainerError` if the source is unreachable, times out, or
    /// contains no valid entries.
    pub async fn fetch_records(&self) -> Result<Vec<DomainRecord>, DomainerError> {
        match &self.config.source {
            FeedSource::Url(url) => self.http_source.fetch_records(url).await,
            FeedSource::File(path) => self.file_source.fetch_records(path),
        }
    }

    /// Fetch, normalize, sort, and deduplicate the domain collection.
    pub async fn sorted_records(&self) -> Result<Vec<DomainRecord>, DomainerError> {
        let raw = self.fetch_records().await?;
        tracing::debug!("fetched {} raw records", raw.len());

        let sorted = normalize_and_sort(raw);
        tracing::debug!("{} records after sort/dedup", sorted.len());

        Ok(sorted)
    }

    /// Build an analysis client from this pipeline's configuration.
    ///
    /// The API key is passed separately because it is a credential, not a
    /// pipeline setting; callers typically read it from `OPENAI_API_KEY`.
    pub fn analyzer<K: Into<String>>(&self, api_key: K) -> Result<AnalysisClient, DomainerError> {
        AnalysisClient::new(
            self.config.api_base.clone(),
            api_key,
            self.config.model.clone(),
            self.config.max_tokens,
            self.config.temperature,
            self.config.analysis_timeout,
        )
    }

    /// Get the current configuration for this pipeline.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}
