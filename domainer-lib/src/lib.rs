//! # Domainer Library
//!
//! A library for fetching domain availability feeds, sorting and
//! deduplicating them, filtering by availability date, and optionally
//! dispatching the result to a text-generation API for analysis.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domainer_lib::{filter_by_date, parse_filter_date, DomainPipeline};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = DomainPipeline::new()?;
//!     let records = pipeline.sorted_records().await?;
//!
//!     let date = parse_filter_date("2025-01-01")?;
//!     let available = filter_by_date(&records, date);
//!
//!     println!("{} domains available", available.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Feed sources**: HTTP(S) download or local file
//! - **Deterministic ordering**: lexicographic sort with case-insensitive dedup
//! - **Date filtering**: "available on or before" semantics
//! - **Persistence**: sorted-list save/load with exact round-trip
//! - **Analysis**: OpenAI-compatible chat-completions dispatch

// Re-export main public API types and functions
pub use analysis::{build_prompt, AnalysisClient};
pub use config::{
    load_env_config, AnalysisConfig, ConfigManager, DefaultsConfig, EnvConfig, FileConfig,
    parse_timeout_string,
};
pub use error::DomainerError;
pub use filter::{filter_by_date, parse_filter_date};
pub use pipeline::DomainPipeline;
pub use sort::normalize_and_sort;
pub use sources::{parse_feed, FileSource, HttpSource};
pub use store::{load_sorted, save_sorted};
pub use types::{DomainRecord, FeedSource, PipelineConfig, DEFAULT_FEED_URL};
pub use utils::{normalize_domain, validate_domain};

// Internal modules
mod analysis;
mod config;
mod error;
mod filter;
mod pipeline;
mod sort;
mod sources;
mod store;
mod types;
mod utils;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainerError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
