//! Feed sources for raw domain data.
//!
//! A feed is a plain-text document with one entry per line:
//!
//! ```text
//! example.se<TAB>2024-12-01
//! ```
//!
//! Lines carrying only a domain name are accepted as records without
//! availability metadata. Malformed lines (wrong field count, implausible
//! hostname, unparseable date) are dropped with a warning; a feed that
//! yields no valid entries at all is a fetch error.

mod file;
mod http;

pub use file::FileSource;
pub use http::HttpSource;

use crate::error::DomainerError;
use crate::filter::parse_filter_date;
use crate::types::DomainRecord;
use crate::utils::{normalize_domain, validate_domain};

/// Parse raw feed content into domain records.
///
/// # Arguments
///
/// * `content` - The feed document
/// * `source` - Human-readable source location, used in error messages
///
/// # Errors
///
/// Returns `DomainerError::FetchError` when no line of the feed could be
/// parsed into a valid record.
pub fn parse_feed(content: &str, source: &str) -> Result<Vec<DomainRecord>, DomainerError> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_feed_line(line) {
            Ok(record) => records.push(record),
            Err(e) => {
                dropped += 1;
                tracing::warn!("skipping malformed feed line: {}", e);
            }
        }
    }

    if records.is_empty() {
        return Err(DomainerError::fetch(
            source,
            format!("no valid entries found ({} lines dropped)", dropped),
        ));
    }

    if dropped > 0 {
        tracing::debug!("parsed {} records, dropped {} lines", records.len(), dropped);
    }

    Ok(records)
}

/// Parse a single feed line into a record.
///
/// Accepts tab-separated feed lines and comma-separated rows, so a
/// previously saved sorted list can be fed back in with `--file`.
fn parse_feed_line(line: &str) -> Result<DomainRecord, DomainerError> {
    let fields: Vec<&str> = line.split('\t').collect();

    match fields.as_slice() {
        [field] => {
            if let Some((domain, date)) = field.split_once(", ") {
                let domain = normalize_domain(domain);
                validate_domain(&domain)?;
                let date = parse_filter_date(date)?;
                return Ok(DomainRecord::with_date(domain, date));
            }
            let domain = normalize_domain(field);
            validate_domain(&domain)?;
            Ok(DomainRecord::new(domain))
        }
        [domain, date] => {
            let domain = normalize_domain(domain);
            validate_domain(&domain)?;
            let date = parse_filter_date(date)?;
            Ok(DomainRecord::with_date(domain, date))
        }
        _ => Err(DomainerError::parse_line(
            format!("expected 1 or 2 tab-separated fields, got {}", fields.len()),
            line,
        )),
    }
}
