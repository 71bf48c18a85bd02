//! Utility functions for domain normalization and validation.
//!
//! This module contains helper functions for hostname validation and
//! normalization used by the feed parser and the sorter.

use crate::error::DomainerError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // RFC-1123 label: alphanumeric, hyphens allowed inside, max 63 chars.
    static ref LABEL_RE: Regex = Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").unwrap();
}

/// Normalize a raw domain string for comparison and output.
///
/// Trims surrounding whitespace, lowercases, and strips a single trailing
/// dot (the DNS root label).
pub fn normalize_domain(domain: &str) -> String {
    let trimmed = domain.trim().to_lowercase();
    trimmed.strip_suffix('.').unwrap_or(&trimmed).to_string()
}

/// Validate a domain name format.
///
/// Checks that a normalized domain is a syntactically plausible hostname:
/// non-empty, at most 253 characters, at least two labels, each label
/// matching the RFC-1123 shape.
///
/// # Arguments
///
/// * `domain` - The domain name to validate (expected pre-normalized)
///
/// # Returns
///
/// `Ok(())` if valid, `Err(DomainerError::InvalidDomain)` if not.
pub fn validate_domain(domain: &str) -> Result<(), DomainerError> {
    if domain.is_empty() {
        return Err(DomainerError::invalid_domain(
            domain,
            "Domain name cannot be empty",
        ));
    }

    if domain.len() > 253 {
        return Err(DomainerError::invalid_domain(
            domain,
            "Domain name exceeds 253 characters",
        ));
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return Err(DomainerError::invalid_domain(
            domain,
            "Domain name must contain at least one dot",
        ));
    }

    for label in labels {
        if !LABEL_RE.is_match(label) {
            return Err(DomainerError::invalid_domain(
                domain,
                format!("Invalid label '{}'", label),
            ));
        }
    }

    Ok(())
}
