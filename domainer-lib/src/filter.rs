//! Date-based filtering of domain collections.
//!
//! Filtering answers: which domains are available on a given date? A domain
//! qualifies when its availability date is on or before the target date.
//! Records without a date are treated as "unknown availability" and excluded.

use crate::error::DomainerError;
use crate::types::DomainRecord;
use chrono::NaiveDate;

/// Parse a `YYYY-MM-DD` filter date.
///
/// # Errors
///
/// Returns `DomainerError::InvalidDate` for anything that is not a valid
/// calendar date in that form (including impossible dates like 2025-13-40).
pub fn parse_filter_date(input: &str) -> Result<NaiveDate, DomainerError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|e| DomainerError::invalid_date(input, format!("expected YYYY-MM-DD ({})", e)))
}

/// Return the records available on or before `target_date`.
///
/// Produces a new collection; the input is not mutated and relative order
/// is preserved. The result is monotone in the target date: for D1 <= D2
/// the D1 result is a subset of the D2 result.
pub fn filter_by_date(records: &[DomainRecord], target_date: NaiveDate) -> Vec<DomainRecord> {
    records
        .iter()
        .filter(|record| matches!(record.available_on, Some(date) if date <= target_date))
        .cloned()
        .collect()
}
