//! Persistence for sorted domain lists.
//!
//! The on-disk format matches what the tool has always written: a
//! `domain, date` header followed by one `name, YYYY-MM-DD` row per record
//! (the date column is omitted for records without availability metadata).
//! `load_sorted` round-trips `save_sorted` output exactly, order preserved.

use crate::error::DomainerError;
use crate::filter::parse_filter_date;
use crate::types::DomainRecord;
use crate::utils::{normalize_domain, validate_domain};
use std::io::Write;
use std::path::Path;

const HEADER: &str = "domain, date";

/// Write a sorted domain list to `path`.
///
/// # Errors
///
/// Returns `DomainerError::EmptyInput` when there is nothing to save and
/// `FileError` on any I/O failure.
pub fn save_sorted<P: AsRef<Path>>(
    path: P,
    records: &[DomainRecord],
) -> Result<(), DomainerError> {
    let path = path.as_ref();

    if records.is_empty() {
        return Err(DomainerError::empty_input("saving sorted domains"));
    }

    let mut file = std::fs::File::create(path).map_err(|e| {
        DomainerError::file_error(path.to_string_lossy(), format!("failed to create: {}", e))
    })?;

    let mut out = String::with_capacity(records.len() * 24);
    out.push_str(HEADER);
    out.push('\n');
    for record in records {
        out.push_str(&record.to_string());
        out.push('\n');
    }

    file.write_all(out.as_bytes()).map_err(|e| {
        DomainerError::file_error(path.to_string_lossy(), format!("failed to write: {}", e))
    })?;

    tracing::debug!("saved {} records to {}", records.len(), path.display());
    Ok(())
}

/// Load a previously saved sorted domain list from `path`.
///
/// Malformed rows are dropped with a warning, mirroring the feed parser.
///
/// # Errors
///
/// Returns `FileError` if the file is missing or unreadable, and
/// `ParseError` if no row of the file could be read back as a record.
pub fn load_sorted<P: AsRef<Path>>(path: P) -> Result<Vec<DomainRecord>, DomainerError> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path).map_err(|e| {
        DomainerError::file_error(path.to_string_lossy(), format!("failed to read: {}", e))
    })?;

    let mut records = Vec::new();
    for line in content.lines().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_row(line) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("skipping malformed row in {}: {}", path.display(), e),
        }
    }

    if records.is_empty() {
        return Err(DomainerError::ParseError {
            message: format!("no records found in '{}'", path.display()),
            line: None,
        });
    }

    Ok(records)
}

fn parse_row(line: &str) -> Result<DomainRecord, DomainerError> {
    match line.split_once(", ") {
        Some((domain, date)) => {
            let domain = normalize_domain(domain);
            validate_domain(&domain)?;
            let date = parse_filter_date(date)?;
            Ok(DomainRecord::with_date(domain, date))
        }
        None => {
            let domain = normalize_domain(line);
            validate_domain(&domain)?;
            Ok(DomainRecord::new(domain))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_records_and_order() {
        let records = vec![
            DomainRecord::with_date("alpha.se", date(2024, 12, 1)),
            DomainRecord::new("beta.se"),
            DomainRecord::with_date("gamma.se", date(2025, 2, 1)),
        ];

        let file = tempfile::NamedTempFile::new().unwrap();
        save_sorted(file.path(), &records).unwrap();
        let loaded = load_sorted(file.path()).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_save_writes_header() {
        let records = vec![DomainRecord::with_date("alpha.se", date(2024, 12, 1))];
        let file = tempfile::NamedTempFile::new().unwrap();
        save_sorted(file.path(), &records).unwrap();

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("domain, date\n"));
        assert!(content.contains("alpha.se, 2024-12-01"));
    }

    #[test]
    fn test_save_empty_is_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = save_sorted(file.path(), &[]).unwrap_err();
        assert!(matches!(err, DomainerError::EmptyInput { .. }));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let err = load_sorted("/nonexistent/sorted.txt").unwrap_err();
        assert!(matches!(err, DomainerError::FileError { .. }));
    }

    #[test]
    fn test_load_skips_malformed_rows() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "domain, date\nalpha.se, 2024-12-01\nnot a row at all!!\nbeta.se, 2025-01-01\n",
        )
        .unwrap();

        let loaded = load_sorted(file.path()).unwrap();
        assert_eq!(loaded.len(), 2);
    }
}
