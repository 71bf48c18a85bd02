//! Normalization, sorting, and deduplication of domain collections.
//!
//! The sorter is a pure function: it takes the raw record sequence and
//! produces a deterministically ordered one. The sort key is the lowercased
//! domain name; the availability date acts only as a pre-dedup tiebreaker so
//! the record kept for a duplicated name is always the earliest-dated one.

use crate::types::DomainRecord;
use crate::utils::normalize_domain;

/// Normalize, sort, and deduplicate a domain collection.
///
/// - Domain names are lowercased and trimmed.
/// - Records are sorted lexicographically by normalized name; records that
///   share a name are ordered by date (dateless records last).
/// - Case-insensitive duplicate names are removed, keeping the first record
///   after the sort.
///
/// The operation is idempotent: applying it to its own output yields the
/// same sequence.
pub fn normalize_and_sort(records: Vec<DomainRecord>) -> Vec<DomainRecord> {
    let mut normalized: Vec<DomainRecord> = records
        .into_iter()
        .map(|mut record| {
            record.domain = normalize_domain(&record.domain);
            record
        })
        .collect();

    normalized.sort_by(|a, b| {
        a.domain
            .cmp(&b.domain)
            .then_with(|| match (a.available_on, b.available_on) {
                (Some(da), Some(db)) => da.cmp(&db),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });

    normalized.dedup_by(|a, b| a.domain == b.domain);
    normalized
}
