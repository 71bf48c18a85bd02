//! Local file feed source.

use crate::error::DomainerError;
use crate::sources::parse_feed;
use crate::types::DomainRecord;
use std::path::Path;

/// Feed source that reads the document from the local filesystem.
#[derive(Clone, Default)]
pub struct FileSource;

impl FileSource {
    pub fn new() -> Self {
        Self
    }

    /// Read and parse the feed file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `DomainerError::FileError` if the file is missing or
    /// unreadable, or `FetchError` if it contains no valid entries.
    pub fn fetch_records<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Vec<DomainRecord>, DomainerError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DomainerError::file_error(
                path.to_string_lossy(),
                "feed file not found",
            ));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainerError::file_error(
                path.to_string_lossy(),
                format!("failed to read feed file: {}", e),
            )
        })?;

        parse_feed(&content, &path.to_string_lossy())
    }
}
