//! Error handling for the domain feed pipeline.
//!
//! This module defines a comprehensive error type that covers all the different
//! ways a pipeline run can fail, from network issues to invalid input.

use std::fmt;

/// Main error type for domain feed operations.
///
/// This enum covers all possible failure modes of a pipeline run,
/// providing detailed context for debugging and user-friendly error messages.
#[derive(Debug, Clone)]
pub enum DomainerError {
    /// Invalid domain name format
    InvalidDomain { domain: String, reason: String },

    /// Malformed calendar date (CLI `-d` argument or a feed field)
    InvalidDate { input: String, reason: String },

    /// Feed source unreachable or returned unusable data
    FetchError { source: String, message: String },

    /// Network-related errors (connection, DNS, etc.)
    NetworkError {
        message: String,
        source: Option<String>,
    },

    /// Parsing errors for feed lines or persisted files
    ParseError {
        message: String,
        line: Option<String>,
    },

    /// No domains left to operate on (analysis or output)
    EmptyInput { operation: String },

    /// Text-generation API failures
    AnalysisError {
        message: String,
        status_code: Option<u16>,
    },

    /// Configuration errors (invalid settings, etc.)
    ConfigError { message: String },

    /// File I/O errors when reading feeds or writing output
    FileError { path: String, message: String },

    /// Timeout errors when network operations take too long
    Timeout {
        operation: String,
        duration: std::time::Duration,
    },

    /// Generic internal errors that don't fit other categories
    Internal { message: String },
}

impl DomainerError {
    /// Create a new invalid domain error.
    pub fn invalid_domain<D: Into<String>, R: Into<String>>(domain: D, reason: R) -> Self {
        Self::InvalidDomain {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Create a new invalid date error.
    pub fn invalid_date<I: Into<String>, R: Into<String>>(input: I, reason: R) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Create a new fetch error for a feed source.
    pub fn fetch<S: Into<String>, M: Into<String>>(source: S, message: M) -> Self {
        Self::FetchError {
            source: source.into(),
            message: message.into(),
        }
    }

    /// Create a new network error.
    pub fn network<M: Into<String>>(message: M) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new network error with source information.
    pub fn network_with_source<M: Into<String>, S: Into<String>>(message: M, source: S) -> Self {
        Self::NetworkError {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a new parse error for a specific input line.
    pub fn parse_line<M: Into<String>, L: Into<String>>(message: M, line: L) -> Self {
        Self::ParseError {
            message: message.into(),
            line: Some(line.into()),
        }
    }

    /// Create a new empty input error.
    pub fn empty_input<O: Into<String>>(operation: O) -> Self {
        Self::EmptyInput {
            operation: operation.into(),
        }
    }

    /// Create a new analysis error.
    pub fn analysis<M: Into<String>>(message: M) -> Self {
        Self::AnalysisError {
            message: message.into(),
            status_code: None,
        }
    }

    /// Create a new analysis error with HTTP status code.
    pub fn analysis_with_status<M: Into<String>>(message: M, status_code: u16) -> Self {
        Self::AnalysisError {
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    /// Create a new configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new file error.
    pub fn file_error<P: Into<String>, M: Into<String>>(path: P, message: M) -> Self {
        Self::FileError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a new timeout error.
    pub fn timeout<O: Into<String>>(operation: O, duration: std::time::Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create a new internal error.
    pub fn internal<M: Into<String>>(message: M) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Check if this error was caused by bad user input rather than
    /// by the environment (network, filesystem, remote service).
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDomain { .. }
                | Self::InvalidDate { .. }
                | Self::EmptyInput { .. }
                | Self::ConfigError { .. }
        )
    }
}

impl fmt::Display for DomainerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDomain { domain, reason } => {
                write!(f, "Invalid domain '{}': {}", domain, reason)
            }
            Self::InvalidDate { input, reason } => {
                write!(f, "Invalid date '{}': {}", input, reason)
            }
            Self::FetchError { source, message } => {
                write!(f, "Fetch error from '{}': {}", source, message)
            }
            Self::NetworkError { message, source } => {
                if let Some(source) = source {
                    write!(f, "Network error: {} (source: {})", message, source)
                } else {
                    write!(f, "Network error: {}", message)
                }
            }
            Self::ParseError { message, line } => {
                if let Some(line) = line {
                    write!(f, "Parse error: {} (line: '{}')", message, line)
                } else {
                    write!(f, "Parse error: {}", message)
                }
            }
            Self::EmptyInput { operation } => {
                write!(f, "No domains to process for: {}", operation)
            }
            Self::AnalysisError {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "Analysis error (HTTP {}): {}", code, message)
                } else {
                    write!(f, "Analysis error: {}", message)
                }
            }
            Self::ConfigError { message } => {
                write!(f, "Configuration error: {}", message)
            }
            Self::FileError { path, message } => {
                write!(f, "File error at '{}': {}", path, message)
            }
            Self::Timeout {
                operation,
                duration,
            } => {
                write!(f, "Timeout after {:?} during: {}", duration, operation)
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for DomainerError {}

// Implement From conversions for common error types
impl From<reqwest::Error> for DomainerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout("HTTP request", std::time::Duration::from_secs(30))
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err.to_string())
        } else {
            Self::network_with_source("HTTP request failed", err.to_string())
        }
    }
}

impl From<serde_json::Error> for DomainerError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError {
            message: format!("JSON parsing failed: {}", err),
            line: None,
        }
    }
}

impl From<std::io::Error> for DomainerError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal {
            message: format!("I/O error: {}", err),
        }
    }
}

impl From<regex::Error> for DomainerError {
    fn from(err: regex::Error) -> Self {
        Self::Internal {
            message: format!("Regex error: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_context() {
        let err = DomainerError::invalid_date("2025-13-40", "month out of range");
        assert!(err.to_string().contains("2025-13-40"));

        let err = DomainerError::fetch("https://example.com/feed", "HTTP 503");
        assert!(err.to_string().contains("https://example.com/feed"));
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn test_is_usage_error() {
        assert!(DomainerError::invalid_date("x", "y").is_usage_error());
        assert!(DomainerError::empty_input("analysis").is_usage_error());
        assert!(!DomainerError::network("connection refused").is_usage_error());
        assert!(!DomainerError::fetch("url", "down").is_usage_error());
    }
}
