//! Unified error types for xhrpack.
//!
//! This module provides a single [`XhrpackError`] enum that covers every error
//! a pipeline stage can surface, plus [`FetchError`] for the per-image failures
//! that the orchestrator contains instead of propagating.
//!
//! # Error Handling Philosophy
//!
//! - **Per-item problems** (malformed entries, unrecoverable payloads, failed
//!   downloads) are contained where they happen and never abort a run
//! - **Stage-level problems** (missing input, unreadable JSON, unwritable
//!   output) are typed errors the caller can match on

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for xhrpack operations.
///
/// # Example
///
/// ```rust
/// use xhrpack::error::Result;
/// use xhrpack::NormalizedRecord;
///
/// fn my_function() -> Result<Vec<NormalizedRecord>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, XhrpackError>;

/// The error type for all xhrpack stage operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum XhrpackError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The file a stage needs does not exist.
    ///
    /// Raised before any output is written, so a failed stage leaves no
    /// partial files behind.
    #[error("Input file not found: {}", path.display())]
    MissingInput {
        /// The path that was expected to exist
        path: PathBuf,
    },

    /// The input parsed but does not have the expected overall shape.
    ///
    /// This is only raised for whole-file problems, e.g. a dump whose top
    /// level is not an array. Individual malformed entries are skipped.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// JSON parsing/serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A report document could not be assembled.
    #[cfg(feature = "report")]
    #[error("Report error: {0}")]
    Report(String),

    /// An image download failed.
    ///
    /// The orchestrator never surfaces this; it is available to callers using
    /// [`ImageFetcher::fetch`](crate::fetch::ImageFetcher::fetch) directly.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// Why a single image could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP status {status}")]
    Status {
        /// Numeric HTTP status code
        status: u16,
    },
    /// The request never produced a response (DNS, connect, timeout, TLS...).
    #[error("request failed: {0}")]
    Transport(String),
    /// Writing the image into the cache directory failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[cfg(feature = "fetch")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status {
                status: status.as_u16(),
            },
            None => FetchError::Transport(err.to_string()),
        }
    }
}

impl From<std::string::FromUtf8Error> for XhrpackError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        XhrpackError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl XhrpackError {
    /// Creates a missing input error.
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        XhrpackError::MissingInput { path: path.into() }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        XhrpackError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a report error.
    #[cfg(feature = "report")]
    pub fn report(message: impl Into<String>) -> Self {
        XhrpackError::Report(message.into())
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, XhrpackError::Io(_))
    }

    /// Returns `true` if a required input file was missing.
    pub fn is_missing_input(&self) -> bool {
        matches!(self, XhrpackError::MissingInput { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, XhrpackError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a JSON error.
    pub fn is_json(&self) -> bool {
        matches!(self, XhrpackError::Json(_))
    }
}

impl FetchError {
    /// Creates a status error from a numeric HTTP code.
    pub fn status(status: u16) -> Self {
        FetchError::Status { status }
    }

    /// Creates a transport error from any displayable cause.
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport(message.into())
    }
}

// ============================================================================
// Tests
// ============================================================================
