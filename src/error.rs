//! Unified error types for chatlens.
//!
//! This module provides a single [`ChatlensError`] enum that covers every
//! fallible operation in the library: loading exports, writing output and
//! reading or writing the snapshot cache.
//!
//! # What ends up here
//!
//! - **Malformed message data** never surfaces here. Missing fields, broken
//!   links and undecodable text are recovered inside the analysis with safe
//!   defaults.
//! - **Library users** get typed errors they can match on for everything that
//!   touches the outside world (files, JSON documents, CSV output).
//! - **Developers** get source error chains for debugging.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatlens operations.
///
/// # Example
///
/// ```rust
/// use chatlens::error::Result;
/// use chatlens::Message;
///
/// fn my_function() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatlensError>;

/// The error type for all chatlens operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatlensError {
    /// Reading an export or writing output or the cache failed, for example
    /// because the file is missing or not writable.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse an export document.
    ///
    /// Carries the file the document came from once the loader knows it.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "Messenger JSON")
        format: &'static str,
        /// What went wrong while parsing
        #[source]
        source: ParseErrorKind,
        /// Export file, when loaded from disk
        path: Option<PathBuf>,
    },

    /// The document doesn't match the expected structure.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// Export format being read
        format: &'static str,
        /// Missing or malformed part of the document
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    ///
    /// Parse failures of export documents are reported as [`ChatlensError::Parse`];
    /// this variant covers serializing snapshots and summaries.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    ///
    /// Occurs when in-memory output is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Where the bytes were produced
        context: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// The snapshot cache file exists but cannot be used.
    #[error("Cache error ({}): {message}", path.display())]
    Cache {
        /// Location of the cache file
        path: PathBuf,
        /// Why the entry was rejected
        message: String,
    },
}

/// Underlying cause of a [`ChatlensError::Parse`].
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// JSON parsing error
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    /// Generic parsing error
    #[error("{0}")]
    Other(String),
}

impl From<std::string::FromUtf8Error> for ChatlensError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatlensError::Utf8 {
            context: "in-memory output".to_string(),
            source: err,
        }
    }
}

impl ChatlensError {
    /// Creates a parse error for a Messenger/Instagram JSON export.
    pub fn export_parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        ChatlensError::Parse {
            format: "Messenger JSON",
            source: ParseErrorKind::Json(source),
            path,
        }
    }

    /// Document is valid JSON but not an export.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatlensError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a cache error for the given cache file.
    pub fn cache(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ChatlensError::Cache {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Attaches a file path to a parse error that has none.
    #[must_use]
    pub fn with_path(self, file: impl Into<PathBuf>) -> Self {
        match self {
            ChatlensError::Parse {
                format,
                source,
                path: None,
            } => ChatlensError::Parse {
                format,
                source,
                path: Some(file.into()),
            },
            other => other,
        }
    }

    /// File system failure.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatlensError::Io(_))
    }

    /// Export could not be parsed.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatlensError::Parse { .. })
    }

    /// Export parsed but had the wrong shape.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatlensError::InvalidFormat { .. })
    }

    /// Cache file was present but unusable.
    pub fn is_cache(&self) -> bool {
        matches!(self, ChatlensError::Cache { .. })
    }
}
