//! Error handling for the mortality engine.
//!
//! Absence of data is never an error in this crate: lookups return `Option`
//! or a sentinel text. The variants below cover loading a dataset and the
//! optional strict row validation.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

use crate::schema::MalformedRowError;

/// Specialized error type for dataset loading and validation
#[derive(Debug, thiserror::Error)]
pub enum MortalityError {
    /// Error opening or reading a file
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Error decoding a JSON dataset or session document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Error processing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),
    /// Error processing Arrow arrays
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),
    /// A required column is missing from a columnar dataset
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),
    /// File extension does not map to a supported dataset format
    #[error("Unsupported dataset format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Strict mode rejected fields that needed coercion, `count` over all rows
    #[error("{count} malformed fields, first: {first}")]
    MalformedRows {
        count: usize,
        first: MalformedRowError,
    },
    /// A blocking load task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl MortalityError {
    /// Wrap an I/O error with the path that produced it
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for mortality engine operations
pub type Result<T> = std::result::Result<T, MortalityError>;
