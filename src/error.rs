//! Error types for petabvis.
//!
//! This module provides a unified error handling approach using `thiserror`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for petabvis operations.
pub type Result<T> = std::result::Result<T, PetabVisError>;

/// Errors that can occur in petabvis.
#[derive(Debug, Error)]
pub enum PetabVisError {
    /// A table is malformed or lacks a required column.
    #[error("Data format error: {0}")]
    DataFormat(String),

    /// No plot groups are available.
    #[error("Dataset is empty: no plot groups loaded")]
    EmptyDataset,

    /// Navigation index outside the loaded groups.
    #[error("Plot index {index} out of range (0..{count})")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of loaded groups.
        count: usize,
    },

    /// Failed to open a file.
    #[error("Failed to open file: {path}")]
    FileOpen {
        /// Path that could not be opened.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to access clipboard.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PetabVisError {
    /// Create a DataFormat error.
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat(message.into())
    }

    /// Create a FileOpen error.
    pub fn file_open(path: PathBuf, source: std::io::Error) -> Self {
        Self::FileOpen { path, source }
    }

    /// Create an OutOfRange error.
    pub fn out_of_range(index: usize, count: usize) -> Self {
        Self::OutOfRange { index, count }
    }

    /// Whether this error came from malformed input data.
    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::DataFormat(_))
    }
}
