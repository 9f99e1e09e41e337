//! Error types for treemerge

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a merge
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Directory '{}' does not exist.", path.display())]
    InvalidRoot { path: PathBuf },

    #[error("Cannot write output file {}: {source}", path.display())]
    OutputWriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid extension: {extension:?}")]
    InvalidExtension { extension: String },

    #[error("No extensions given")]
    NoExtensions,

    #[error("Cannot read ignore file {}: {source}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MergeError {
    /// Create a new invalid root error
    pub fn invalid_root(path: impl Into<PathBuf>) -> Self {
        Self::InvalidRoot { path: path.into() }
    }

    /// Create a new output write failure
    pub fn output_write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputWriteFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid extension error
    pub fn invalid_extension(extension: impl Into<String>) -> Self {
        Self::InvalidExtension {
            extension: extension.into(),
        }
    }

    /// Whether the error is about the scan root rather than the run itself
    pub fn is_invalid_root(&self) -> bool {
        matches!(self, Self::InvalidRoot { .. })
    }
}

/// A single file that could not be read. Recovered by annotating the output.
#[derive(Error, Debug)]
#[error("Error reading file {}: {source}", path.display())]
pub struct FileReadFailure {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Result type alias for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;
