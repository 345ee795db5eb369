//! Error types for user-settings

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for user-settings operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for user-settings
///
/// Only the first four variants ever reach callers of [`Preferences`](crate::Preferences).
/// The I/O variants are produced by the `try_*` helpers of
/// [`FileStore`](crate::FileStore) and are otherwise logged and folded into
/// `false`/empty results.
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // State Errors
    // -------------------------------------------------------------------------
    #[error("Preferences not initialized: {0}")]
    Initialization(String),

    #[error("Unmodifiable state: {0}")]
    UnModifiableState(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    // -------------------------------------------------------------------------
    // Argument Errors
    // -------------------------------------------------------------------------
    #[error("Illegal argument: {0}")]
    IllegalArgument(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete file '{path}': {source}")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// Check if the default path was requested before it could be derived
    #[must_use]
    pub fn is_initialization_error(&self) -> bool {
        matches!(self, Error::Initialization(_))
    }

    /// Check if this error was caused by a malformed argument
    #[must_use]
    pub fn is_argument_error(&self) -> bool {
        matches!(self, Error::IllegalArgument(_))
    }

    /// Check if this is an I/O or serialization error
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Error::FileRead { .. }
                | Error::FileWrite { .. }
                | Error::DirectoryCreate { .. }
                | Error::FileDelete { .. }
                | Error::Serialize(_)
        )
    }
}
