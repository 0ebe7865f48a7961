//! Error handling for taskgate-store
//!
//! Durability failures carry the failed operation name so the cache layer
//! can log a useful warning when it swallows a write error: durability loss
//! never fails the caller, corruption does.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store-side error taxonomy
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem I/O failed
    #[error("I/O failure during {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot resource exists but does not parse as a valid state
    ///
    /// Corruption is a fatal configuration error: it is never silently
    /// overwritten with a synthesized default.
    #[error("Corrupt state snapshot at {path}: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    /// State could not be serialized for the durable write
    #[error("Failed to serialize server state: {reason}")]
    Serialize { reason: String },
}

impl StoreError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io { .. } => "ERR_STORE_IO",
            StoreError::Corrupt { .. } => "ERR_STORE_CORRUPT",
            StoreError::Serialize { .. } => "ERR_STORE_SERIALIZE",
        }
    }
}

/// Create an I/O error tagged with the failing operation
pub fn io_error(op: &'static str, source: std::io::Error) -> StoreError {
    StoreError::Io { op, source }
}
