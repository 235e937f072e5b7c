//! Error types for pdb-classify
//!
//! Two layers of errors exist:
//! - [`RetrievalError`] describes why a single structure could not be fetched.
//!   It never leaves the classifier; every variant collapses into
//!   [`Outcome::NotRetrievable`](crate::types::Outcome::NotRetrievable).
//! - [`Error`] is fatal for a run: bad configuration, an unreadable input
//!   collection, or a checkpoint that could not be persisted.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdb-classify operations
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal error type for pdb-classify
///
/// Any of these aborts the batch, since continuing without durable state
/// defeats the purpose of checkpointing.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "checkpoint.interval")
        key: Option<String>,
    },

    /// The identifier collection could not be loaded
    #[error("failed to load identifier collection from {path}: {reason}")]
    InputLoad {
        /// Path the collection was read from
        path: PathBuf,
        /// The reason loading failed
        reason: String,
    },

    /// A checkpoint file could not be written
    #[error("failed to write checkpoint {path}: {reason}")]
    CheckpointWrite {
        /// Destination of the checkpoint
        path: PathBuf,
        /// The reason the write failed
        reason: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error tied to a specific key
    pub fn config(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: Some(key.into()),
        }
    }
}

/// Why a single structure retrieval failed
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// Transport failure (connect, timeout, body read)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} fetching {url}")]
    Status {
        /// Status code returned by the server
        status: u16,
        /// URL that was requested
        url: String,
    },

    /// Server answered successfully but sent nothing
    #[error("empty response body")]
    EmptyBody,

    /// The structure file could not be written locally
    #[error("failed to store structure file: {0}")]
    Io(#[from] std::io::Error),
}
