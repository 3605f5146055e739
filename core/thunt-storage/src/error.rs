//! Error types for the storage layer.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Error from the SQLite keyed store.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock holder panicked; the guarded data can no longer be trusted.
    #[error("lock poisoned: {0}")]
    Poisoned(&'static str),

    /// The identifier source kept producing keys already in use.
    #[error("no free identifier for kind {kind} after {attempts} attempts")]
    IdSpaceExhausted { kind: &'static str, attempts: usize },

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
