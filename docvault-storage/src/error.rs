//! Error types for the storage layer.

use thiserror::Error;

/// All errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The file content does not have the expected envelope shape
    /// (malformed JSON, wrong component count, bad hex).
    #[error("malformed store file: {0}")]
    Format(String),

    /// Authenticated decryption failed. Covers both a wrong password and a
    /// tampered/corrupted file; the two causes are intentionally
    /// indistinguishable.
    #[error("authentication failed (wrong password or corrupted store)")]
    Authentication,

    /// Update/delete target id does not exist.
    #[error("document not found: {0}")]
    NotFound(u64),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;
