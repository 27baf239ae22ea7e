//! Error types for the crypto layer.

use thiserror::Error;

/// All errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Authenticated decryption failed. Deliberately carries no detail:
    /// a wrong key and tampered ciphertext must be indistinguishable.
    #[error("authentication failed (wrong key or tampered data)")]
    Authentication,
}

pub type CryptoResult<T> = Result<T, CryptoError>;
