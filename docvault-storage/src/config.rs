//! Store configuration.
//!
//! An explicit, immutable configuration struct held by the store handle,
//! with no process-wide state. The password (and with it the encryption mode)
//! is fixed at open time and applies uniformly to every read and write;
//! only [`DocumentStore::change_password`](crate::DocumentStore::change_password)
//! replaces it, and only after a successful re-encryption.

use crate::error::{StorageError, StorageResult};
use docvault_crypto::{CipherAlgorithm, DigestAlgorithm, KdfParams, DEFAULT_ITERATIONS};

/// Configuration for a [`DocumentStore`](crate::DocumentStore).
#[derive(Clone)]
pub struct StoreConfig {
    /// Active password. Presence switches the store into encrypted mode
    /// for its entire lifetime.
    pub password: Option<String>,
    /// PBKDF2 iteration count.
    pub iterations: u32,
    /// Digest for the PBKDF2-HMAC key stretcher.
    pub digest: DigestAlgorithm,
    /// AEAD cipher for the envelope payload.
    pub algorithm: CipherAlgorithm,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            password: None,
            iterations: DEFAULT_ITERATIONS,
            digest: DigestAlgorithm::Sha256,
            algorithm: CipherAlgorithm::Aes256Gcm,
        }
    }
}

impl StoreConfig {
    /// Default crypto parameters with the given password (encrypted mode).
    pub fn with_password(password: impl Into<String>) -> Self {
        Self {
            password: Some(password.into()),
            ..Self::default()
        }
    }

    /// Builds a config from name-based options as an application front end
    /// would pass them through (digest `"sha256"`/`"sha512"`, cipher
    /// `"aes-256-gcm"`/`"chacha20-poly1305"`).
    pub fn with_options(
        password: Option<String>,
        iterations: u32,
        digest: &str,
        algorithm: &str,
    ) -> StorageResult<Self> {
        let digest = DigestAlgorithm::from_name(digest)
            .ok_or_else(|| StorageError::Config(format!("unknown digest: {digest}")))?;
        let algorithm = CipherAlgorithm::from_name(algorithm)
            .ok_or_else(|| StorageError::Config(format!("unknown cipher: {algorithm}")))?;
        if iterations == 0 {
            return Err(StorageError::Config("iterations must be non-zero".to_string()));
        }
        Ok(Self { password, iterations, digest, algorithm })
    }

    /// Whether this store reads and writes encrypted envelopes.
    pub fn is_encrypted(&self) -> bool {
        self.password.is_some()
    }

    pub(crate) fn kdf_params(&self) -> KdfParams {
        KdfParams {
            iterations: self.iterations,
            digest: self.digest,
        }
    }

    /// Same crypto parameters with a different active password.
    pub(crate) fn with_active_password(&self, password: &str) -> Self {
        Self {
            password: Some(password.to_string()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_options() {
        let config = StoreConfig::default();
        assert!(!config.is_encrypted());
        assert_eq!(config.iterations, 100_000);
        assert_eq!(config.digest.name(), "sha256");
        assert_eq!(config.algorithm.name(), "aes-256-gcm");
    }

    #[test]
    fn with_options_resolves_names() {
        let config =
            StoreConfig::with_options(Some("pw".into()), 50_000, "sha512", "chacha20-poly1305")
                .unwrap();
        assert!(config.is_encrypted());
        assert_eq!(config.digest, DigestAlgorithm::Sha512);
        assert_eq!(config.algorithm, CipherAlgorithm::ChaCha20Poly1305);
    }

    #[test]
    fn with_options_rejects_unknown_names() {
        assert!(StoreConfig::with_options(None, 1, "md5", "aes-256-gcm").is_err());
        assert!(StoreConfig::with_options(None, 1, "sha256", "des").is_err());
        assert!(StoreConfig::with_options(None, 0, "sha256", "aes-256-gcm").is_err());
    }
}
