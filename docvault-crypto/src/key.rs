//! Password-based key derivation.
//!
//! Keys are stretched from passwords with PBKDF2-HMAC over a configurable
//! digest. The iteration count and digest are part of the store
//! configuration; the salt is generated fresh for every write and stored in
//! the envelope, so a captured file never shares a salt with any other write.

use crate::error::{CryptoError, CryptoResult};
use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Sha256, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Derived key length in bytes (256-bit).
pub const KEY_SIZE: usize = 32;

/// Salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// A 16-byte key-derivation salt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Salt([u8; SALT_SIZE]);

impl Salt {
    /// Generates a fresh random salt.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.0
    }
}

/// Digest used by the PBKDF2-HMAC key stretcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigestAlgorithm {
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    /// Resolves a configuration name ("sha256", "sha512") to a digest.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

/// Key-derivation parameters, fixed at store-open time.
#[derive(Clone, Copy, Debug)]
pub struct KdfParams {
    pub iterations: u32,
    pub digest: DigestAlgorithm,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            digest: DigestAlgorithm::Sha256,
        }
    }
}

/// A 256-bit symmetric key derived from a password.
///
/// Zeroized on drop. Deliberately has no `Debug` impl so key material
/// cannot end up in logs.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey([u8; KEY_SIZE]);

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

/// Derives a 256-bit key from a password and salt.
///
/// Deterministic: equal inputs always yield the same key.
pub fn derive_key(password: &str, salt: &Salt, params: &KdfParams) -> CryptoResult<DerivedKey> {
    if params.iterations == 0 {
        return Err(CryptoError::KeyDerivation(
            "iteration count must be non-zero".to_string(),
        ));
    }

    let mut key = [0u8; KEY_SIZE];
    match params.digest {
        DigestAlgorithm::Sha256 => {
            pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), params.iterations, &mut key)
        }
        DigestAlgorithm::Sha512 => {
            pbkdf2_hmac::<Sha512>(password.as_bytes(), salt.as_bytes(), params.iterations, &mut key)
        }
    }
    Ok(DerivedKey(key))
}
