//! Authenticated encryption.
//!
//! Both supported ciphers are AEADs with a 12-byte nonce and a 16-byte tag.
//! The tag is kept detached from the ciphertext because the on-disk envelope
//! stores it as its own component.

use crate::error::{CryptoError, CryptoResult};
use crate::key::DerivedKey;
use aes_gcm::aead::{Aead, KeyInit, Nonce};
use aes_gcm::Aes256Gcm;
use chacha20poly1305::ChaCha20Poly1305;
use rand::rngs::OsRng;
use rand::RngCore;

/// AEAD nonce length in bytes (96-bit).
pub const NONCE_SIZE: usize = 12;

/// Authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// AEAD cipher used for the envelope payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CipherAlgorithm {
    Aes256Gcm,
    ChaCha20Poly1305,
}

impl CipherAlgorithm {
    /// Resolves a configuration name to a cipher.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "aes-256-gcm" => Some(Self::Aes256Gcm),
            "chacha20-poly1305" => Some(Self::ChaCha20Poly1305),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Aes256Gcm => "aes-256-gcm",
            Self::ChaCha20Poly1305 => "chacha20-poly1305",
        }
    }
}

/// Output of an authenticated encryption: nonce, detached tag, ciphertext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedPayload {
    pub nonce: [u8; NONCE_SIZE],
    pub tag: [u8; TAG_SIZE],
    pub ciphertext: Vec<u8>,
}

/// Encrypts `plaintext` under `key` with a fresh random nonce.
pub fn encrypt(
    key: &DerivedKey,
    plaintext: &[u8],
    algorithm: CipherAlgorithm,
) -> CryptoResult<EncryptedPayload> {
    match algorithm {
        CipherAlgorithm::Aes256Gcm => seal::<Aes256Gcm>(key, plaintext),
        CipherAlgorithm::ChaCha20Poly1305 => seal::<ChaCha20Poly1305>(key, plaintext),
    }
}

/// Decrypts a payload, verifying its authentication tag.
///
/// Fails closed: a tag mismatch or malformed ciphertext yields
/// [`CryptoError::Authentication`] and never partial plaintext.
pub fn decrypt(
    key: &DerivedKey,
    payload: &EncryptedPayload,
    algorithm: CipherAlgorithm,
) -> CryptoResult<Vec<u8>> {
    match algorithm {
        CipherAlgorithm::Aes256Gcm => open::<Aes256Gcm>(key, payload),
        CipherAlgorithm::ChaCha20Poly1305 => open::<ChaCha20Poly1305>(key, payload),
    }
}

fn seal<C: Aead + KeyInit>(key: &DerivedKey, plaintext: &[u8]) -> CryptoResult<EncryptedPayload> {
    let cipher = C::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::Encryption("cipher rejected key length".to_string()))?;

    let mut nonce = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce);

    // The aead API appends the tag to the ciphertext; split it back off.
    let mut sealed = cipher
        .encrypt(Nonce::<C>::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(format!("AEAD seal failed: {e}")))?;
    let tag_offset = sealed.len() - TAG_SIZE;
    let mut tag = [0u8; TAG_SIZE];
    tag.copy_from_slice(&sealed[tag_offset..]);
    sealed.truncate(tag_offset);

    Ok(EncryptedPayload { nonce, tag, ciphertext: sealed })
}

fn open<C: Aead + KeyInit>(key: &DerivedKey, payload: &EncryptedPayload) -> CryptoResult<Vec<u8>> {
    let cipher = C::new_from_slice(key.as_bytes())
        .map_err(|_| CryptoError::Authentication)?;

    let mut sealed = Vec::with_capacity(payload.ciphertext.len() + TAG_SIZE);
    sealed.extend_from_slice(&payload.ciphertext);
    sealed.extend_from_slice(&payload.tag);

    cipher
        .decrypt(Nonce::<C>::from_slice(&payload.nonce), sealed.as_slice())
        .map_err(|_| CryptoError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{derive_key, DigestAlgorithm, KdfParams, Salt};

    fn test_key() -> DerivedKey {
        let params = KdfParams { iterations: 1_000, digest: DigestAlgorithm::Sha256 };
        derive_key("test-password", &Salt::random(), &params).unwrap()
    }

    #[test]
    fn cipher_names_resolve() {
        assert_eq!(CipherAlgorithm::from_name("aes-256-gcm"), Some(CipherAlgorithm::Aes256Gcm));
        assert_eq!(
            CipherAlgorithm::from_name("chacha20-poly1305"),
            Some(CipherAlgorithm::ChaCha20Poly1305)
        );
        assert_eq!(CipherAlgorithm::from_name("des"), None);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = test_key();
        let payload = encrypt(&key, b"", CipherAlgorithm::Aes256Gcm).unwrap();
        assert!(payload.ciphertext.is_empty());
        let plaintext = decrypt(&key, &payload, CipherAlgorithm::Aes256Gcm).unwrap();
        assert!(plaintext.is_empty());
    }
}
