//! Cryptographic layer for docvault.
//!
//! Provides the persistence envelope's primitives:
//! - PBKDF2-HMAC key stretching from passwords (SHA-256 or SHA-512)
//! - Authenticated encryption with AES-256-GCM or ChaCha20-Poly1305
//! - Key material zeroized on drop
//!
//! # Architecture
//!
//! Every on-disk write is independently keyed: the store generates a fresh
//! 16-byte salt per encode and a fresh 12-byte nonce per encryption, so no
//! key/nonce pair is ever reused even when rewriting unchanged data.
//!
//! There is no separate password-verification token. The AEAD tag doubles as
//! the check: decrypting with a key derived from the wrong password fails
//! authentication exactly like tampered ciphertext does, and the two causes
//! are indistinguishable to callers.

mod cipher;
mod error;
mod key;

pub use cipher::{decrypt, encrypt, CipherAlgorithm, EncryptedPayload, NONCE_SIZE, TAG_SIZE};
pub use error::{CryptoError, CryptoResult};
pub use key::{
    derive_key, DerivedKey, DigestAlgorithm, KdfParams, Salt, DEFAULT_ITERATIONS, KEY_SIZE,
    SALT_SIZE,
};
