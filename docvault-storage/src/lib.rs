//! Single-file JSON document store with optional password encryption.
//!
//! Documents are open-ended JSON objects with a reserved integer `id` field
//! assigned at insert time. The whole collection lives in one file: plain
//! JSON when no password is configured, or an encrypted envelope
//! (`salt:iv:tag:ciphertext`, hex-encoded) when one is.
//!
//! # Architecture
//!
//! - Every operation runs a full read → decode → mutate → encode → write
//!   cycle; there is no incremental or append persistence
//! - Writes go through a sibling temp file and an atomic rename, so a crash
//!   mid-write cannot leave a torn envelope
//! - Password rotation re-encrypts the whole store under a fresh key,
//!   all-or-nothing: a failed rotation leaves both the file and the handle's
//!   configuration untouched
//! - Single-writer model: no protection against concurrent writers is
//!   provided; last writer wins

mod config;
mod document;
pub mod envelope;
mod error;
mod fs;
mod store;

pub use config::StoreConfig;
pub use document::{Document, ID_FIELD};
pub use error::{StorageError, StorageResult};
pub use store::DocumentStore;

// Config building blocks, re-exported so consumers don't need a direct
// docvault-crypto dependency.
pub use docvault_crypto::{CipherAlgorithm, DigestAlgorithm, DEFAULT_ITERATIONS};
