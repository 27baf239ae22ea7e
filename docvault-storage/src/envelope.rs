//! On-disk envelope codec.
//!
//! Two formats, selected by the configuration's password:
//!
//! - *Plain*: pretty-printed UTF-8 JSON array of document objects.
//! - *Encrypted*: a single string `<saltHex>:<ivHex>:<tagHex>:<ciphertextHex>`,
//!   all four components hex-encoded and colon-separated.
//!
//! Every encode in encrypted mode generates a fresh salt and nonce, so two
//! writes of identical data never share key material and never produce the
//! same bytes.

use crate::config::StoreConfig;
use crate::document::Document;
use crate::error::{StorageError, StorageResult};
use docvault_crypto::{decrypt, derive_key, encrypt, EncryptedPayload, Salt};
use serde_json::Value;

/// Decodes file bytes into the document collection.
///
/// Shape problems (bad JSON, wrong component count, bad hex) surface as
/// [`StorageError::Format`]; a decryption failure surfaces as
/// [`StorageError::Authentication`]; wrong password and corrupted file are
/// indistinguishable by design.
pub fn decode(bytes: &[u8], config: &StoreConfig) -> StorageResult<Vec<Document>> {
    match &config.password {
        None => documents_from_json(bytes),
        Some(password) => {
            let text = std::str::from_utf8(bytes)
                .map_err(|_| StorageError::Format("envelope is not valid UTF-8".to_string()))?;
            let (salt_hex, rest) = text
                .trim_end()
                .split_once(':')
                .ok_or_else(|| StorageError::Format("missing salt separator".to_string()))?;

            let mut parts = rest.split(':');
            let (Some(iv_hex), Some(tag_hex), Some(ciphertext_hex), None) =
                (parts.next(), parts.next(), parts.next(), parts.next())
            else {
                return Err(StorageError::Format(
                    "envelope must be salt:iv:tag:ciphertext".to_string(),
                ));
            };

            let salt = Salt::from_bytes(fixed_component("salt", salt_hex)?);
            let payload = EncryptedPayload {
                nonce: fixed_component("iv", iv_hex)?,
                tag: fixed_component("auth tag", tag_hex)?,
                ciphertext: hex::decode(ciphertext_hex).map_err(|_| {
                    StorageError::Format("ciphertext is not valid hex".to_string())
                })?,
            };

            let key = derive_key(password, &salt, &config.kdf_params())
                .map_err(|e| StorageError::Crypto(e.to_string()))?;
            let plaintext = decrypt(&key, &payload, config.algorithm)
                .map_err(|_| StorageError::Authentication)?;
            documents_from_json(&plaintext)
        }
    }
}

/// Encodes the document collection into file bytes.
pub fn encode(documents: &[Document], config: &StoreConfig) -> StorageResult<Vec<u8>> {
    let json = serde_json::to_vec_pretty(documents)?;
    match &config.password {
        None => Ok(json),
        Some(password) => {
            let salt = Salt::random();
            let key = derive_key(password, &salt, &config.kdf_params())
                .map_err(|e| StorageError::Crypto(e.to_string()))?;
            let payload = encrypt(&key, &json, config.algorithm)
                .map_err(|e| StorageError::Crypto(e.to_string()))?;

            let envelope = format!(
                "{}:{}:{}:{}",
                hex::encode(salt.as_bytes()),
                hex::encode(payload.nonce),
                hex::encode(payload.tag),
                hex::encode(&payload.ciphertext),
            );
            Ok(envelope.into_bytes())
        }
    }
}

/// Decodes a hex component with a fixed byte length.
fn fixed_component<const N: usize>(label: &str, hex_str: &str) -> StorageResult<[u8; N]> {
    let bytes = hex::decode(hex_str)
        .map_err(|_| StorageError::Format(format!("{label} is not valid hex")))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| StorageError::Format(format!("{label} must be {N} bytes, got {len}")))
}

fn documents_from_json(bytes: &[u8]) -> StorageResult<Vec<Document>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| StorageError::Format(format!("invalid JSON: {e}")))?;
    let Value::Array(items) = value else {
        return Err(StorageError::Format(
            "store file must be a JSON array".to_string(),
        ));
    };
    items
        .into_iter()
        .map(|item| match item {
            Value::Object(document) => Ok(document),
            _ => Err(StorageError::Format(
                "array element is not a document object".to_string(),
            )),
        })
        .collect()
}
