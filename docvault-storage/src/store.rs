//! The document store: CRUD over a single envelope-encoded file.

use crate::config::StoreConfig;
use crate::document::{document_id, matches_query, Document, ID_FIELD};
use crate::envelope;
use crate::error::{StorageError, StorageResult};
use crate::fs::replace_file;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A single-file document store.
///
/// Every operation runs the full read → decode → mutate → encode → write
/// cycle synchronously; nothing is cached between calls. The handle owns an
/// immutable [`StoreConfig`]: the encryption mode is fixed for the store's
/// lifetime, and only [`change_password`](Self::change_password) replaces
/// the active password.
///
/// Single-writer model: two handles (or processes) writing the same file
/// race with last-writer-wins semantics. Callers needing concurrent access
/// must add their own mutual exclusion around the whole operation.
pub struct DocumentStore {
    path: PathBuf,
    config: StoreConfig,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("path", &self.path)
            .field("encrypted", &self.config.is_encrypted())
            .finish()
    }
}

impl DocumentStore {
    /// Opens a store, creating the backing file with an empty collection if
    /// it does not exist.
    ///
    /// An existing file is decoded once up front, so a wrong password or
    /// corrupted envelope surfaces here as [`StorageError::Authentication`]
    /// rather than on first use.
    pub fn open(path: impl Into<PathBuf>, config: StoreConfig) -> StorageResult<Self> {
        let store = Self { path: path.into(), config };
        if store.path.exists() {
            store.load()?;
        } else {
            debug!("creating empty store at {}", store.path.display());
            store.persist(&[])?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_encrypted(&self) -> bool {
        self.config.is_encrypted()
    }

    /// Inserts a document, assigning the next free id.
    ///
    /// Ids are unique within the store (`max` of existing ids plus one); a
    /// caller-supplied `id` field is replaced by the assigned one. Returns
    /// the stored document including its id.
    pub fn insert(&self, document: Document) -> StorageResult<Document> {
        let mut documents = self.load()?;
        let next_id = documents
            .iter()
            .filter_map(document_id)
            .max()
            .map_or(1, |max| max + 1);

        let mut stored = document;
        stored.insert(ID_FIELD.to_string(), Value::from(next_id));
        documents.push(stored.clone());
        self.persist(&documents)?;
        debug!("inserted document {next_id} into {}", self.path.display());
        Ok(stored)
    }

    /// All documents matching `query`, in insertion order.
    ///
    /// The query is a partial document: a match requires every query field
    /// to be present and strictly equal. An empty query matches everything.
    pub fn find(&self, query: &Document) -> StorageResult<Vec<Document>> {
        let documents = self.load()?;
        Ok(documents
            .into_iter()
            .filter(|document| matches_query(document, query))
            .collect())
    }

    /// The first document matching `query`, in insertion order.
    pub fn find_one(&self, query: &Document) -> StorageResult<Option<Document>> {
        let documents = self.load()?;
        Ok(documents
            .into_iter()
            .find(|document| matches_query(document, query)))
    }

    /// The number of documents matching `query`.
    pub fn count(&self, query: &Document) -> StorageResult<usize> {
        let documents = self.load()?;
        Ok(documents
            .iter()
            .filter(|document| matches_query(document, query))
            .count())
    }

    /// Merges `updates` over the document with the given id and returns the
    /// result.
    ///
    /// Updated keys overwrite, untouched keys are preserved. The reserved
    /// `id` field always keeps its original value, even when `updates`
    /// contains one. Ids are never reassigned.
    pub fn update(&self, id: u64, updates: Document) -> StorageResult<Document> {
        let mut documents = self.load()?;
        let document = documents
            .iter_mut()
            .find(|document| document_id(document) == Some(id))
            .ok_or(StorageError::NotFound(id))?;

        for (field, value) in updates {
            if field == ID_FIELD {
                continue;
            }
            document.insert(field, value);
        }
        let updated = document.clone();
        self.persist(&documents)?;
        Ok(updated)
    }

    /// Removes the document with the given id, reporting whether one was
    /// actually removed. Deleting a missing id is not an error.
    pub fn delete(&self, id: u64) -> StorageResult<bool> {
        let mut documents = self.load()?;
        let before = documents.len();
        documents.retain(|document| document_id(document) != Some(id));
        let removed = documents.len() < before;
        self.persist(&documents)?;
        if removed {
            debug!("deleted document {id} from {}", self.path.display());
        }
        Ok(removed)
    }

    /// Re-encrypts the store under a new password. All-or-nothing.
    ///
    /// Phase 1 decodes the envelope with `old_password`; any failure (wrong
    /// password, corrupted file) aborts with the configuration and the
    /// on-disk file both untouched, so the store stays readable under the
    /// old password. Phase 2 persists under `new_password` with a fresh
    /// salt and nonce, and only then adopts the new password into the
    /// handle's configuration.
    pub fn change_password(
        &mut self,
        old_password: &str,
        new_password: &str,
    ) -> StorageResult<()> {
        if !self.config.is_encrypted() {
            return Err(StorageError::Config(
                "password rotation requires an encrypted store".to_string(),
            ));
        }

        let old_config = self.config.with_active_password(old_password);
        let bytes = fs::read(&self.path)?;
        let documents = envelope::decode(&bytes, &old_config)?;

        let new_config = self.config.with_active_password(new_password);
        let encoded = envelope::encode(&documents, &new_config)?;
        self.write_atomic(&encoded)?;
        self.config = new_config;
        info!("store {} re-keyed under a new password", self.path.display());
        Ok(())
    }

    fn load(&self) -> StorageResult<Vec<Document>> {
        let bytes = fs::read(&self.path)?;
        envelope::decode(&bytes, &self.config)
    }

    fn persist(&self, documents: &[Document]) -> StorageResult<()> {
        let encoded = envelope::encode(documents, &self.config)?;
        self.write_atomic(&encoded)
    }

    /// Whole-file rewrite through a sibling temp file, so a crash mid-write
    /// cannot leave a torn envelope.
    fn write_atomic(&self, bytes: &[u8]) -> StorageResult<()> {
        let mut temp_name = self.path.as_os_str().to_os_string();
        temp_name.push(".tmp");
        let temp_path = PathBuf::from(temp_name);

        fs::write(&temp_path, bytes)?;
        replace_file(&temp_path, &self.path)?;
        Ok(())
    }
}
