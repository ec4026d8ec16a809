//! In-memory file store.

use crate::files::ports::{
    FileStore, FileStoreError, FileStoreResult, StoredFile, sanitize_file_name,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory file store keyed by sanitised name.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFileStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryFileStore {
    /// Creates an empty in-memory file store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn save(&self, name: &str, bytes: &[u8]) -> FileStoreResult<StoredFile> {
        let safe = sanitize_file_name(name)?;
        let mut files = self
            .files
            .write()
            .map_err(|err| FileStoreError::io(std::io::Error::other(err.to_string())))?;
        files.insert(safe.clone(), bytes.to_vec());
        Ok(StoredFile::new(safe.clone(), safe))
    }

    async fn open(&self, file: &StoredFile) -> FileStoreResult<Vec<u8>> {
        let files = self
            .files
            .read()
            .map_err(|err| FileStoreError::io(std::io::Error::other(err.to_string())))?;
        files
            .get(file.location())
            .cloned()
            .ok_or_else(|| FileStoreError::NotFound(file.location().to_owned()))
    }
}
