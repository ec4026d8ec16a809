//! Directory-backed file store using capability-scoped filesystem access.

use crate::files::ports::{
    FileStore, FileStoreError, FileStoreResult, StoredFile, sanitize_file_name,
};
use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;

/// File store rooted in a single directory.
///
/// The directory handle is capability-scoped: stored names are already
/// sanitised to a single path component, and the handle cannot reach
/// outside its root regardless.
#[derive(Debug, Clone)]
pub struct DirFileStore {
    dir: Arc<Dir>,
}

impl DirFileStore {
    /// Opens the store over an existing directory.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::Io`] when the directory cannot be opened.
    pub fn open(path: &str) -> FileStoreResult<Self> {
        let dir = Dir::open_ambient_dir(path, ambient_authority()).map_err(FileStoreError::io)?;
        Ok(Self { dir: Arc::new(dir) })
    }
}

#[async_trait]
impl FileStore for DirFileStore {
    async fn save(&self, name: &str, bytes: &[u8]) -> FileStoreResult<StoredFile> {
        let safe = sanitize_file_name(name)?;
        let dir = Arc::clone(&self.dir);
        let target = safe.clone();
        let payload = bytes.to_vec();
        tokio::task::spawn_blocking(move || dir.write(target, payload))
            .await
            .map_err(FileStoreError::io)?
            .map_err(FileStoreError::io)?;
        Ok(StoredFile::new(safe.clone(), safe))
    }

    async fn open(&self, file: &StoredFile) -> FileStoreResult<Vec<u8>> {
        let dir = Arc::clone(&self.dir);
        let location = file.location().to_owned();
        let lookup = location.clone();
        tokio::task::spawn_blocking(move || dir.read(lookup))
            .await
            .map_err(FileStoreError::io)?
            .map_err(|err| {
                if err.kind() == std::io::ErrorKind::NotFound {
                    FileStoreError::NotFound(location.clone())
                } else {
                    FileStoreError::io(err)
                }
            })
    }
}
