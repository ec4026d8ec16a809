//! File store port for attachment bytes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Result type for file store operations.
pub type FileStoreResult<T> = Result<T, FileStoreError>;

/// Reference to a stored file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    name: String,
    location: String,
}

impl StoredFile {
    /// Creates a stored-file reference.
    #[must_use]
    pub fn new(name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: location.into(),
        }
    }

    /// Returns the sanitised file name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the opaque stored location.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Attachment byte storage contract.
///
/// The workflow engine only records the returned reference on the order;
/// retrieval and transport belong to the caller.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Stores bytes under a sanitised form of `name`.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::InvalidName`] when no usable file name
    /// survives sanitisation, or [`FileStoreError::Io`] when storage fails.
    async fn save(&self, name: &str, bytes: &[u8]) -> FileStoreResult<StoredFile>;

    /// Retrieves the bytes behind a stored reference.
    ///
    /// # Errors
    ///
    /// Returns [`FileStoreError::NotFound`] when the reference does not
    /// resolve, or [`FileStoreError::Io`] when retrieval fails.
    async fn open(&self, file: &StoredFile) -> FileStoreResult<Vec<u8>>;
}

/// Errors returned by file store implementations.
#[derive(Debug, Clone, Error)]
pub enum FileStoreError {
    /// The file name is unusable even after sanitisation.
    #[error("invalid file name: {0}")]
    InvalidName(String),

    /// The stored reference does not resolve to a file.
    #[error("stored file not found: {0}")]
    NotFound(String),

    /// The underlying storage failed.
    #[error("file store error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl FileStoreError {
    /// Wraps a storage error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}

/// Reduces a caller-supplied file name to a safe relative name.
///
/// Strips any directory components, then replaces every character outside
/// `[A-Za-z0-9._-]` with an underscore.
///
/// # Errors
///
/// Returns [`FileStoreError::InvalidName`] when nothing usable remains.
pub fn sanitize_file_name(raw: &str) -> FileStoreResult<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|ch| ch == '.') {
        return Err(FileStoreError::InvalidName(raw.to_owned()));
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::{FileStoreError, sanitize_file_name};

    #[test]
    fn keeps_plain_names() {
        assert_eq!(
            sanitize_file_name("drawing-v2.pdf").ok(),
            Some("drawing-v2.pdf".to_owned())
        );
    }

    #[test]
    fn strips_directory_components() {
        assert_eq!(
            sanitize_file_name("../../etc/passwd").ok(),
            Some("passwd".to_owned())
        );
        assert_eq!(
            sanitize_file_name("C:\\uploads\\plan.pdf").ok(),
            Some("plan.pdf".to_owned())
        );
    }

    #[test]
    fn replaces_unsafe_characters() {
        assert_eq!(
            sanitize_file_name("floor plan (final).pdf").ok(),
            Some("floor_plan__final_.pdf".to_owned())
        );
    }

    #[test]
    fn rejects_names_with_no_substance() {
        assert!(matches!(
            sanitize_file_name("   "),
            Err(FileStoreError::InvalidName(_))
        ));
        assert!(matches!(
            sanitize_file_name(".."),
            Err(FileStoreError::InvalidName(_))
        ));
    }
}
