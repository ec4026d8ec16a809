//! Port contracts for attachment byte storage.

pub mod file_store;

pub use file_store::{FileStore, FileStoreError, FileStoreResult, StoredFile, sanitize_file_name};
