//! Adapter implementations of the file store port.

pub mod dir;
pub mod memory;

pub use dir::DirFileStore;
pub use memory::InMemoryFileStore;
