//! Adapter implementations of the notification ports.

pub mod memory;

pub use memory::{RecordedMessage, RecordingNotifier};
