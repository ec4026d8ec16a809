//! Attachment byte storage behind the file store port.
//!
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod ports;
