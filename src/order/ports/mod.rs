//! Port contracts for the order context.
//!
//! Ports define infrastructure-agnostic interfaces used by order services.

pub mod repository;

pub use repository::{OrderRepository, OrderRepositoryError, OrderRepositoryResult};
