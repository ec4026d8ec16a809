//! Order lifecycle management.
//!
//! This context owns the fabrication pipeline: the stage catalogue, the
//! order aggregate, the (stage, requested-status) transition table, manual
//! placement defaults, the readiness cascade that promotes a fully
//! fabricated order, and collaborator assignment. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
