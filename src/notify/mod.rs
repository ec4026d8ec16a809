//! Notification selection and delivery for committed transitions.
//!
//! - Domain types in [`domain`]: the pure trigger router and transition
//!   summaries
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
