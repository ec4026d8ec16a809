//! Niemeyer: fabrication order workflow engine.
//!
//! This crate tracks custom fabrication orders as they move through a fixed
//! production pipeline, driving stage transitions from requested status
//! labels, task completion, and manual board moves.
//!
//! # Architecture
//!
//! Niemeyer follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, files, etc.)
//!
//! # Modules
//!
//! - [`order`]: The order aggregate, transition engine, and workflow service
//! - [`notify`]: Trigger-based notification selection and delivery
//! - [`files`]: Attachment byte storage behind the file store port

pub mod files;
pub mod notify;
pub mod order;
