//! Error types for order domain validation and parsing.

use super::ids::{OrderId, ProductionTaskId};
use thiserror::Error;

/// Errors returned while constructing or mutating domain order values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderDomainError {
    /// The order number is empty after trimming.
    #[error("order number must not be empty")]
    EmptyOrderNumber,

    /// The client name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyClientName,

    /// The referenced production task does not belong to the order.
    #[error("production task {task_id} does not belong to order {order_id}")]
    UnknownTask {
        /// Parent order identifier.
        order_id: OrderId,
        /// Missing task identifier.
        task_id: ProductionTaskId,
    },
}

/// Error returned while parsing stage names from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown stage: {0}")]
pub struct ParseStageError(pub String);

/// Error returned while parsing production-task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown production task status: {0}")]
pub struct ParseTaskStatusError(pub String);
