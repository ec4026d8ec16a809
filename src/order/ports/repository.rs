//! Repository port for order persistence and atomic mutation.

use crate::order::domain::{Order, OrderDomainError, OrderId, ProductionTaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for order repository operations.
pub type OrderRepositoryResult<T> = Result<T, OrderRepositoryError>;

/// Order persistence contract.
///
/// `update` is the single write path for existing orders: the closure runs
/// inside the adapter's per-record critical section (an in-memory per-order
/// lock, or a database transaction holding a row lock), so concurrent
/// mutations of the same order serialize while different orders proceed
/// independently. The mutation commits atomically; returning an error from
/// the closure rolls the whole record back.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Stores a new order with its tasks and attachments.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::DuplicateOrder`] when the order ID
    /// already exists.
    async fn insert(&self, order: &Order) -> OrderRepositoryResult<()>;

    /// Finds an order by identifier.
    ///
    /// Returns `None` when the order does not exist.
    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>>;

    /// Finds the order a production task belongs to.
    ///
    /// Returns `None` when no such task exists.
    async fn find_order_of_task(
        &self,
        task_id: ProductionTaskId,
    ) -> OrderRepositoryResult<Option<OrderId>>;

    /// Returns every stored order, oldest first.
    async fn list_all(&self) -> OrderRepositoryResult<Vec<Order>>;

    /// Atomically mutates one order under the per-record critical section.
    ///
    /// The closure's return value is passed through on success.
    ///
    /// # Errors
    ///
    /// Returns [`OrderRepositoryError::NotFound`] when the order does not
    /// exist, [`OrderRepositoryError::Domain`] when the closure rejects the
    /// mutation (nothing is written), or
    /// [`OrderRepositoryError::Persistence`] when the commit fails (all
    /// partial writes are rolled back).
    async fn update<T, F>(&self, id: OrderId, mutate: F) -> OrderRepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Order) -> Result<T, OrderDomainError> + Send + 'static;
}

/// Errors returned by order repository implementations.
#[derive(Debug, Clone, Error)]
pub enum OrderRepositoryError {
    /// An order with the same identifier already exists.
    #[error("duplicate order identifier: {0}")]
    DuplicateOrder(OrderId),

    /// The order was not found.
    #[error("order not found: {0}")]
    NotFound(OrderId),

    /// The mutation closure rejected the update; the record is unchanged.
    #[error(transparent)]
    Domain(#[from] OrderDomainError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl OrderRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
