//! In-memory order repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::order::{
    domain::{Order, OrderDomainError, OrderId, ProductionTaskId},
    ports::{OrderRepository, OrderRepositoryError, OrderRepositoryResult},
};

/// Thread-safe in-memory order repository.
///
/// Each order lives behind its own mutex: mutations of the same order
/// serialize on it while mutations of different orders only contend for the
/// brief map lookup. Mutations are applied to a draft clone and swapped in
/// on success, so a rejected mutation leaves the stored order untouched.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderRepository {
    state: Arc<RwLock<InMemoryOrderState>>,
}

#[derive(Debug, Default)]
struct InMemoryOrderState {
    orders: HashMap<OrderId, Arc<Mutex<Order>>>,
    task_index: HashMap<ProductionTaskId, OrderId>,
}

impl InMemoryOrderRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: OrderId) -> OrderRepositoryResult<Arc<Mutex<Order>>> {
        let state = self
            .state
            .read()
            .map_err(|err| OrderRepositoryError::persistence(std::io::Error::other(err.to_string())))?;
        state
            .orders
            .get(&id)
            .cloned()
            .ok_or(OrderRepositoryError::NotFound(id))
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn insert(&self, order: &Order) -> OrderRepositoryResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| OrderRepositoryError::persistence(std::io::Error::other(err.to_string())))?;
        if state.orders.contains_key(&order.id()) {
            return Err(OrderRepositoryError::DuplicateOrder(order.id()));
        }
        for task in order.tasks() {
            state.task_index.insert(task.id(), order.id());
        }
        state
            .orders
            .insert(order.id(), Arc::new(Mutex::new(order.clone())));
        Ok(())
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        let slot = match self.slot(id) {
            Ok(slot) => slot,
            Err(OrderRepositoryError::NotFound(_)) => return Ok(None),
            Err(err) => return Err(err),
        };
        let guard = slot
            .lock()
            .map_err(|err| OrderRepositoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(Some(guard.clone()))
    }

    async fn find_order_of_task(
        &self,
        task_id: ProductionTaskId,
    ) -> OrderRepositoryResult<Option<OrderId>> {
        let state = self
            .state
            .read()
            .map_err(|err| OrderRepositoryError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state.task_index.get(&task_id).copied())
    }

    async fn list_all(&self) -> OrderRepositoryResult<Vec<Order>> {
        let slots: Vec<Arc<Mutex<Order>>> = {
            let state = self.state.read().map_err(|err| {
                OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            state.orders.values().cloned().collect()
        };
        let mut orders = Vec::with_capacity(slots.len());
        for slot in slots {
            let guard = slot.lock().map_err(|err| {
                OrderRepositoryError::persistence(std::io::Error::other(err.to_string()))
            })?;
            orders.push(guard.clone());
        }
        orders.sort_by_key(Order::created_at);
        Ok(orders)
    }

    async fn update<T, F>(&self, id: OrderId, mutate: F) -> OrderRepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Order) -> Result<T, OrderDomainError> + Send + 'static,
    {
        let slot = self.slot(id)?;
        let mut guard = slot
            .lock()
            .map_err(|err| OrderRepositoryError::persistence(std::io::Error::other(err.to_string())))?;
        let mut draft = guard.clone();
        let outcome = mutate(&mut draft)?;
        *guard = draft;
        Ok(outcome)
    }
}
