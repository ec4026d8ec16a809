//! Order workflow orchestration service.
//!
//! Every mutating operation follows the same shape: run the domain logic
//! inside the repository's atomic per-order update, and only after the
//! commit hand a transition summary to the notification router, dispatching
//! the selected message on a detached task. Dispatch failures are logged
//! and swallowed; they can never fail or roll back a committed transition.

use crate::files::ports::{FileStore, FileStoreError};
use crate::notify::domain::{
    CompletedTransition, NotificationRouter, TaskChange, TransitionTrigger,
};
use crate::notify::ports::Notifier;
use crate::order::{
    domain::{
        Attachment, CollaboratorResolver, CreationPath, Order, OrderDomainError, OrderId,
        OrderNumber, PIPELINE, ProductionTask, ProductionTaskId, Stage, TaskStatus,
        TransitionPayload, apply_status_request, place, ready_cascade,
    },
    ports::{OrderRepository, OrderRepositoryError},
};
use mockable::Clock;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Upper bound on a single notification dispatch attempt.
const DEFAULT_DISPATCH_DEADLINE: Duration = Duration::from_secs(10);

/// Service-level errors for workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The referenced order does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// The referenced production task does not exist.
    #[error("production task not found: {0}")]
    TaskNotFound(ProductionTaskId),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] OrderDomainError),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(OrderRepositoryError),

    /// Attachment storage failed.
    #[error(transparent)]
    FileStore(#[from] FileStoreError),
}

impl From<OrderRepositoryError> for WorkflowError {
    fn from(err: OrderRepositoryError) -> Self {
        match err {
            OrderRepositoryError::NotFound(id) => Self::OrderNotFound(id),
            OrderRepositoryError::Domain(domain) => Self::Domain(domain),
            other => Self::Repository(other),
        }
    }
}

/// Result type for workflow service operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Request payload for creating an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderRequest {
    number: String,
    client: String,
    path: CreationPath,
    phase_one_items: Option<String>,
    phase_two_items: Option<String>,
    items: Vec<String>,
}

impl NewOrderRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(number: impl Into<String>, client: impl Into<String>, path: CreationPath) -> Self {
        Self {
            number: number.into(),
            client: client.into(),
            path,
            phase_one_items: None,
            phase_two_items: None,
            items: Vec::new(),
        }
    }

    /// Sets the legacy phase-1 item description.
    #[must_use]
    pub fn with_phase_one_items(mut self, items: impl Into<String>) -> Self {
        self.phase_one_items = Some(items.into());
        self
    }

    /// Sets the legacy phase-2 item description.
    #[must_use]
    pub fn with_phase_two_items(mut self, items: impl Into<String>) -> Self {
        self.phase_two_items = Some(items.into());
        self
    }

    /// Sets the item descriptions that become production tasks.
    #[must_use]
    pub fn with_items(mut self, items: impl IntoIterator<Item = String>) -> Self {
        self.items = items.into_iter().collect();
        self
    }
}

/// Structured import document produced by the estimating tool.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportDocument {
    /// Human-assigned order number.
    pub order_number: String,
    /// Client name.
    pub client_name: String,
    /// Legacy phase-1 item description.
    #[serde(default)]
    pub phase_one_items: Option<String>,
    /// Legacy phase-2 item description.
    #[serde(default)]
    pub phase_two_items: Option<String>,
    /// Fabrication items, one production task each.
    #[serde(default)]
    pub production_tasks: Vec<ImportTaskItem>,
}

impl ImportDocument {
    /// Parses an import document from its JSON wire form.
    ///
    /// # Errors
    ///
    /// Returns the underlying deserialisation error when the document is
    /// malformed.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}

/// One fabrication item of an import document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportTaskItem {
    /// Fully-qualified item name.
    pub item: String,
}

/// One board column: a stage and its orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageColumn {
    /// The stage this column displays.
    pub stage: Stage,
    /// Orders currently in the stage, oldest first.
    pub orders: Vec<Order>,
}

/// Orchestrates the order lifecycle over the repository, notifier, and
/// file store ports.
#[derive(Clone)]
pub struct OrderWorkflowService<R, N, F, C>
where
    R: OrderRepository,
    N: Notifier + 'static,
    F: FileStore,
    C: Clock + Send + Sync + 'static,
{
    repository: Arc<R>,
    notifier: Arc<N>,
    router: Arc<NotificationRouter>,
    resolver: Arc<CollaboratorResolver>,
    file_store: Arc<F>,
    clock: Arc<C>,
    dispatch_deadline: Duration,
}

impl<R, N, F, C> OrderWorkflowService<R, N, F, C>
where
    R: OrderRepository,
    N: Notifier + 'static,
    F: FileStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new workflow service.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        notifier: Arc<N>,
        router: Arc<NotificationRouter>,
        resolver: Arc<CollaboratorResolver>,
        file_store: Arc<F>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            repository,
            notifier,
            router,
            resolver,
            file_store,
            clock,
            dispatch_deadline: DEFAULT_DISPATCH_DEADLINE,
        }
    }

    /// Overrides the per-dispatch deadline.
    #[must_use]
    pub const fn with_dispatch_deadline(mut self, deadline: Duration) -> Self {
        self.dispatch_deadline = deadline;
        self
    }

    /// Creates an order in Intake, resolving a collaborator per item.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when validation fails or the repository
    /// rejects persistence.
    pub async fn create_order(&self, request: NewOrderRequest) -> WorkflowResult<Order> {
        let number = OrderNumber::new(request.number)?;
        let mut order = Order::create(number, request.client, &*self.clock)?;
        order.set_phase_items(request.phase_one_items, request.phase_two_items);
        for item in request.items {
            let collaborator = self.resolver.resolve(&item, request.path).to_owned();
            order.add_task(ProductionTask::new(collaborator, item));
        }
        self.repository.insert(&order).await?;

        let transition = CompletedTransition::from_order(
            TransitionTrigger::Created,
            order.stage(),
            order.status_label(),
            &order,
        );
        self.dispatch(transition);
        Ok(order)
    }

    /// Creates an order from a structured import document.
    ///
    /// Items are resolved through the detailed collaborator table.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when validation fails or the repository
    /// rejects persistence.
    pub async fn create_from_import(&self, document: ImportDocument) -> WorkflowResult<Order> {
        let mut request = NewOrderRequest::new(
            document.order_number,
            document.client_name,
            CreationPath::StructuredImport,
        )
        .with_items(document.production_tasks.into_iter().map(|task| task.item));
        if let Some(items) = document.phase_one_items {
            request = request.with_phase_one_items(items);
        }
        if let Some(items) = document.phase_two_items {
            request = request.with_phase_two_items(items);
        }
        self.create_order(request).await
    }

    /// Applies a requested status change through the transition table.
    ///
    /// Unmapped (stage, status) pairs update the label without moving the
    /// order; this default-through is policy, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::OrderNotFound`] when the order does not
    /// exist, or a repository error when the commit fails (the transition
    /// is rolled back and no notification is sent).
    pub async fn update_status(
        &self,
        order_id: OrderId,
        requested: &str,
        payload: TransitionPayload,
    ) -> WorkflowResult<Order> {
        let clock = Arc::clone(&self.clock);
        let requested_label = requested.to_owned();
        let (from_stage, from_status, order) = self
            .repository
            .update(order_id, move |order| {
                let from_stage = order.stage();
                let from_status = order.status_label().to_owned();
                apply_status_request(order, &requested_label, &payload, &*clock);
                Ok((from_stage, from_status, order.clone()))
            })
            .await?;

        self.dispatch(CompletedTransition::from_order(
            TransitionTrigger::StatusRequest,
            from_stage,
            from_status,
            &order,
        ));
        Ok(order)
    }

    /// Updates one production task's status, then re-evaluates order
    /// readiness in the same commit.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when no order owns the task,
    /// or a repository error when the commit fails.
    pub async fn update_task_status(
        &self,
        task_id: ProductionTaskId,
        status: TaskStatus,
    ) -> WorkflowResult<Order> {
        let order_id = self
            .repository
            .find_order_of_task(task_id)
            .await?
            .ok_or(WorkflowError::TaskNotFound(task_id))?;

        let clock = Arc::clone(&self.clock);
        let (from_stage, from_status, change, order) = self
            .repository
            .update(order_id, move |order| {
                let from_stage = order.stage();
                let from_status = order.status_label().to_owned();
                order.set_task_status(task_id, status, &*clock)?;
                ready_cascade(order, &*clock);
                let change = order.task(task_id).map(|task| TaskChange {
                    collaborator: task.collaborator().to_owned(),
                    item_description: task.item_description().to_owned(),
                    status: task.status(),
                });
                Ok((from_stage, from_status, change, order.clone()))
            })
            .await?;

        let mut transition = CompletedTransition::from_order(
            TransitionTrigger::TaskUpdate,
            from_stage,
            from_status,
            &order,
        );
        if let Some(task_change) = change {
            transition = transition.with_task_change(task_change);
        }
        self.dispatch(transition);
        Ok(order)
    }

    /// Manually places the order into an arbitrary stage, applying that
    /// stage's default label and stamps.
    ///
    /// Placing an order into its current stage is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::OrderNotFound`] when the order does not
    /// exist, or a repository error when the commit fails.
    pub async fn move_order(
        &self,
        order_id: OrderId,
        target: Stage,
        payload: TransitionPayload,
    ) -> WorkflowResult<Order> {
        let clock = Arc::clone(&self.clock);
        let (from_stage, from_status, changed, order) = self
            .repository
            .update(order_id, move |order| {
                let from_stage = order.stage();
                let from_status = order.status_label().to_owned();
                let changed = place(order, target, &payload, &*clock);
                Ok((from_stage, from_status, changed, order.clone()))
            })
            .await?;

        if changed {
            self.dispatch(CompletedTransition::from_order(
                TransitionTrigger::ManualMove,
                from_stage,
                from_status,
                &order,
            ));
        }
        Ok(order)
    }

    /// Stores attachment bytes and records the reference on the order.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::FileStore`] when storage fails, or
    /// [`WorkflowError::OrderNotFound`] when the order does not exist.
    pub async fn attach_file(
        &self,
        order_id: OrderId,
        file_name: &str,
        bytes: &[u8],
    ) -> WorkflowResult<Order> {
        let stored = self.file_store.save(file_name, bytes).await?;
        let attachment = Attachment::new(stored.name(), stored.location());
        let clock = Arc::clone(&self.clock);
        let order = self
            .repository
            .update(order_id, move |order| {
                order.add_attachment(attachment, &*clock);
                Ok(order.clone())
            })
            .await?;
        Ok(order)
    }

    /// Returns the board: every stage in display order with its orders.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the listing fails.
    pub async fn board(&self) -> WorkflowResult<Vec<StageColumn>> {
        let all = self.repository.list_all().await?;
        Ok(PIPELINE
            .iter()
            .map(|stage| StageColumn {
                stage: *stage,
                orders: all
                    .iter()
                    .filter(|order| order.stage() == *stage)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    /// Retrieves an order snapshot by identifier.
    ///
    /// Returns `Ok(None)` when the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns a repository error when the lookup fails.
    pub async fn find_order(&self, order_id: OrderId) -> WorkflowResult<Option<Order>> {
        Ok(self.repository.find_by_id(order_id).await?)
    }

    /// Selects and dispatches the notification for a committed transition.
    ///
    /// Runs outside the repository critical section on a detached task with
    /// a bounded deadline. Failures are logged and swallowed.
    fn dispatch(&self, transition: CompletedTransition) {
        let selected = match self.router.select(&transition) {
            Ok(Some(message)) => message,
            Ok(None) => return,
            Err(err) => {
                tracing::warn!(error = %err, "notification selection failed");
                return;
            }
        };

        let notifier = Arc::clone(&self.notifier);
        let deadline = self.dispatch_deadline;
        tokio::spawn(async move {
            match tokio::time::timeout(
                deadline,
                notifier.send(&selected.body, &selected.recipients),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, "notification dispatch failed");
                }
                Err(_) => {
                    tracing::warn!("notification dispatch timed out");
                }
            }
        });
    }
}
