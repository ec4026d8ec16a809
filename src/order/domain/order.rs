//! Order aggregate root.

use super::{
    Attachment, OrderDomainError, OrderId, OrderNumber, ProductionTask, ProductionTaskId, Stage,
    TaskStatus, labels,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// The unit of work moving through the pipeline.
///
/// Invariants maintained by the mutators:
///
/// - `stage` is always set;
/// - `origin_before_standby` is `Some` only while `stage` is
///   [`Stage::Standby`], and is cleared exactly when the order leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    number: OrderNumber,
    client: String,
    stage: Stage,
    status_label: String,
    visit_date: Option<DateTime<Utc>>,
    visit_responsible: Option<String>,
    production_entry: Option<DateTime<Utc>>,
    production_deadline: Option<DateTime<Utc>>,
    ready_date: Option<DateTime<Utc>>,
    installation_date: Option<DateTime<Utc>>,
    installation_responsible: Option<String>,
    origin_before_standby: Option<Stage>,
    phase_one_items: Option<String>,
    phase_two_items: Option<String>,
    tasks: Vec<ProductionTask>,
    attachments: Vec<Attachment>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted order aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedOrderData {
    /// Persisted order identifier.
    pub id: OrderId,
    /// Persisted order number.
    pub number: OrderNumber,
    /// Persisted client name.
    pub client: String,
    /// Persisted pipeline stage.
    pub stage: Stage,
    /// Persisted status label.
    pub status_label: String,
    /// Persisted site-visit date.
    pub visit_date: Option<DateTime<Utc>>,
    /// Persisted site-visit responsible person.
    pub visit_responsible: Option<String>,
    /// Persisted production entry date.
    pub production_entry: Option<DateTime<Utc>>,
    /// Persisted production deadline.
    pub production_deadline: Option<DateTime<Utc>>,
    /// Persisted ready date.
    pub ready_date: Option<DateTime<Utc>>,
    /// Persisted installation date.
    pub installation_date: Option<DateTime<Utc>>,
    /// Persisted installation responsible person.
    pub installation_responsible: Option<String>,
    /// Persisted Standby return point.
    pub origin_before_standby: Option<Stage>,
    /// Persisted phase-1 item description.
    pub phase_one_items: Option<String>,
    /// Persisted phase-2 item description.
    pub phase_two_items: Option<String>,
    /// Persisted production tasks in creation order.
    pub tasks: Vec<ProductionTask>,
    /// Persisted attachments in creation order.
    pub attachments: Vec<Attachment>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new order in [`Stage::Intake`] with the "Approved" label.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::EmptyClientName`] when the client name is
    /// empty or whitespace-only.
    pub fn create(
        number: OrderNumber,
        client: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, OrderDomainError> {
        let client_name = client.into();
        let trimmed = client_name.trim();
        if trimmed.is_empty() {
            return Err(OrderDomainError::EmptyClientName);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: OrderId::new(),
            number,
            client: trimmed.to_owned(),
            stage: Stage::Intake,
            status_label: labels::APPROVED.to_owned(),
            visit_date: None,
            visit_responsible: None,
            production_entry: None,
            production_deadline: None,
            ready_date: None,
            installation_date: None,
            installation_responsible: None,
            origin_before_standby: None,
            phase_one_items: None,
            phase_two_items: None,
            tasks: Vec::new(),
            attachments: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs an order from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedOrderData) -> Self {
        Self {
            id: data.id,
            number: data.number,
            client: data.client,
            stage: data.stage,
            status_label: data.status_label,
            visit_date: data.visit_date,
            visit_responsible: data.visit_responsible,
            production_entry: data.production_entry,
            production_deadline: data.production_deadline,
            ready_date: data.ready_date,
            installation_date: data.installation_date,
            installation_responsible: data.installation_responsible,
            origin_before_standby: data.origin_before_standby,
            phase_one_items: data.phase_one_items,
            phase_two_items: data.phase_two_items,
            tasks: data.tasks,
            attachments: data.attachments,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the order identifier.
    #[must_use]
    pub const fn id(&self) -> OrderId {
        self.id
    }

    /// Returns the order number.
    #[must_use]
    pub const fn number(&self) -> &OrderNumber {
        &self.number
    }

    /// Returns the client name.
    #[must_use]
    pub fn client(&self) -> &str {
        &self.client
    }

    /// Returns the current pipeline stage.
    #[must_use]
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the current status label.
    #[must_use]
    pub fn status_label(&self) -> &str {
        &self.status_label
    }

    /// Returns the site-visit date, if stamped.
    #[must_use]
    pub const fn visit_date(&self) -> Option<DateTime<Utc>> {
        self.visit_date
    }

    /// Returns the site-visit responsible person, if stamped.
    #[must_use]
    pub fn visit_responsible(&self) -> Option<&str> {
        self.visit_responsible.as_deref()
    }

    /// Returns the production entry date, if stamped.
    #[must_use]
    pub const fn production_entry(&self) -> Option<DateTime<Utc>> {
        self.production_entry
    }

    /// Returns the production deadline, if stamped.
    #[must_use]
    pub const fn production_deadline(&self) -> Option<DateTime<Utc>> {
        self.production_deadline
    }

    /// Returns the ready date, if stamped.
    #[must_use]
    pub const fn ready_date(&self) -> Option<DateTime<Utc>> {
        self.ready_date
    }

    /// Returns the installation date, if stamped.
    #[must_use]
    pub const fn installation_date(&self) -> Option<DateTime<Utc>> {
        self.installation_date
    }

    /// Returns the installation responsible person, if stamped.
    #[must_use]
    pub fn installation_responsible(&self) -> Option<&str> {
        self.installation_responsible.as_deref()
    }

    /// Returns the stage the order will return to when released from
    /// Standby.
    #[must_use]
    pub const fn origin_before_standby(&self) -> Option<Stage> {
        self.origin_before_standby
    }

    /// Returns the phase-1 item description.
    #[must_use]
    pub fn phase_one_items(&self) -> Option<&str> {
        self.phase_one_items.as_deref()
    }

    /// Returns the phase-2 item description.
    #[must_use]
    pub fn phase_two_items(&self) -> Option<&str> {
        self.phase_two_items.as_deref()
    }

    /// Returns the production tasks in creation order.
    #[must_use]
    pub fn tasks(&self) -> &[ProductionTask] {
        &self.tasks
    }

    /// Returns the task with the given identifier, if it belongs to this
    /// order.
    #[must_use]
    pub fn task(&self, task_id: ProductionTaskId) -> Option<&ProductionTask> {
        self.tasks.iter().find(|task| task.id() == task_id)
    }

    /// Returns the attachments in creation order.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets the legacy phase item descriptions shown on the board card.
    pub fn set_phase_items(&mut self, phase_one: Option<String>, phase_two: Option<String>) {
        self.phase_one_items = phase_one;
        self.phase_two_items = phase_two;
    }

    /// Appends a production task.
    pub fn add_task(&mut self, task: ProductionTask) {
        self.tasks.push(task);
    }

    /// Appends an attachment reference.
    pub fn add_attachment(&mut self, attachment: Attachment, clock: &impl Clock) {
        self.attachments.push(attachment);
        self.touch(clock);
    }

    /// Replaces the status label without moving the order.
    pub fn set_status_label(&mut self, label: impl Into<String>, clock: &impl Clock) {
        self.status_label = label.into();
        self.touch(clock);
    }

    /// Moves the order to `target`, clearing the Standby return point when
    /// the order leaves Standby.
    pub fn relocate(&mut self, target: Stage, clock: &impl Clock) {
        if self.stage == Stage::Standby && target != Stage::Standby {
            self.origin_before_standby = None;
        }
        self.stage = target;
        self.touch(clock);
    }

    /// Parks the order in Standby under the given label, remembering the
    /// current stage as the return point unless one is already recorded.
    pub fn suspend(&mut self, label: impl Into<String>, clock: &impl Clock) {
        if self.stage != Stage::Standby {
            self.origin_before_standby.get_or_insert(self.stage);
            self.stage = Stage::Standby;
        }
        self.status_label = label.into();
        self.touch(clock);
    }

    /// Returns the order from Standby to its recorded origin stage, falling
    /// back to [`Stage::Intake`] when none was recorded. The return point is
    /// cleared.
    pub fn release(&mut self, clock: &impl Clock) -> Stage {
        let destination = self.origin_before_standby.take().unwrap_or(Stage::Intake);
        self.stage = destination;
        self.touch(clock);
        destination
    }

    /// Stamps the site-visit fields.
    pub fn schedule_visit(
        &mut self,
        date: Option<DateTime<Utc>>,
        responsible: Option<String>,
        clock: &impl Clock,
    ) {
        self.visit_date = date;
        self.visit_responsible = responsible;
        self.touch(clock);
    }

    /// Stamps the production dates, then resets every task to
    /// [`TaskStatus::NotStarted`].
    ///
    /// The reset runs after the stamps so a readiness check never reports
    /// done against statuses left over from a previous production run.
    pub fn enter_production(
        &mut self,
        entry: Option<DateTime<Utc>>,
        deadline: Option<DateTime<Utc>>,
        clock: &impl Clock,
    ) {
        self.production_entry = entry;
        self.production_deadline = deadline;
        self.reset_tasks();
        self.touch(clock);
    }

    /// Stamps the installation fields.
    pub fn schedule_installation(
        &mut self,
        date: Option<DateTime<Utc>>,
        responsible: Option<String>,
        clock: &impl Clock,
    ) {
        self.installation_date = date;
        self.installation_responsible = responsible;
        self.touch(clock);
    }

    /// Stamps the ready date to the current clock time.
    pub fn mark_ready(&mut self, clock: &impl Clock) {
        self.ready_date = Some(clock.utc());
        self.touch(clock);
    }

    /// Resets every production task to [`TaskStatus::NotStarted`].
    pub fn reset_tasks(&mut self) {
        for task in &mut self.tasks {
            task.set_status(TaskStatus::NotStarted);
        }
    }

    /// Sets the status of one production task.
    ///
    /// # Errors
    ///
    /// Returns [`OrderDomainError::UnknownTask`] when the task does not
    /// belong to this order.
    pub fn set_task_status(
        &mut self,
        task_id: ProductionTaskId,
        status: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), OrderDomainError> {
        let order_id = self.id;
        let task = self
            .tasks
            .iter_mut()
            .find(|task| task.id() == task_id)
            .ok_or(OrderDomainError::UnknownTask { order_id, task_id })?;
        task.set_status(status);
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
