//! Snapshot of a committed transition, as seen by notification selection.

use crate::order::domain::{Order, Stage, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Which operation produced the transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionTrigger {
    /// A new order was created.
    Created,
    /// An operator requested a status change.
    StatusRequest,
    /// An operator manually moved the order.
    ManualMove,
    /// A production task status was updated.
    TaskUpdate,
}

/// A production task mutation carried alongside the transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskChange {
    /// Assigned collaborator name.
    pub collaborator: String,
    /// Fabricated item description.
    pub item_description: String,
    /// The status the task was set to.
    pub status: TaskStatus,
}

/// A durably committed transition, summarised for notification selection.
///
/// Built from the order snapshot *after* the commit; selection never sees a
/// state that could still be rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletedTransition {
    /// Which operation produced the transition.
    pub trigger: TransitionTrigger,
    /// Human-assigned order number.
    pub order_number: String,
    /// Client name.
    pub client: String,
    /// Stage before the transition.
    pub from_stage: Stage,
    /// Stage after the transition.
    pub to_stage: Stage,
    /// Status label before the transition.
    pub from_status: String,
    /// Status label after the transition.
    pub to_status: String,
    /// Formatted site-visit date, when stamped.
    pub visit_date: Option<String>,
    /// Site-visit responsible person, when stamped.
    pub visit_responsible: Option<String>,
    /// Formatted installation date, when stamped.
    pub installation_date: Option<String>,
    /// Installation responsible person, when stamped.
    pub installation_responsible: Option<String>,
    /// Task mutation carried by task-update transitions.
    pub task_change: Option<TaskChange>,
}

impl CompletedTransition {
    /// Summarises a committed transition from the pre-transition stage and
    /// status plus the committed order snapshot.
    #[must_use]
    pub fn from_order(
        trigger: TransitionTrigger,
        from_stage: Stage,
        from_status: impl Into<String>,
        order: &Order,
    ) -> Self {
        Self {
            trigger,
            order_number: order.number().as_str().to_owned(),
            client: order.client().to_owned(),
            from_stage,
            to_stage: order.stage(),
            from_status: from_status.into(),
            to_status: order.status_label().to_owned(),
            visit_date: order.visit_date().map(format_stamp),
            visit_responsible: order.visit_responsible().map(ToOwned::to_owned),
            installation_date: order.installation_date().map(format_stamp),
            installation_responsible: order.installation_responsible().map(ToOwned::to_owned),
            task_change: None,
        }
    }

    /// Attaches the task mutation that produced the transition.
    #[must_use]
    pub fn with_task_change(mut self, change: TaskChange) -> Self {
        self.task_change = Some(change);
        self
    }
}

fn format_stamp(stamp: DateTime<Utc>) -> String {
    stamp.format("%Y-%m-%d %H:%M").to_string()
}
