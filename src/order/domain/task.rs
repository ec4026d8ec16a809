//! Production task entity.

use super::{ProductionTaskId, TaskStatus};
use serde::{Deserialize, Serialize};

/// A per-collaborator unit of fabrication work tied to one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionTask {
    id: ProductionTaskId,
    collaborator: String,
    item_description: String,
    status: TaskStatus,
}

impl ProductionTask {
    /// Creates a new task in the [`TaskStatus::NotStarted`] state.
    #[must_use]
    pub fn new(collaborator: impl Into<String>, item_description: impl Into<String>) -> Self {
        Self {
            id: ProductionTaskId::new(),
            collaborator: collaborator.into(),
            item_description: item_description.into(),
            status: TaskStatus::NotStarted,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: ProductionTaskId,
        collaborator: String,
        item_description: String,
        status: TaskStatus,
    ) -> Self {
        Self {
            id,
            collaborator,
            item_description,
            status,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> ProductionTaskId {
        self.id
    }

    /// Returns the assigned collaborator name.
    #[must_use]
    pub fn collaborator(&self) -> &str {
        &self.collaborator
    }

    /// Returns the fabricated item description.
    #[must_use]
    pub fn item_description(&self) -> &str {
        &self.item_description
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Sets the task status.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }
}
