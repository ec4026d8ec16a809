//! Production task statuses and the status-label vocabulary.

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a single production task.
///
/// `Done` is the only terminal value the readiness aggregator accepts; the
/// last three variants are exception statuses a task can sit in without
/// affecting readiness either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not begun.
    NotStarted,
    /// Fabrication has started.
    Started,
    /// Finishing touches in progress.
    Finishing,
    /// Fabrication complete.
    Done,
    /// Blocked on material delivery.
    AwaitingMaterials,
    /// A defect is being reworked.
    ReworkInProgress,
    /// Task suspended alongside the order.
    Standby,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Started => "started",
            Self::Finishing => "finishing",
            Self::Done => "done",
            Self::AwaitingMaterials => "awaiting_materials",
            Self::ReworkInProgress => "rework_in_progress",
            Self::Standby => "standby",
        }
    }

    /// Returns the human-readable status title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Started => "Started",
            Self::Finishing => "Finishing",
            Self::Done => "Done",
            Self::AwaitingMaterials => "Awaiting Materials",
            Self::ReworkInProgress => "Rework In Progress",
            Self::Standby => "Standby",
        }
    }

    /// Whether this is the terminal value the readiness check looks for.
    #[must_use]
    pub const fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "not_started" => Ok(Self::NotStarted),
            "started" => Ok(Self::Started),
            "finishing" => Ok(Self::Finishing),
            "done" => Ok(Self::Done),
            "awaiting_materials" => Ok(Self::AwaitingMaterials),
            "rework_in_progress" => Ok(Self::ReworkInProgress),
            "standby" => Ok(Self::Standby),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// The canonical order status-label vocabulary.
///
/// Status labels are free text from the engine's point of view; these
/// constants are the labels the transition table and the placement defaults
/// key on. Anything outside this vocabulary falls through to the permissive
/// default (label updated, no stage change).
pub mod labels {
    /// Default label for freshly created orders.
    pub const APPROVED: &str = "Approved";
    /// A site visit has been booked.
    pub const VISIT_SCHEDULED: &str = "Visit Scheduled";
    /// Send the order to the design desk.
    pub const DESIGN: &str = "Design";
    /// Alternate intake wording for the design destination.
    pub const PRODUCE: &str = "Produce";
    /// The order is on the fabrication floor.
    pub const IN_PRODUCTION: &str = "In Production";
    /// Site visit finished; hand over to design.
    pub const SEND_TO_PRODUCTION: &str = "Send to Production";
    /// Design sign-off for fabrication.
    pub const APPROVED_FOR_PRODUCTION: &str = "Approved for Production";
    /// An installation visit has been booked.
    pub const INSTALLATION_SCHEDULED: &str = "Installation Scheduled";
    /// Installation reported complete (phase-qualified via payload).
    pub const INSTALLED: &str = "Installed";
    /// Generic suspension request.
    pub const STANDBY: &str = "Standby";
    /// Resume a suspended order.
    pub const RELEASED: &str = "Released";
    /// A further site visit must be booked.
    pub const SCHEDULE_VISIT: &str = "Schedule Visit";
    /// Fabrication done; book installation or delivery.
    pub const SCHEDULE_INSTALLATION: &str = "Schedule Installation/Delivery";
    /// Placement default when an order is dragged onto the floor.
    pub const NOT_STARTED: &str = "Not Started";
    /// Suspension: work halted without a named cause.
    pub const STOPPED: &str = "Stopped";
    /// Suspension: waiting on the client.
    pub const AWAITING_CLIENT: &str = "Awaiting Client";
    /// Suspension: waiting on engineering.
    pub const AWAITING_ENGINEERING: &str = "Awaiting Engineering";
    /// Suspension: waiting on site conditions.
    pub const AWAITING_SITE: &str = "Awaiting Site";
}
