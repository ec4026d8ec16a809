//! Domain model for notification selection.
//!
//! The router is a pure mapping from a committed transition summary to at
//! most one rendered message with a recipient set; delivery stays behind
//! the notifier port.

mod router;
mod transition;

pub use router::{
    NotificationError, NotificationRouter, OutboundMessage, RecipientGroups,
};
pub use transition::{CompletedTransition, TaskChange, TransitionTrigger};
