//! Trigger-based notification selection and message rendering.

use super::{CompletedTransition, TransitionTrigger};
use crate::order::domain::{Stage, TaskStatus, labels};
use minijinja::{Environment, context};
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors raised while selecting or rendering a notification.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Template rendering failed.
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// A rendered outbound message with its recipient set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Rendered message body.
    pub body: String,
    /// Destination addresses.
    pub recipients: BTreeSet<String>,
}

/// Recipient groups a trigger can address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientGroups {
    /// Front office and coordination.
    pub office: BTreeSet<String>,
    /// Fabrication floor supervision.
    pub production: BTreeSet<String>,
    /// Visit and installation crews.
    pub field: BTreeSet<String>,
}

impl RecipientGroups {
    /// Returns the workshop's production recipient groups.
    #[must_use]
    pub fn workshop_defaults() -> Self {
        Self {
            office: addresses(&["frontdesk@oficina.example", "coordination@oficina.example"]),
            production: addresses(&["floor@oficina.example"]),
            field: addresses(&["installers@oficina.example"]),
        }
    }
}

fn addresses(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

const NEW_ORDER: &str = "New order {{ number }} for {{ client }} entered Intake.";
const TASK_MILESTONE: &str =
    "Order {{ number }}: {{ collaborator }} reported \"{{ item }}\" as {{ status }}.";
const VISIT_SCHEDULED: &str = "Order {{ number }} ({{ client }}): site visit scheduled\
{% if date %} for {{ date }}{% endif %}{% if responsible %} with {{ responsible }}{% endif %}.";
const INSTALLATION_SCHEDULED: &str = "Order {{ number }} ({{ client }}): installation scheduled\
{% if date %} for {{ date }}{% endif %}{% if responsible %} with {{ responsible }}{% endif %}.";
const INSTALLED: &str = "Order {{ number }} ({{ client }}) has been installed.";
const STANDBY_ENTERED: &str = "Order {{ number }} placed in Standby: {{ status }}.";
const STANDBY_RELEASED: &str = "Order {{ number }} released from Standby back to {{ stage }}.";

/// Selects and renders the outbound message for a committed transition.
///
/// Selection is trigger-based, not exhaustive: only the combinations below
/// produce a message, everything else yields `None`. The router is pure;
/// delivery belongs to the notifier port.
#[derive(Debug)]
pub struct NotificationRouter {
    environment: Environment<'static>,
    groups: RecipientGroups,
}

impl NotificationRouter {
    /// Creates a router over the given recipient groups.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when a message template fails
    /// to parse.
    pub fn new(groups: RecipientGroups) -> Result<Self, NotificationError> {
        let mut environment = Environment::new();
        environment.add_template("new_order", NEW_ORDER)?;
        environment.add_template("task_milestone", TASK_MILESTONE)?;
        environment.add_template("visit_scheduled", VISIT_SCHEDULED)?;
        environment.add_template("installation_scheduled", INSTALLATION_SCHEDULED)?;
        environment.add_template("installed", INSTALLED)?;
        environment.add_template("standby_entered", STANDBY_ENTERED)?;
        environment.add_template("standby_released", STANDBY_RELEASED)?;
        Ok(Self {
            environment,
            groups,
        })
    }

    /// Creates a router over the workshop's default recipient groups.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when a message template fails
    /// to parse.
    pub fn with_workshop_defaults() -> Result<Self, NotificationError> {
        Self::new(RecipientGroups::workshop_defaults())
    }

    /// Maps a committed transition to at most one outbound message.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Template`] when rendering fails.
    pub fn select(
        &self,
        transition: &CompletedTransition,
    ) -> Result<Option<OutboundMessage>, NotificationError> {
        if transition.trigger == TransitionTrigger::Created {
            let body = self.environment.get_template("new_order")?.render(context! {
                number => transition.order_number.as_str(),
                client => transition.client.as_str(),
            })?;
            return Ok(Some(OutboundMessage {
                body,
                recipients: union(&self.groups.office, &self.groups.production),
            }));
        }

        if let Some(change) = &transition.task_change {
            if !matches!(
                change.status,
                TaskStatus::Started | TaskStatus::Finishing | TaskStatus::Done
            ) {
                return Ok(None);
            }
            let body = self
                .environment
                .get_template("task_milestone")?
                .render(context! {
                    number => transition.order_number.as_str(),
                    collaborator => change.collaborator.as_str(),
                    item => change.item_description.as_str(),
                    status => change.status.title(),
                })?;
            return Ok(Some(OutboundMessage {
                body,
                recipients: union(&self.groups.office, &self.groups.production),
            }));
        }

        self.select_for_status_change(transition)
    }

    fn select_for_status_change(
        &self,
        transition: &CompletedTransition,
    ) -> Result<Option<OutboundMessage>, NotificationError> {
        let status_changed = transition.from_status != transition.to_status;
        if status_changed && transition.to_status == labels::VISIT_SCHEDULED {
            let body = self
                .environment
                .get_template("visit_scheduled")?
                .render(context! {
                    number => transition.order_number.as_str(),
                    client => transition.client.as_str(),
                    date => transition.visit_date.as_deref(),
                    responsible => transition.visit_responsible.as_deref(),
                })?;
            return Ok(Some(OutboundMessage {
                body,
                recipients: union(&self.groups.office, &self.groups.field),
            }));
        }
        if status_changed && transition.to_status == labels::INSTALLATION_SCHEDULED {
            let body = self
                .environment
                .get_template("installation_scheduled")?
                .render(context! {
                    number => transition.order_number.as_str(),
                    client => transition.client.as_str(),
                    date => transition.installation_date.as_deref(),
                    responsible => transition.installation_responsible.as_deref(),
                })?;
            return Ok(Some(OutboundMessage {
                body,
                recipients: union(&self.groups.office, &self.groups.field),
            }));
        }
        if transition.to_stage == Stage::Installed && transition.from_stage != Stage::Installed {
            let body = self.environment.get_template("installed")?.render(context! {
                number => transition.order_number.as_str(),
                client => transition.client.as_str(),
            })?;
            return Ok(Some(OutboundMessage {
                body,
                recipients: self.groups.office.clone(),
            }));
        }
        if transition.to_stage == Stage::Standby && transition.from_stage != Stage::Standby {
            let body = self
                .environment
                .get_template("standby_entered")?
                .render(context! {
                    number => transition.order_number.as_str(),
                    status => transition.to_status.as_str(),
                })?;
            return Ok(Some(OutboundMessage {
                body,
                recipients: union(&self.groups.office, &self.groups.production),
            }));
        }
        if transition.from_stage == Stage::Standby && transition.to_stage != Stage::Standby {
            let body = self
                .environment
                .get_template("standby_released")?
                .render(context! {
                    number => transition.order_number.as_str(),
                    stage => transition.to_stage.title(),
                })?;
            return Ok(Some(OutboundMessage {
                body,
                recipients: union(&self.groups.office, &self.groups.production),
            }));
        }
        Ok(None)
    }
}

fn union(left: &BTreeSet<String>, right: &BTreeSet<String>) -> BTreeSet<String> {
    left.union(right).cloned().collect()
}
