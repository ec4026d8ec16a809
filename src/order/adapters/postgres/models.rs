//! Diesel row models for order persistence.

use super::schema::{attachments, orders, production_tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for order records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    /// Internal order identifier.
    pub id: uuid::Uuid,
    /// Human-assigned order number.
    pub number: String,
    /// Client name.
    pub client: String,
    /// Current pipeline stage.
    pub stage: String,
    /// Current status label.
    pub status_label: String,
    /// Site-visit date.
    pub visit_date: Option<DateTime<Utc>>,
    /// Site-visit responsible person.
    pub visit_responsible: Option<String>,
    /// Production entry date.
    pub production_entry: Option<DateTime<Utc>>,
    /// Production deadline.
    pub production_deadline: Option<DateTime<Utc>>,
    /// Ready date.
    pub ready_date: Option<DateTime<Utc>>,
    /// Installation date.
    pub installation_date: Option<DateTime<Utc>>,
    /// Installation responsible person.
    pub installation_responsible: Option<String>,
    /// Stage to return to when released from Standby.
    pub origin_before_standby: Option<String>,
    /// Legacy phase-1 item description.
    pub phase_one_items: Option<String>,
    /// Legacy phase-2 item description.
    pub phase_two_items: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert and update model for order records.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = orders)]
#[diesel(treat_none_as_null = true)]
pub struct NewOrderRow {
    /// Internal order identifier.
    pub id: uuid::Uuid,
    /// Human-assigned order number.
    pub number: String,
    /// Client name.
    pub client: String,
    /// Current pipeline stage.
    pub stage: String,
    /// Current status label.
    pub status_label: String,
    /// Site-visit date.
    pub visit_date: Option<DateTime<Utc>>,
    /// Site-visit responsible person.
    pub visit_responsible: Option<String>,
    /// Production entry date.
    pub production_entry: Option<DateTime<Utc>>,
    /// Production deadline.
    pub production_deadline: Option<DateTime<Utc>>,
    /// Ready date.
    pub ready_date: Option<DateTime<Utc>>,
    /// Installation date.
    pub installation_date: Option<DateTime<Utc>>,
    /// Installation responsible person.
    pub installation_responsible: Option<String>,
    /// Stage to return to when released from Standby.
    pub origin_before_standby: Option<String>,
    /// Legacy phase-1 item description.
    pub phase_one_items: Option<String>,
    /// Legacy phase-2 item description.
    pub phase_two_items: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for production task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = production_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning order.
    pub order_id: uuid::Uuid,
    /// Assigned collaborator name.
    pub collaborator: String,
    /// Fabricated item description.
    pub item_description: String,
    /// Task status.
    pub status: String,
    /// Creation-order position within the order.
    pub position: i32,
}

/// Insert model for production task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = production_tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning order.
    pub order_id: uuid::Uuid,
    /// Assigned collaborator name.
    pub collaborator: String,
    /// Fabricated item description.
    pub item_description: String,
    /// Task status.
    pub status: String,
    /// Creation-order position within the order.
    pub position: i32,
}

/// Query result row for attachment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attachments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttachmentRow {
    /// Internal attachment identifier.
    pub id: uuid::Uuid,
    /// Owning order.
    pub order_id: uuid::Uuid,
    /// Display file name.
    pub file_name: String,
    /// Opaque stored location.
    pub location: String,
    /// Creation-order position within the order.
    pub position: i32,
}

/// Insert model for attachment records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attachments)]
pub struct NewAttachmentRow {
    /// Internal attachment identifier.
    pub id: uuid::Uuid,
    /// Owning order.
    pub order_id: uuid::Uuid,
    /// Display file name.
    pub file_name: String,
    /// Opaque stored location.
    pub location: String,
    /// Creation-order position within the order.
    pub position: i32,
}
