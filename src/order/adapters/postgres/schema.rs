//! Diesel schema for order persistence.

diesel::table! {
    /// Order records.
    orders (id) {
        /// Internal order identifier.
        id -> Uuid,
        /// Human-assigned order number.
        #[max_length = 50]
        number -> Varchar,
        /// Client name.
        #[max_length = 200]
        client -> Varchar,
        /// Current pipeline stage.
        #[max_length = 50]
        stage -> Varchar,
        /// Current status label.
        #[max_length = 100]
        status_label -> Varchar,
        /// Site-visit date.
        visit_date -> Nullable<Timestamptz>,
        /// Site-visit responsible person.
        #[max_length = 100]
        visit_responsible -> Nullable<Varchar>,
        /// Production entry date.
        production_entry -> Nullable<Timestamptz>,
        /// Production deadline.
        production_deadline -> Nullable<Timestamptz>,
        /// Ready date.
        ready_date -> Nullable<Timestamptz>,
        /// Installation date.
        installation_date -> Nullable<Timestamptz>,
        /// Installation responsible person.
        #[max_length = 100]
        installation_responsible -> Nullable<Varchar>,
        /// Stage to return to when released from Standby.
        #[max_length = 50]
        origin_before_standby -> Nullable<Varchar>,
        /// Legacy phase-1 item description.
        phase_one_items -> Nullable<Text>,
        /// Legacy phase-2 item description.
        phase_two_items -> Nullable<Text>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Production task records; cascade-deleted with their order.
    production_tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning order.
        order_id -> Uuid,
        /// Assigned collaborator name.
        #[max_length = 100]
        collaborator -> Varchar,
        /// Fabricated item description.
        item_description -> Text,
        /// Task status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation-order position within the order.
        position -> Int4,
    }
}

diesel::table! {
    /// Attachment records; cascade-deleted with their order.
    attachments (id) {
        /// Internal attachment identifier.
        id -> Uuid,
        /// Owning order.
        order_id -> Uuid,
        /// Display file name.
        #[max_length = 300]
        file_name -> Varchar,
        /// Opaque stored location.
        #[max_length = 500]
        location -> Varchar,
        /// Creation-order position within the order.
        position -> Int4,
    }
}

diesel::joinable!(production_tasks -> orders (order_id));
diesel::joinable!(attachments -> orders (order_id));
diesel::allow_tables_to_appear_in_same_query!(orders, production_tasks, attachments);
