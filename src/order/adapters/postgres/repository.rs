//! `PostgreSQL` repository implementation for order persistence.

use super::{
    models::{AttachmentRow, NewAttachmentRow, NewOrderRow, NewTaskRow, OrderRow, TaskRow},
    schema::{attachments, orders, production_tasks},
};
use crate::order::{
    domain::{
        Attachment, AttachmentId, Order, OrderDomainError, OrderId, OrderNumber,
        PersistedOrderData, ProductionTask, ProductionTaskId, Stage, TaskStatus,
    },
    ports::{OrderRepository, OrderRepositoryError, OrderRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

/// `PostgreSQL` connection pool type used by order adapters.
pub type OrderPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed order repository.
///
/// Every mutation runs inside a transaction; `update` additionally takes a
/// `FOR UPDATE` row lock on the order so concurrent mutations of the same
/// order serialize at the database while other orders stay unaffected.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: OrderPgPool,
}

impl PostgresOrderRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: OrderPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> OrderRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> OrderRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(OrderRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(OrderRepositoryError::persistence)?
    }
}

impl From<DieselError> for OrderRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn insert(&self, order: &Order) -> OrderRepositoryResult<()> {
        let order_id = order.id();
        let order_row = to_order_row(order);
        let task_rows = to_task_rows(order)?;
        let attachment_rows = to_attachment_rows(order)?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, OrderRepositoryError, _>(|conn| {
                let existing = orders::table
                    .filter(orders::id.eq(order_id.into_inner()))
                    .count()
                    .get_result::<i64>(conn)?;
                if existing > 0 {
                    return Err(OrderRepositoryError::DuplicateOrder(order_id));
                }

                diesel::insert_into(orders::table)
                    .values(&order_row)
                    .execute(conn)?;
                diesel::insert_into(production_tasks::table)
                    .values(&task_rows)
                    .execute(conn)?;
                diesel::insert_into(attachments::table)
                    .values(&attachment_rows)
                    .execute(conn)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: OrderId) -> OrderRepositoryResult<Option<Order>> {
        self.run_blocking(move |connection| {
            let row = orders::table
                .filter(orders::id.eq(id.into_inner()))
                .select(OrderRow::as_select())
                .first::<OrderRow>(connection)
                .optional()?;
            row.map(|order_row| load_aggregate(connection, order_row))
                .transpose()
        })
        .await
    }

    async fn find_order_of_task(
        &self,
        task_id: ProductionTaskId,
    ) -> OrderRepositoryResult<Option<OrderId>> {
        self.run_blocking(move |connection| {
            let owner = production_tasks::table
                .filter(production_tasks::id.eq(task_id.into_inner()))
                .select(production_tasks::order_id)
                .first::<uuid::Uuid>(connection)
                .optional()?;
            Ok(owner.map(OrderId::from_uuid))
        })
        .await
    }

    async fn list_all(&self) -> OrderRepositoryResult<Vec<Order>> {
        self.run_blocking(move |connection| {
            let rows = orders::table
                .order(orders::created_at.asc())
                .select(OrderRow::as_select())
                .load::<OrderRow>(connection)?;
            rows.into_iter()
                .map(|order_row| load_aggregate(connection, order_row))
                .collect()
        })
        .await
    }

    async fn update<T, F>(&self, id: OrderId, mutate: F) -> OrderRepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Order) -> Result<T, OrderDomainError> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            connection.transaction::<_, OrderRepositoryError, _>(|conn| {
                let row = orders::table
                    .filter(orders::id.eq(id.into_inner()))
                    .select(OrderRow::as_select())
                    .for_update()
                    .first::<OrderRow>(conn)
                    .optional()?
                    .ok_or(OrderRepositoryError::NotFound(id))?;

                let mut order = load_aggregate(conn, row)?;
                let outcome = mutate(&mut order)?;
                store_aggregate(conn, &order)?;
                Ok(outcome)
            })
        })
        .await
    }
}

fn load_aggregate(
    connection: &mut PgConnection,
    order_row: OrderRow,
) -> OrderRepositoryResult<Order> {
    let task_rows = production_tasks::table
        .filter(production_tasks::order_id.eq(order_row.id))
        .order(production_tasks::position.asc())
        .select(TaskRow::as_select())
        .load::<TaskRow>(connection)?;
    let attachment_rows = attachments::table
        .filter(attachments::order_id.eq(order_row.id))
        .order(attachments::position.asc())
        .select(AttachmentRow::as_select())
        .load::<AttachmentRow>(connection)?;
    rows_to_order(order_row, task_rows, attachment_rows)
}

fn store_aggregate(connection: &mut PgConnection, order: &Order) -> OrderRepositoryResult<()> {
    let order_row = to_order_row(order);
    let task_rows = to_task_rows(order)?;
    let attachment_rows = to_attachment_rows(order)?;
    let order_uuid = order.id().into_inner();

    diesel::update(orders::table.filter(orders::id.eq(order_uuid)))
        .set(&order_row)
        .execute(connection)?;

    // Children are replaced wholesale; identifiers are stable across the
    // round trip so references held by callers stay valid.
    diesel::delete(production_tasks::table.filter(production_tasks::order_id.eq(order_uuid)))
        .execute(connection)?;
    diesel::insert_into(production_tasks::table)
        .values(&task_rows)
        .execute(connection)?;
    diesel::delete(attachments::table.filter(attachments::order_id.eq(order_uuid)))
        .execute(connection)?;
    diesel::insert_into(attachments::table)
        .values(&attachment_rows)
        .execute(connection)?;
    Ok(())
}

fn to_order_row(order: &Order) -> NewOrderRow {
    NewOrderRow {
        id: order.id().into_inner(),
        number: order.number().as_str().to_owned(),
        client: order.client().to_owned(),
        stage: order.stage().as_str().to_owned(),
        status_label: order.status_label().to_owned(),
        visit_date: order.visit_date(),
        visit_responsible: order.visit_responsible().map(ToOwned::to_owned),
        production_entry: order.production_entry(),
        production_deadline: order.production_deadline(),
        ready_date: order.ready_date(),
        installation_date: order.installation_date(),
        installation_responsible: order.installation_responsible().map(ToOwned::to_owned),
        origin_before_standby: order
            .origin_before_standby()
            .map(|stage| stage.as_str().to_owned()),
        phase_one_items: order.phase_one_items().map(ToOwned::to_owned),
        phase_two_items: order.phase_two_items().map(ToOwned::to_owned),
        created_at: order.created_at(),
        updated_at: order.updated_at(),
    }
}

fn to_task_rows(order: &Order) -> OrderRepositoryResult<Vec<NewTaskRow>> {
    order
        .tasks()
        .iter()
        .enumerate()
        .map(|(index, task)| {
            Ok(NewTaskRow {
                id: task.id().into_inner(),
                order_id: order.id().into_inner(),
                collaborator: task.collaborator().to_owned(),
                item_description: task.item_description().to_owned(),
                status: task.status().as_str().to_owned(),
                position: position_of(index)?,
            })
        })
        .collect()
}

fn to_attachment_rows(order: &Order) -> OrderRepositoryResult<Vec<NewAttachmentRow>> {
    order
        .attachments()
        .iter()
        .enumerate()
        .map(|(index, attachment)| {
            Ok(NewAttachmentRow {
                id: attachment.id().into_inner(),
                order_id: order.id().into_inner(),
                file_name: attachment.file_name().to_owned(),
                location: attachment.location().to_owned(),
                position: position_of(index)?,
            })
        })
        .collect()
}

fn rows_to_order(
    order_row: OrderRow,
    task_rows: Vec<TaskRow>,
    attachment_rows: Vec<AttachmentRow>,
) -> OrderRepositoryResult<Order> {
    let stage =
        Stage::try_from(order_row.stage.as_str()).map_err(OrderRepositoryError::persistence)?;
    let origin_before_standby = order_row
        .origin_before_standby
        .as_deref()
        .map(Stage::try_from)
        .transpose()
        .map_err(OrderRepositoryError::persistence)?;
    let number = OrderNumber::new(order_row.number).map_err(OrderRepositoryError::persistence)?;

    let tasks = task_rows
        .into_iter()
        .map(|task_row| {
            let status = TaskStatus::try_from(task_row.status.as_str())
                .map_err(OrderRepositoryError::persistence)?;
            Ok(ProductionTask::from_persisted(
                ProductionTaskId::from_uuid(task_row.id),
                task_row.collaborator,
                task_row.item_description,
                status,
            ))
        })
        .collect::<OrderRepositoryResult<Vec<ProductionTask>>>()?;

    let attachment_entities = attachment_rows
        .into_iter()
        .map(|attachment_row| {
            Attachment::from_persisted(
                AttachmentId::from_uuid(attachment_row.id),
                attachment_row.file_name,
                attachment_row.location,
            )
        })
        .collect();

    let data = PersistedOrderData {
        id: OrderId::from_uuid(order_row.id),
        number,
        client: order_row.client,
        stage,
        status_label: order_row.status_label,
        visit_date: order_row.visit_date,
        visit_responsible: order_row.visit_responsible,
        production_entry: order_row.production_entry,
        production_deadline: order_row.production_deadline,
        ready_date: order_row.ready_date,
        installation_date: order_row.installation_date,
        installation_responsible: order_row.installation_responsible,
        origin_before_standby,
        phase_one_items: order_row.phase_one_items,
        phase_two_items: order_row.phase_two_items,
        tasks,
        attachments: attachment_entities,
        created_at: order_row.created_at,
        updated_at: order_row.updated_at,
    };
    Ok(Order::from_persisted(data))
}

fn position_of(index: usize) -> OrderRepositoryResult<i32> {
    i32::try_from(index).map_err(OrderRepositoryError::persistence)
}
