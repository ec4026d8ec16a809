//! Shared fixtures and helpers for order tests.

use crate::order::domain::{Order, OrderNumber, ProductionTask, Stage, TaskStatus};
use mockable::DefaultClock;
use rstest::fixture;

#[fixture]
pub fn clock() -> DefaultClock {
    DefaultClock
}

/// Builds an order in Intake with no tasks.
pub fn intake_order(clock: &DefaultClock) -> Order {
    let number = OrderNumber::new("ORC-1001").expect("order number should build");
    Order::create(number, "Dona Helena", clock).expect("test order should build")
}

/// Builds an order parked in the given stage with the creation label.
pub fn order_at(stage: Stage, clock: &DefaultClock) -> Order {
    let mut order = intake_order(clock);
    if stage != Stage::Intake {
        order.relocate(stage, clock);
    }
    order
}

/// Builds an order carrying three tasks in the given statuses.
pub fn order_with_tasks(statuses: &[TaskStatus], clock: &DefaultClock) -> Order {
    let mut order = intake_order(clock);
    for (index, status) in statuses.iter().enumerate() {
        let mut task = ProductionTask::new("Edison", format!("Item {index}"));
        task.set_status(*status);
        order.add_task(task);
    }
    order
}

/// The Standby origin invariant: recorded only while in Standby.
pub fn origin_invariant_holds(order: &Order) -> bool {
    order.stage() == Stage::Standby || order.origin_before_standby().is_none()
}
