//! Readiness aggregation over an order's production tasks.
//!
//! Task completion is a secondary transition trigger, deliberately kept out
//! of the stage transition table: it is re-evaluated after every committed
//! task mutation, not only the one that happens to finish the last task.

use super::{Order, Stage, labels};
use mockable::Clock;

/// Whether every production task on the order has reached the terminal
/// done status.
///
/// An order with no tasks is never considered done by this path.
#[must_use]
pub fn all_tasks_done(order: &Order) -> bool {
    !order.tasks().is_empty() && order.tasks().iter().all(|task| task.status().is_done())
}

/// Moves the order to [`Stage::Ready`] when every task is done.
///
/// Stamps the ready date to the current clock time and forces the
/// "Schedule Installation/Delivery" label. Idempotent: an order already in
/// Ready is left untouched, so re-running after a repeated terminal task
/// update never stamps a second ready date. Returns whether a move
/// happened.
pub fn ready_cascade(order: &mut Order, clock: &impl Clock) -> bool {
    if order.stage() == Stage::Ready || !all_tasks_done(order) {
        return false;
    }
    order.relocate(Stage::Ready, clock);
    order.mark_ready(clock);
    order.set_status_label(labels::SCHEDULE_INSTALLATION, clock);
    true
}
