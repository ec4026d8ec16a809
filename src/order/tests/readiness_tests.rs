//! Unit tests for the readiness aggregator and the Ready cascade.

use super::fixtures::{clock, intake_order, order_with_tasks};
use crate::order::domain::{
    Stage, TaskStatus, all_tasks_done, labels, ready_cascade,
};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn an_order_with_no_tasks_is_never_done(clock: DefaultClock) -> eyre::Result<()> {
    let order = intake_order(&clock);
    ensure!(!all_tasks_done(&order));
    Ok(())
}

#[rstest]
#[case(&[TaskStatus::Done, TaskStatus::Done, TaskStatus::Done], true)]
#[case(&[TaskStatus::Done, TaskStatus::Finishing, TaskStatus::Done], false)]
#[case(&[TaskStatus::NotStarted, TaskStatus::NotStarted, TaskStatus::NotStarted], false)]
#[case(&[TaskStatus::Done, TaskStatus::AwaitingMaterials, TaskStatus::Done], false)]
#[case(&[TaskStatus::Done, TaskStatus::Standby, TaskStatus::Done], false)]
fn readiness_requires_every_task_done(
    clock: DefaultClock,
    #[case] statuses: &[TaskStatus],
    #[case] expected: bool,
) -> eyre::Result<()> {
    let order = order_with_tasks(statuses, &clock);
    ensure!(all_tasks_done(&order) == expected);
    Ok(())
}

#[rstest]
fn cascade_moves_a_finished_order_to_ready(clock: DefaultClock) -> eyre::Result<()> {
    let mut order = order_with_tasks(&[TaskStatus::Done, TaskStatus::Done], &clock);
    order.relocate(Stage::Production, &clock);

    let moved = ready_cascade(&mut order, &clock);

    ensure!(moved);
    ensure!(order.stage() == Stage::Ready);
    ensure!(order.status_label() == labels::SCHEDULE_INSTALLATION);
    ensure!(order.ready_date().is_some());
    Ok(())
}

#[rstest]
fn cascade_is_idempotent_once_in_ready(clock: DefaultClock) -> eyre::Result<()> {
    let mut order = order_with_tasks(&[TaskStatus::Done], &clock);
    order.relocate(Stage::Production, &clock);
    ready_cascade(&mut order, &clock);
    let stamped = order.ready_date();

    let moved_again = ready_cascade(&mut order, &clock);

    ensure!(!moved_again);
    ensure!(order.stage() == Stage::Ready);
    ensure!(order.ready_date() == stamped);
    Ok(())
}

#[rstest]
fn cascade_does_nothing_while_tasks_remain(clock: DefaultClock) -> eyre::Result<()> {
    let mut order = order_with_tasks(&[TaskStatus::Done, TaskStatus::Started], &clock);
    order.relocate(Stage::Production, &clock);

    let moved = ready_cascade(&mut order, &clock);

    ensure!(!moved);
    ensure!(order.stage() == Stage::Production);
    ensure!(order.ready_date().is_none());
    Ok(())
}

#[rstest]
fn cascade_out_of_standby_clears_the_origin(clock: DefaultClock) -> eyre::Result<()> {
    let mut order = order_with_tasks(&[TaskStatus::Done], &clock);
    order.relocate(Stage::Production, &clock);
    order.suspend(labels::STOPPED, &clock);
    ensure!(order.origin_before_standby() == Some(Stage::Production));

    let moved = ready_cascade(&mut order, &clock);

    ensure!(moved);
    ensure!(order.stage() == Stage::Ready);
    ensure!(order.origin_before_standby().is_none());
    Ok(())
}
