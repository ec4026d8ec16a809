//! Unit tests for notification selection and rendering.

use crate::notify::domain::{
    CompletedTransition, NotificationRouter, TaskChange, TransitionTrigger,
};
use crate::order::domain::{
    Order, OrderNumber, Stage, TaskStatus, TransitionPayload, apply_status_request, labels,
};
use eyre::{bail, ensure};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn router() -> NotificationRouter {
    NotificationRouter::with_workshop_defaults().expect("notification templates should parse")
}

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn order_numbered(number: &str, clock: &DefaultClock) -> Order {
    let number = OrderNumber::new(number).expect("order number should build");
    Order::create(number, "Dona Helena", clock).expect("test order should build")
}

fn transition_after(
    trigger: TransitionTrigger,
    requested: &str,
    payload: &TransitionPayload,
    clock: &DefaultClock,
) -> CompletedTransition {
    let mut order = order_numbered("ORC-5001", clock);
    let from_stage = order.stage();
    let from_status = order.status_label().to_owned();
    apply_status_request(&mut order, requested, payload, clock);
    CompletedTransition::from_order(trigger, from_stage, from_status, &order)
}

#[rstest]
fn a_new_order_notifies_office_and_production(
    router: NotificationRouter,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let order = order_numbered("ORC-5001", &clock);
    let transition = CompletedTransition::from_order(
        TransitionTrigger::Created,
        order.stage(),
        order.status_label(),
        &order,
    );

    let Some(message) = router.select(&transition)? else {
        bail!("expected a new-order message");
    };
    ensure!(message.body.contains("ORC-5001"));
    ensure!(message.body.contains("Dona Helena"));
    ensure!(message.recipients.contains("frontdesk@oficina.example"));
    ensure!(message.recipients.contains("floor@oficina.example"));
    Ok(())
}

#[rstest]
fn a_scheduled_visit_reaches_the_field_crew(
    router: NotificationRouter,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let payload = TransitionPayload::new()
        .with_visit_date("2024-03-01T10:00")
        .with_visit_responsible("Ana");
    let transition = transition_after(
        TransitionTrigger::StatusRequest,
        labels::VISIT_SCHEDULED,
        &payload,
        &clock,
    );

    let Some(message) = router.select(&transition)? else {
        bail!("expected a visit-scheduled message");
    };
    ensure!(message.body.contains("site visit scheduled"));
    ensure!(message.body.contains("2024-03-01 10:00"));
    ensure!(message.body.contains("Ana"));
    ensure!(message.recipients.contains("installers@oficina.example"));
    Ok(())
}

#[rstest]
fn a_visit_without_stamps_still_reads_cleanly(
    router: NotificationRouter,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let transition = transition_after(
        TransitionTrigger::StatusRequest,
        labels::VISIT_SCHEDULED,
        &TransitionPayload::new(),
        &clock,
    );

    let Some(message) = router.select(&transition)? else {
        bail!("expected a visit-scheduled message");
    };
    ensure!(message.body.ends_with("site visit scheduled."));
    Ok(())
}

#[rstest]
fn entering_standby_produces_a_notice(
    router: NotificationRouter,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let transition = transition_after(
        TransitionTrigger::StatusRequest,
        labels::AWAITING_CLIENT,
        &TransitionPayload::new(),
        &clock,
    );

    let Some(message) = router.select(&transition)? else {
        bail!("expected a standby notice");
    };
    ensure!(message.body.contains("Standby"));
    ensure!(message.body.contains(labels::AWAITING_CLIENT));
    Ok(())
}

#[rstest]
fn leaving_standby_produces_a_notice(
    router: NotificationRouter,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut order = order_numbered("ORC-5001", &clock);
    apply_status_request(&mut order, labels::STOPPED, &TransitionPayload::new(), &clock);
    let from_status = order.status_label().to_owned();
    apply_status_request(
        &mut order,
        labels::RELEASED,
        &TransitionPayload::new(),
        &clock,
    );
    let transition = CompletedTransition::from_order(
        TransitionTrigger::StatusRequest,
        Stage::Standby,
        from_status,
        &order,
    );

    let Some(message) = router.select(&transition)? else {
        bail!("expected a release notice");
    };
    ensure!(message.body.contains("released from Standby"));
    ensure!(message.body.contains("Intake"));
    Ok(())
}

#[rstest]
fn full_installation_notifies_the_office(
    router: NotificationRouter,
    clock: DefaultClock,
) -> eyre::Result<()> {
    let mut order = order_numbered("ORC-5001", &clock);
    order.relocate(Stage::Ready, &clock);
    let from_status = order.status_label().to_owned();
    let payload = TransitionPayload::new().with_installed_phase("Stage 2");
    apply_status_request(&mut order, labels::INSTALLED, &payload, &clock);
    let transition = CompletedTransition::from_order(
        TransitionTrigger::StatusRequest,
        Stage::Ready,
        from_status,
        &order,
    );

    let Some(message) = router.select(&transition)? else {
        bail!("expected an installation notice");
    };
    ensure!(message.body.contains("has been installed"));
    ensure!(message.recipients.contains("frontdesk@oficina.example"));
    Ok(())
}

#[rstest]
#[case(TaskStatus::Started, true)]
#[case(TaskStatus::Finishing, true)]
#[case(TaskStatus::Done, true)]
#[case(TaskStatus::NotStarted, false)]
#[case(TaskStatus::AwaitingMaterials, false)]
#[case(TaskStatus::ReworkInProgress, false)]
fn task_milestones_are_selective(
    router: NotificationRouter,
    clock: DefaultClock,
    #[case] status: TaskStatus,
    #[case] expected: bool,
) -> eyre::Result<()> {
    let order = order_numbered("ORC-5001", &clock);
    let transition = CompletedTransition::from_order(
        TransitionTrigger::TaskUpdate,
        order.stage(),
        order.status_label(),
        &order,
    )
    .with_task_change(TaskChange {
        collaborator: "Edison".to_owned(),
        item_description: "Kitchen cabinetry in white MDF".to_owned(),
        status,
    });

    let selected = router.select(&transition)?;
    ensure!(selected.is_some() == expected);
    if let Some(message) = selected {
        ensure!(message.body.contains("Edison"));
        ensure!(message.body.contains("Kitchen cabinetry in white MDF"));
        ensure!(message.body.contains(status.title()));
    }
    Ok(())
}

#[rstest]
fn unlisted_combinations_stay_silent(
    router: NotificationRouter,
    clock: DefaultClock,
) -> eyre::Result<()> {
    // Design sign-off moves the order but matches no trigger.
    let mut order = order_numbered("ORC-5001", &clock);
    order.relocate(Stage::Design, &clock);
    let from_status = order.status_label().to_owned();
    apply_status_request(
        &mut order,
        labels::APPROVED_FOR_PRODUCTION,
        &TransitionPayload::new(),
        &clock,
    );
    let transition = CompletedTransition::from_order(
        TransitionTrigger::StatusRequest,
        Stage::Design,
        from_status,
        &order,
    );
    ensure!(router.select(&transition)?.is_none());

    // Re-asserting the same status is not a fresh trigger.
    let unchanged = CompletedTransition::from_order(
        TransitionTrigger::StatusRequest,
        Stage::SiteVisit,
        labels::VISIT_SCHEDULED,
        &{
            let mut repeat = order_numbered("ORC-5002", &clock);
            repeat.relocate(Stage::SiteVisit, &clock);
            repeat.set_status_label(labels::VISIT_SCHEDULED, &clock);
            repeat
        },
    );
    ensure!(router.select(&unchanged)?.is_none());
    Ok(())
}
