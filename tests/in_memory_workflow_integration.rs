//! Behavioural integration tests for the workflow service over the
//! in-memory adapters.
//!
//! These tests walk complete order lifecycles the way the board is used in
//! production: intake, visit, design sign-off, fabrication, readiness,
//! installation, plus the Standby detour and attachment handling.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use niemeyer::files::adapters::InMemoryFileStore;
use niemeyer::notify::adapters::RecordingNotifier;
use niemeyer::notify::domain::NotificationRouter;
use niemeyer::order::adapters::memory::InMemoryOrderRepository;
use niemeyer::order::domain::{
    CollaboratorResolver, CreationPath, Stage, TaskStatus, TransitionPayload, labels,
};
use niemeyer::order::services::{NewOrderRequest, OrderWorkflowService};
use mockable::DefaultClock;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

type Workflow = OrderWorkflowService<
    InMemoryOrderRepository,
    RecordingNotifier,
    InMemoryFileStore,
    DefaultClock,
>;

/// Creates a tokio runtime for async operations in tests.
fn test_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to create test runtime")
}

fn workflow() -> (Workflow, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let router =
        NotificationRouter::with_workshop_defaults().expect("notification templates should parse");
    let service = OrderWorkflowService::new(
        Arc::new(InMemoryOrderRepository::new()),
        Arc::new(notifier.clone()),
        Arc::new(router),
        Arc::new(CollaboratorResolver::workshop_defaults()),
        Arc::new(InMemoryFileStore::new()),
        Arc::new(DefaultClock),
    );
    (service, notifier)
}

/// Walks an order from intake to full installation, checking the stage,
/// label, and stamps at every step.
#[test]
fn complete_lifecycle_from_intake_to_installed() {
    let rt = test_runtime();
    let (service, notifier) = workflow();

    let order = rt
        .block_on(
            service.create_order(
                NewOrderRequest::new("ORC-7001", "Construtora Andrade", CreationPath::ManualEntry)
                    .with_items(["Cabinetry".to_owned(), "Metalwork".to_owned()]),
            ),
        )
        .expect("create order");
    assert_eq!(order.stage(), Stage::Intake);
    assert_eq!(order.status_label(), labels::APPROVED);

    // Book the measurement visit.
    let payload = TransitionPayload::new()
        .with_visit_date("2024-03-01T10:00")
        .with_visit_responsible("Ana");
    let visited = rt
        .block_on(service.update_status(order.id(), labels::VISIT_SCHEDULED, payload))
        .expect("schedule visit");
    assert_eq!(visited.stage(), Stage::SiteVisit);
    assert_eq!(visited.visit_responsible(), Some("Ana"));

    // Hand over to design, then sign off for fabrication.
    let designed = rt
        .block_on(service.update_status(
            order.id(),
            labels::SEND_TO_PRODUCTION,
            TransitionPayload::new(),
        ))
        .expect("send to design");
    assert_eq!(designed.stage(), Stage::Design);

    let fabricating = rt
        .block_on(
            service.update_status(
                order.id(),
                labels::APPROVED_FOR_PRODUCTION,
                TransitionPayload::new()
                    .with_production_entry("2024-04-02")
                    .with_production_deadline("2024-04-30"),
            ),
        )
        .expect("approve for production");
    assert_eq!(fabricating.stage(), Stage::Production);
    assert!(fabricating.production_entry().is_some());
    assert!(fabricating.production_deadline().is_some());
    assert!(
        fabricating
            .tasks()
            .iter()
            .all(|task| task.status() == TaskStatus::NotStarted)
    );

    // Finish every task; the last completion promotes the order.
    for task in fabricating.tasks() {
        rt.block_on(service.update_task_status(task.id(), TaskStatus::Started))
            .expect("start task");
    }
    let mut latest = fabricating.clone();
    for task in fabricating.tasks() {
        latest = rt
            .block_on(service.update_task_status(task.id(), TaskStatus::Done))
            .expect("finish task");
    }
    assert_eq!(latest.stage(), Stage::Ready);
    assert_eq!(latest.status_label(), labels::SCHEDULE_INSTALLATION);
    assert!(latest.ready_date().is_some());

    // Book and run the two-phase installation.
    let scheduled = rt
        .block_on(
            service.update_status(
                order.id(),
                labels::INSTALLATION_SCHEDULED,
                TransitionPayload::new()
                    .with_installation_date("2024-05-10 08:30")
                    .with_installation_responsible("Anderson"),
            ),
        )
        .expect("schedule installation");
    assert_eq!(scheduled.stage(), Stage::Ready);
    assert_eq!(scheduled.installation_responsible(), Some("Anderson"));

    let first_phase = rt
        .block_on(service.update_status(
            order.id(),
            labels::INSTALLED,
            TransitionPayload::new().with_installed_phase("Stage 1"),
        ))
        .expect("first installation phase");
    assert_eq!(first_phase.stage(), Stage::SiteVisit);
    assert_eq!(first_phase.status_label(), labels::SCHEDULE_VISIT);

    let second_phase = rt
        .block_on(service.update_status(
            order.id(),
            labels::INSTALLED,
            TransitionPayload::new().with_installed_phase("Stage 2"),
        ))
        .expect("second installation phase");
    assert_eq!(second_phase.stage(), Stage::Installed);
    assert_eq!(second_phase.status_label(), labels::INSTALLED);

    // Notifications were dispatched along the way, after each commit.
    rt.block_on(async { tokio::time::sleep(Duration::from_millis(50)).await });
    let sent = notifier.sent();
    assert!(sent.iter().any(|message| message.body.contains("ORC-7001")));
    assert!(
        sent.iter()
            .any(|message| message.body.contains("site visit scheduled"))
    );
    assert!(
        sent.iter()
            .any(|message| message.body.contains("has been installed"))
    );
}

/// Suspends an order from the fabrication floor and releases it back.
#[test]
fn standby_detour_returns_to_the_fabrication_floor() {
    let rt = test_runtime();
    let (service, _notifier) = workflow();

    let order = rt
        .block_on(service.create_order(NewOrderRequest::new(
            "ORC-7002",
            "Marta Reis",
            CreationPath::ManualEntry,
        )))
        .expect("create order");
    rt.block_on(service.update_status(
        order.id(),
        labels::IN_PRODUCTION,
        TransitionPayload::new(),
    ))
    .expect("enter production");

    let parked = rt
        .block_on(service.update_status(order.id(), labels::STANDBY, TransitionPayload::new()))
        .expect("suspend");
    assert_eq!(parked.stage(), Stage::Standby);
    assert_eq!(parked.origin_before_standby(), Some(Stage::Production));

    let released = rt
        .block_on(service.update_status(order.id(), labels::RELEASED, TransitionPayload::new()))
        .expect("release");
    assert_eq!(released.stage(), Stage::Production);
    assert_eq!(released.origin_before_standby(), None);
}

/// Attaches a drawing and finds it again through the board snapshot.
#[test]
fn attachments_survive_the_round_trip_to_the_board() {
    let rt = test_runtime();
    let (service, _notifier) = workflow();

    let order = rt
        .block_on(service.create_order(NewOrderRequest::new(
            "ORC-7003",
            "Seu Ailton",
            CreationPath::ManualEntry,
        )))
        .expect("create order");
    let updated = rt
        .block_on(service.attach_file(order.id(), "kitchen elevation.pdf", b"%PDF-1.7"))
        .expect("attach file");
    assert_eq!(updated.attachments().len(), 1);

    let board = rt.block_on(service.board()).expect("board");
    let intake = board
        .iter()
        .find(|column| column.stage == Stage::Intake)
        .expect("intake column");
    let found = intake
        .orders
        .iter()
        .find(|candidate| candidate.id() == order.id())
        .expect("order on the board");
    assert_eq!(
        found
            .attachments()
            .first()
            .map(niemeyer::order::domain::Attachment::file_name),
        Some("kitchen_elevation.pdf")
    );
}
