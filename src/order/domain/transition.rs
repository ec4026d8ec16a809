//! The stage transition engine.
//!
//! Transitions are keyed by the *(current stage, requested status)* pair,
//! never by stage alone: the same requested label can mean different things
//! depending on where the order sits. The rule table below is the single
//! source of truth; pairs it does not list fall through to the permissive
//! default, which updates the status label without moving the order.

use super::{InstalledPhase, Order, Stage, TransitionPayload, labels};
use mockable::Clock;
use serde::Serialize;

/// What a matched rule does to the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    /// Move to the given stage; the requested label is kept as-is.
    Move(Stage),
    /// Move to [`Stage::SiteVisit`] and stamp the visit date and
    /// responsible person from the payload.
    ScheduleVisit,
    /// Move to [`Stage::Production`], stamp the entry and deadline dates,
    /// then reset every task.
    EnterProduction,
    /// Stay in place and stamp the installation date and responsible
    /// person.
    ScheduleInstallation,
    /// Park in Standby, remembering the current stage as the return point.
    Suspend,
    /// Leave Standby for the recorded origin stage (Intake when none).
    Release,
    /// Fork on the payload's installed phase: phase 1 returns the order to
    /// [`Stage::SiteVisit`] awaiting a second visit, phase 2 completes the
    /// pipeline.
    CompleteInstallation,
}

/// One row of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRule {
    /// Stage the order must currently occupy.
    pub stage: Stage,
    /// Requested status label, matched exactly.
    pub status: &'static str,
    /// Effect of the transition.
    pub outcome: RuleOutcome,
}

const fn rule(stage: Stage, status: &'static str, outcome: RuleOutcome) -> TransitionRule {
    TransitionRule {
        stage,
        status,
        outcome,
    }
}

/// The complete transition table.
pub const TRANSITION_RULES: &[TransitionRule] = &[
    rule(
        Stage::Intake,
        labels::VISIT_SCHEDULED,
        RuleOutcome::ScheduleVisit,
    ),
    rule(Stage::Intake, labels::DESIGN, RuleOutcome::Move(Stage::Design)),
    rule(
        Stage::Intake,
        labels::PRODUCE,
        RuleOutcome::Move(Stage::Design),
    ),
    rule(
        Stage::Intake,
        labels::IN_PRODUCTION,
        RuleOutcome::EnterProduction,
    ),
    rule(Stage::Intake, labels::AWAITING_CLIENT, RuleOutcome::Suspend),
    rule(
        Stage::Intake,
        labels::AWAITING_ENGINEERING,
        RuleOutcome::Suspend,
    ),
    rule(Stage::Intake, labels::AWAITING_SITE, RuleOutcome::Suspend),
    rule(Stage::Intake, labels::STOPPED, RuleOutcome::Suspend),
    rule(
        Stage::SiteVisit,
        labels::SEND_TO_PRODUCTION,
        RuleOutcome::Move(Stage::Design),
    ),
    rule(
        Stage::SiteVisit,
        labels::IN_PRODUCTION,
        RuleOutcome::EnterProduction,
    ),
    rule(
        Stage::SiteVisit,
        labels::INSTALLED,
        RuleOutcome::CompleteInstallation,
    ),
    rule(
        Stage::Design,
        labels::APPROVED_FOR_PRODUCTION,
        RuleOutcome::EnterProduction,
    ),
    rule(Stage::Design, labels::STANDBY, RuleOutcome::Suspend),
    rule(Stage::Production, labels::STANDBY, RuleOutcome::Suspend),
    rule(
        Stage::Ready,
        labels::INSTALLATION_SCHEDULED,
        RuleOutcome::ScheduleInstallation,
    ),
    rule(Stage::Ready, labels::STANDBY, RuleOutcome::Suspend),
    rule(
        Stage::Ready,
        labels::INSTALLED,
        RuleOutcome::CompleteInstallation,
    ),
    rule(Stage::Standby, labels::RELEASED, RuleOutcome::Release),
];

/// Looks up the rule for a *(stage, requested status)* pair.
#[must_use]
pub fn find_rule(stage: Stage, requested: &str) -> Option<&'static TransitionRule> {
    TRANSITION_RULES
        .iter()
        .find(|candidate| candidate.stage == stage && candidate.status == requested)
}

/// Applies a requested status change to the order.
///
/// Consults the rule table and executes the matched outcome, including its
/// field stamps and task resets. Pairs with no rule update the status label
/// only; this default-through is deliberate policy, not an error.
pub fn apply_status_request(
    order: &mut Order,
    requested: &str,
    payload: &TransitionPayload,
    clock: &impl Clock,
) {
    let Some(matched) = find_rule(order.stage(), requested) else {
        order.set_status_label(requested, clock);
        return;
    };

    match matched.outcome {
        RuleOutcome::Move(target) => {
            order.relocate(target, clock);
            order.set_status_label(requested, clock);
        }
        RuleOutcome::ScheduleVisit => {
            order.relocate(Stage::SiteVisit, clock);
            order.schedule_visit(
                payload.visit_stamp(),
                payload.visit_responsible.clone(),
                clock,
            );
            order.set_status_label(requested, clock);
        }
        RuleOutcome::EnterProduction => {
            order.relocate(Stage::Production, clock);
            order.enter_production(
                payload.production_entry_stamp(),
                payload.production_deadline_stamp(),
                clock,
            );
            order.set_status_label(requested, clock);
        }
        RuleOutcome::ScheduleInstallation => {
            order.schedule_installation(
                payload.installation_stamp(),
                payload.installation_responsible.clone(),
                clock,
            );
            order.set_status_label(requested, clock);
        }
        RuleOutcome::Suspend => order.suspend(requested, clock),
        RuleOutcome::Release => {
            order.release(clock);
            order.set_status_label(requested, clock);
        }
        RuleOutcome::CompleteInstallation => match payload.installed_phase() {
            Some(InstalledPhase::First) => {
                order.relocate(Stage::SiteVisit, clock);
                order.set_status_label(labels::SCHEDULE_VISIT, clock);
            }
            Some(InstalledPhase::Second) => {
                order.relocate(Stage::Installed, clock);
                order.set_status_label(labels::INSTALLED, clock);
            }
            // No recognisable phase: same permissive default as an
            // unmapped pair.
            None => order.set_status_label(requested, clock),
        },
    }
}
