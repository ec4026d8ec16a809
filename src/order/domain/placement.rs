//! Manual placement of an order into an arbitrary stage.
//!
//! Operators can drag an order straight onto a board column, bypassing the
//! requested-status vocabulary. Each stage has exactly one default label and
//! default stamps applied on manual entry. The side effects are shared with
//! the transition engine through the aggregate's mutators, so the two entry
//! points cannot diverge on stamps, task resets, or origin handling; only
//! the default labels differ.

use super::{Order, Stage, TransitionPayload, labels};
use mockable::Clock;

/// Default status label applied when an order is manually placed into a
/// stage.
#[must_use]
pub const fn default_label(target: Stage) -> &'static str {
    match target {
        Stage::Intake => labels::APPROVED,
        Stage::SiteVisit => labels::SCHEDULE_VISIT,
        Stage::Design => labels::DESIGN,
        Stage::Production => labels::NOT_STARTED,
        Stage::Ready => labels::SCHEDULE_INSTALLATION,
        Stage::Standby => labels::STOPPED,
        Stage::Installed => labels::INSTALLED,
    }
}

/// Places the order into `target`, applying that stage's default label and
/// stamps.
///
/// Placing an order into the stage it already occupies is a no-op; the
/// return value reports whether anything changed. Entering Standby records
/// the return point only if none is recorded yet, so a repeated placement
/// can never overwrite it.
pub fn place(
    order: &mut Order,
    target: Stage,
    payload: &TransitionPayload,
    clock: &impl Clock,
) -> bool {
    if order.stage() == target {
        return false;
    }

    match target {
        Stage::Intake | Stage::Design => {
            order.relocate(target, clock);
        }
        Stage::SiteVisit => {
            order.relocate(target, clock);
            order.schedule_visit(
                payload.visit_stamp(),
                payload.visit_responsible.clone(),
                clock,
            );
        }
        Stage::Production => {
            order.relocate(target, clock);
            order.enter_production(
                payload.production_entry_stamp(),
                payload.production_deadline_stamp(),
                clock,
            );
        }
        Stage::Ready => {
            order.relocate(target, clock);
            order.mark_ready(clock);
        }
        Stage::Standby => {
            order.suspend(default_label(target), clock);
            return true;
        }
        Stage::Installed => {
            order.relocate(target, clock);
            order.schedule_installation(
                payload.installation_stamp(),
                payload.installation_responsible.clone(),
                clock,
            );
        }
    }
    order.set_status_label(default_label(target), clock);
    true
}
