//! Transition validation: the sole place transition legality is decided.
//!
//! All functions are pure reads over the process-wide registry. Nothing
//! here mutates state or records audit entries; persisting the new status
//! and storing a timeline entry is the caller's job, and the caller must
//! wrap read-validate-write in one atomic unit against its store to avoid
//! lost-update races.

use crate::errors::{invalid_transition, unknown_status, Result};
use crate::machines::MachineName;
use crate::registry::{machine_registry, TransitionTable};
use crate::states::{MachineStatus, OrderStatus};
use tracing::debug;

/// Check whether `proposed` is reachable from `current` for a machine.
///
/// Fails with `UnknownMachine` for an unregistered machine name and with
/// `UnknownStatus` when either status is outside the machine's
/// enumeration; a merely-denied transition is `Ok(false)`, not an error.
pub fn is_valid_machine_transition(machine: &str, current: &str, proposed: &str) -> Result<bool> {
    let table = machine_registry().resolve(machine)?;
    check_transition(table, current, proposed)
}

/// Table-level transition check shared by the string-boundary entry points.
fn check_transition(table: &TransitionTable, current: &str, proposed: &str) -> Result<bool> {
    let successors = table
        .successors(current)
        .ok_or_else(|| unknown_status(table.machine(), current))?;

    if !table.contains(proposed) {
        return Err(unknown_status(table.machine(), proposed));
    }

    let allowed = successors.iter().any(|s| *s == proposed);
    if !allowed {
        debug!(
            machine = %table.machine(),
            current,
            proposed,
            "transition denied"
        );
    }

    Ok(allowed)
}

/// Assert that a transition is legal, mapping denial to a typed
/// `InvalidStateTransition` carrying machine, current and proposed status.
pub fn assert_transition(machine: &str, current: &str, proposed: &str) -> Result<()> {
    let table = machine_registry().resolve(machine)?;
    if check_transition(table, current, proposed)? {
        Ok(())
    } else {
        Err(invalid_transition(table.machine(), current, proposed))
    }
}

/// Legal successor statuses for `current` on a machine.
pub fn allowed_transitions(machine: &str, current: &str) -> Result<&'static [&'static str]> {
    let table = machine_registry().resolve(machine)?;
    table
        .successors(current)
        .ok_or_else(|| unknown_status(table.machine(), current))
}

/// Whether `status` admits no further transitions on a machine. An
/// unrecognized status is reported terminal (fail-safe).
pub fn is_terminal_state(machine: &str, status: &str) -> Result<bool> {
    let table = machine_registry().resolve(machine)?;
    Ok(table.is_terminal(status))
}

/// ORDER-only transition check, kept for callers predating the
/// machine-qualified surface. Thin alias over
/// [`is_valid_machine_transition`].
pub fn is_valid_transition(current: &str, proposed: &str) -> Result<bool> {
    is_valid_machine_transition(MachineName::Order.as_str(), current, proposed)
}

/// ORDER-only successor lookup, the legacy companion of
/// [`is_valid_transition`].
pub fn get_allowed_transitions(current: &str) -> Result<&'static [&'static str]> {
    allowed_transitions(MachineName::Order.as_str(), current)
}

/// Typed transition check for callers already holding status enums.
pub fn can_transition<S: MachineStatus>(current: S, proposed: S) -> bool {
    current.can_transition_to(proposed)
}

/// Typed successor lookup for ORDER, useful when rendering next actions.
pub fn order_successors(current: OrderStatus) -> &'static [OrderStatus] {
    current.successors()
}
