//! Error taxonomy for state machine operations.
//!
//! Four kinds, all synchronous and none retryable: an invalid transition
//! does not become valid by retrying. `UnknownMachine` and `UnknownStatus`
//! are caller-configuration failures, `InvalidStateTransition` is an
//! expected user-triggerable denial, and `ConsistencyViolation` signals
//! that sibling records have already drifted apart.

use crate::machines::MachineName;
use thiserror::Error;

/// Comprehensive error types for state machine operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateMachineError {
    /// Machine name is not one of the five registered machines.
    #[error("Unknown machine: {machine}")]
    UnknownMachine { machine: String },

    /// Status string is not part of the machine's enumeration. Points at a
    /// stale or corrupt record rather than a business-rule denial.
    #[error("Unknown status '{status}' for machine {machine}")]
    UnknownStatus {
        machine: MachineName,
        status: String,
    },

    /// Proposed status is not reachable from the current one.
    #[error("{machine} cannot move from '{current}' to '{proposed}'")]
    InvalidStateTransition {
        machine: MachineName,
        current: String,
        proposed: String,
    },

    /// Cross-entity invariant between order, payment and escrow failed.
    /// The surrounding system let related records drift; abort the commit.
    #[error("{rule}")]
    ConsistencyViolation { rule: String },
}

impl StateMachineError {
    /// Machine-readable code for API error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownMachine { .. } => "UNKNOWN_MACHINE",
            Self::UnknownStatus { .. } => "UNKNOWN_STATUS",
            Self::InvalidStateTransition { .. } => "INVALID_STATE_TRANSITION",
            Self::ConsistencyViolation { .. } => "CONSISTENCY_VIOLATION",
        }
    }

    /// No kind in this taxonomy is transient; callers must reject the
    /// request rather than retry.
    pub fn is_retryable(&self) -> bool {
        false
    }
}

/// Result type alias for state machine operations
pub type Result<T> = std::result::Result<T, StateMachineError>;

/// Helper to build an unknown-machine error from a raw name
pub fn unknown_machine(machine: impl Into<String>) -> StateMachineError {
    StateMachineError::UnknownMachine {
        machine: machine.into(),
    }
}

/// Helper to build an unknown-status error
pub fn unknown_status(machine: MachineName, status: impl Into<String>) -> StateMachineError {
    StateMachineError::UnknownStatus {
        machine,
        status: status.into(),
    }
}

/// Helper to build a denied-transition error
pub fn invalid_transition(
    machine: MachineName,
    current: impl Into<String>,
    proposed: impl Into<String>,
) -> StateMachineError {
    StateMachineError::InvalidStateTransition {
        machine,
        current: current.into(),
        proposed: proposed.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_message_shape() {
        let err = invalid_transition(MachineName::Dispute, "CLOSED", "OPEN");
        assert_eq!(err.to_string(), "DISPUTE cannot move from 'CLOSED' to 'OPEN'");
        assert_eq!(err.code(), "INVALID_STATE_TRANSITION");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(unknown_machine("PAYMENT").code(), "UNKNOWN_MACHINE");
        assert_eq!(
            unknown_status(MachineName::Order, "SHIPPED_MAYBE").code(),
            "UNKNOWN_STATUS"
        );
        let violation = StateMachineError::ConsistencyViolation {
            rule: "Order marked as PAID but payment is not SUCCESS".to_string(),
        };
        assert_eq!(violation.code(), "CONSISTENCY_VIOLATION");
    }

    #[test]
    fn test_nothing_is_retryable() {
        assert!(!unknown_machine("X").is_retryable());
        assert!(!invalid_transition(MachineName::Order, "SETTLED", "PAID").is_retryable());
    }
}
