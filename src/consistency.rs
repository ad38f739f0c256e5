//! Cross-entity consistency rules between order, payment and escrow.
//!
//! Order, payment and escrow rows are updated by independent operations,
//! possibly in separate transactions. This module is the single place that
//! re-asserts they must agree whenever an order row is about to be
//! committed. A violation means the surrounding system already let sibling
//! records drift, so it is logged at error level before propagating; the
//! caller must abort the commit and never coerce one record to match
//! another.
//!
//! Callers invoke [`validate_payment_state`] inside the same atomic unit
//! as the order write it guards, in addition to (not instead of) the
//! per-machine transition check.

use crate::errors::{unknown_status, Result, StateMachineError};
use crate::machines::MachineName;
use crate::states::{EscrowStatus, OrderStatus, PaymentStatus};
use tracing::error;

/// One invariant row: whenever an order is in `when_order`, the constrained
/// sibling statuses must match. A `None` constraint leaves that sibling
/// unconstrained.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyRule {
    pub when_order: OrderStatus,
    pub requires_payment: Option<PaymentStatus>,
    pub requires_escrow: Option<EscrowStatus>,
    pub message: &'static str,
}

/// The full rules table. Controllers must not duplicate these checks;
/// every order/payment/escrow coupling lives in this one table.
pub const CONSISTENCY_RULES: &[ConsistencyRule] = &[
    ConsistencyRule {
        when_order: OrderStatus::Paid,
        requires_payment: Some(PaymentStatus::Success),
        requires_escrow: None,
        message: "Order marked as PAID but payment is not SUCCESS",
    },
    ConsistencyRule {
        when_order: OrderStatus::Paid,
        requires_payment: None,
        requires_escrow: Some(EscrowStatus::Hold),
        message: "Order marked as PAID but escrow is not in HOLD",
    },
    ConsistencyRule {
        when_order: OrderStatus::Settled,
        requires_payment: None,
        requires_escrow: Some(EscrowStatus::Released),
        message: "Order marked as SETTLED but escrow is not RELEASED",
    },
    ConsistencyRule {
        when_order: OrderStatus::Refunded,
        requires_payment: None,
        requires_escrow: Some(EscrowStatus::Refunded),
        message: "Order marked as REFUNDED but escrow is not REFUNDED",
    },
    ConsistencyRule {
        when_order: OrderStatus::Disputed,
        requires_payment: None,
        requires_escrow: Some(EscrowStatus::Frozen),
        message: "Order marked as DISPUTED but escrow is not FROZEN",
    },
];

impl ConsistencyRule {
    /// Whether the rule holds for the given sibling statuses. A missing
    /// sibling record fails any rule that constrains it.
    fn holds(&self, payment: Option<PaymentStatus>, escrow: Option<EscrowStatus>) -> bool {
        let payment_ok = match self.requires_payment {
            Some(required) => payment == Some(required),
            None => true,
        };
        let escrow_ok = match self.requires_escrow {
            Some(required) => escrow == Some(required),
            None => true,
        };
        payment_ok && escrow_ok
    }
}

/// Validate that the payment and escrow records agree with the order
/// status. Pure apart from error-level logging on violation.
pub fn validate_payment_state(
    order: OrderStatus,
    payment: Option<PaymentStatus>,
    escrow: Option<EscrowStatus>,
) -> Result<()> {
    for rule in CONSISTENCY_RULES {
        if rule.when_order != order {
            continue;
        }
        if !rule.holds(payment, escrow) {
            error!(
                order = %order,
                payment = ?payment,
                escrow = ?escrow,
                rule = rule.message,
                "cross-entity consistency violation"
            );
            return Err(StateMachineError::ConsistencyViolation {
                rule: rule.message.to_string(),
            });
        }
    }
    Ok(())
}

/// String-boundary form of [`validate_payment_state`] for callers holding
/// raw persisted status values. Unparseable statuses surface as
/// `UnknownStatus` rather than a consistency violation.
pub fn validate_payment_state_str(
    order: &str,
    payment: Option<&str>,
    escrow: Option<&str>,
) -> Result<()> {
    let order: OrderStatus = order
        .parse()
        .map_err(|_| unknown_status(MachineName::Order, order))?;
    let payment = payment
        .map(|s| {
            s.parse::<PaymentStatus>()
                .map_err(|_| unknown_status(MachineName::Order, s))
        })
        .transpose()?;
    let escrow = escrow
        .map(|s| {
            s.parse::<EscrowStatus>()
                .map_err(|_| unknown_status(MachineName::Escrow, s))
        })
        .transpose()?;

    validate_payment_state(order, payment, escrow)
}
