#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Lifecycle Core
//!
//! Transactional state-machine engine for a marketplace platform.
//!
//! ## Overview
//!
//! Five entity kinds — orders, escrow holds, negotiations, disputes and
//! products — each follow a closed lifecycle. This crate is the one place
//! where transition legality is decided, cross-entity consistency between
//! order, payment and escrow records is enforced, and audit entries are
//! constructed. It performs no I/O: controllers load current statuses,
//! call in here synchronously, and commit (or abort) against their own
//! store.
//!
//! ## Architecture
//!
//! - [`states`] - Closed status enumerations and their typed successor sets
//! - [`machines`] - Machine name identifiers
//! - [`registry`] - Immutable transition tables, built once at process start
//! - [`validator`] - Transition legality decisions and terminality queries
//! - [`consistency`] - Order/payment/escrow cross-record invariants
//! - [`timeline`] - Immutable audit entry construction
//! - [`errors`] - Typed failure taxonomy with machine-readable codes
//!
//! ## Concurrency
//!
//! Everything here is synchronous and side-effect-free over a registry
//! that is immutable after construction, so concurrent use needs no
//! locking. The lost-update hazard lives at the call site: callers must
//! treat read-validate-write as one atomic unit against their store, and
//! run [`consistency::validate_payment_state`] inside the same unit as the
//! order write it guards.
//!
//! ## Quick Start
//!
//! ```rust
//! use lifecycle_core::{assert_transition, create_timeline_entry, validate_payment_state_str};
//!
//! # fn example() -> lifecycle_core::Result<()> {
//! // Gate the status change before committing it
//! assert_transition("ORDER", "SHIPPED", "DELIVERED")?;
//!
//! // Re-assert the sibling records agree on any multi-entity commit
//! validate_payment_state_str("PAID", Some("SUCCESS"), Some("HOLD"))?;
//!
//! // Build the audit record for the confirmed transition
//! let entry = create_timeline_entry("SHIPPED", "DELIVERED", None, None);
//! assert_eq!(entry.to_state, "DELIVERED");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod consistency;
pub mod errors;
pub mod machines;
pub mod registry;
pub mod states;
pub mod timeline;
pub mod validator;

pub use consistency::{
    validate_payment_state, validate_payment_state_str, ConsistencyRule, CONSISTENCY_RULES,
};
pub use errors::{Result, StateMachineError};
pub use machines::MachineName;
pub use registry::{machine_registry, MachineRegistry, TransitionTable};
pub use states::{
    status_groups, DisputeStatus, EscrowStatus, MachineStatus, NegotiationStatus, OrderStatus,
    PaymentStatus, ProductStatus,
};
pub use timeline::{create_timeline_entry, TimelineEntry};
pub use validator::{
    allowed_transitions, assert_transition, can_transition, get_allowed_transitions,
    is_terminal_state, is_valid_machine_transition, is_valid_transition, order_successors,
};
