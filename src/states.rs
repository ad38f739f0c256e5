//! Status enumerations for every lifecycle machine.
//!
//! Each entity kind has one closed enum. The wire form is the
//! SCREAMING_SNAKE string persisted by the surrounding services, so every
//! enum serializes with `SCREAMING_SNAKE_CASE` and round-trips through
//! `Display`/`FromStr` at the string boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common surface of a machine-governed status enumeration.
///
/// `ALL` and `successors` together define the machine's transition table;
/// the registry builds its string-keyed adjacency from them so the typed
/// edges stay the single source of truth.
pub trait MachineStatus: Copy + PartialEq + Sized + 'static {
    /// Every status of the enumeration, in lifecycle order.
    const ALL: &'static [Self];

    /// Wire representation of this status.
    fn as_str(&self) -> &'static str;

    /// Statuses directly reachable from this one.
    fn successors(&self) -> &'static [Self];

    /// A status with no outgoing edges admits no further transitions.
    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    /// Check a transition against the typed edge set.
    fn can_transition_to(&self, proposed: Self) -> bool {
        self.successors().contains(&proposed)
    }
}

/// Order lifecycle states, from checkout through settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order created, payment not yet initiated
    Created,
    /// Payment initiated at the gateway, awaiting outcome
    PaymentPending,
    /// Payment captured, escrow holding funds
    Paid,
    /// Seller confirmed the order
    Confirmed,
    /// Order handed to the carrier
    Shipped,
    /// Carrier reports delivery
    Delivered,
    /// Buyer confirmed receipt
    DeliveryConfirmed,
    /// Funds released to stakeholders
    Settled,
    /// Order cancelled before fulfilment
    Cancelled,
    /// An open dispute is blocking the order
    Disputed,
    /// Funds returned to the buyer
    Refunded,
}

impl MachineStatus for OrderStatus {
    const ALL: &'static [Self] = &[
        Self::Created,
        Self::PaymentPending,
        Self::Paid,
        Self::Confirmed,
        Self::Shipped,
        Self::Delivered,
        Self::DeliveryConfirmed,
        Self::Settled,
        Self::Cancelled,
        Self::Disputed,
        Self::Refunded,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::PaymentPending => "PAYMENT_PENDING",
            Self::Paid => "PAID",
            Self::Confirmed => "CONFIRMED",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::DeliveryConfirmed => "DELIVERY_CONFIRMED",
            Self::Settled => "SETTLED",
            Self::Cancelled => "CANCELLED",
            Self::Disputed => "DISPUTED",
            Self::Refunded => "REFUNDED",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Created => &[Self::PaymentPending, Self::Cancelled],
            // PAYMENT_PENDING -> CREATED lets a failed gateway attempt reset
            Self::PaymentPending => &[Self::Paid, Self::Cancelled, Self::Created],
            Self::Paid => &[
                Self::Confirmed,
                Self::Disputed,
                Self::Refunded,
                Self::Cancelled,
            ],
            Self::Confirmed => &[Self::Shipped, Self::Disputed],
            Self::Shipped => &[Self::Delivered, Self::Disputed],
            Self::Delivered => &[Self::DeliveryConfirmed, Self::Disputed],
            Self::DeliveryConfirmed => &[Self::Settled, Self::Disputed],
            // Disputes resolve only to a refund or a settlement
            Self::Disputed => &[Self::Refunded, Self::Settled],
            Self::Settled | Self::Cancelled | Self::Refunded => &[],
        }
    }
}

/// Escrow states for funds held between payment capture and payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EscrowStatus {
    /// Funds held pending delivery and the return window
    Hold,
    /// Funds frozen during an active dispute
    Frozen,
    /// Funds paid out to stakeholders
    Released,
    /// Funds returned to the buyer
    Refunded,
}

impl MachineStatus for EscrowStatus {
    const ALL: &'static [Self] = &[Self::Hold, Self::Frozen, Self::Released, Self::Refunded];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Hold => "HOLD",
            Self::Frozen => "FROZEN",
            Self::Released => "RELEASED",
            Self::Refunded => "REFUNDED",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Hold => &[Self::Frozen, Self::Released, Self::Refunded],
            // A freeze can be lifted back to HOLD; dispute resolution may
            // also settle or refund directly out of the frozen state
            Self::Frozen => &[Self::Hold, Self::Released, Self::Refunded],
            Self::Released | Self::Refunded => &[],
        }
    }
}

/// Negotiation states for custom-manufacturing deal requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NegotiationStatus {
    /// Buyer filed a request, seller has not engaged yet
    Requested,
    /// Both parties actively negotiating terms
    Negotiating,
    /// Seller put a concrete offer on the table
    OfferMade,
    /// Buyer accepted the offer
    Accepted,
    /// Deal finalized and handed to order creation
    DealClosed,
    /// Seller rejected the request
    Rejected,
    /// Either party withdrew
    Cancelled,
}

impl MachineStatus for NegotiationStatus {
    const ALL: &'static [Self] = &[
        Self::Requested,
        Self::Negotiating,
        Self::OfferMade,
        Self::Accepted,
        Self::DealClosed,
        Self::Rejected,
        Self::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "REQUESTED",
            Self::Negotiating => "NEGOTIATING",
            Self::OfferMade => "OFFER_MADE",
            Self::Accepted => "ACCEPTED",
            Self::DealClosed => "DEAL_CLOSED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Requested => &[Self::Negotiating, Self::Rejected, Self::Cancelled],
            Self::Negotiating => &[Self::OfferMade, Self::Rejected, Self::Cancelled],
            // A counter-offer sends the negotiation back to the table
            Self::OfferMade => &[
                Self::Accepted,
                Self::Negotiating,
                Self::Rejected,
                Self::Cancelled,
            ],
            Self::Accepted => &[Self::DealClosed, Self::Cancelled],
            Self::DealClosed | Self::Rejected | Self::Cancelled => &[],
        }
    }
}

/// Dispute resolution states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeStatus {
    /// Dispute filed, not yet triaged
    Open,
    /// Platform staff reviewing the case
    UnderReview,
    /// Parties submitting evidence
    EvidenceCollection,
    /// Resolution actions underway
    InProgress,
    /// Outcome decided, awaiting closure
    Resolved,
    /// Case closed
    Closed,
}

impl MachineStatus for DisputeStatus {
    const ALL: &'static [Self] = &[
        Self::Open,
        Self::UnderReview,
        Self::EvidenceCollection,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::UnderReview => "UNDER_REVIEW",
            Self::EvidenceCollection => "EVIDENCE_COLLECTION",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            // OPEN -> CLOSED covers frivolous filings dismissed at intake
            Self::Open => &[Self::UnderReview, Self::EvidenceCollection, Self::Closed],
            Self::UnderReview => &[
                Self::EvidenceCollection,
                Self::InProgress,
                Self::Resolved,
            ],
            Self::EvidenceCollection => &[Self::UnderReview, Self::InProgress],
            Self::InProgress => &[Self::Resolved],
            Self::Resolved => &[Self::Closed],
            Self::Closed => &[],
        }
    }
}

/// Product moderation states.
///
/// Deliberately has no terminal state: `REJECTED` and `DISABLED` both loop
/// back into the moderation pipeline, so a listing is never stranded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductStatus {
    /// Seller is still editing the listing
    Draft,
    /// Submitted for moderation
    Pending,
    /// Approved and visible in the storefront
    Approved,
    /// Moderation rejected the listing
    Rejected,
    /// Taken down after approval
    Disabled,
}

impl MachineStatus for ProductStatus {
    const ALL: &'static [Self] = &[
        Self::Draft,
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Disabled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Disabled => "DISABLED",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Pending],
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Disabled],
            Self::Rejected => &[Self::Draft, Self::Pending],
            Self::Disabled => &[Self::Pending, Self::Draft],
        }
    }
}

/// Payment gateway outcome states.
///
/// Not a registered machine: the gateway owns this lifecycle. The
/// enumeration exists so the consistency checker can correlate payment
/// outcomes with order and escrow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

macro_rules! impl_status_string_boundary {
    ($ty:ty, $label:expr) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as MachineStatus>::ALL
                    .iter()
                    .find(|v| v.as_str() == s)
                    .copied()
                    .ok_or_else(|| format!("Invalid {} status: {s}", $label))
            }
        }
    };
}

impl_status_string_boundary!(OrderStatus, "order");
impl_status_string_boundary!(EscrowStatus, "escrow");
impl_status_string_boundary!(NegotiationStatus, "negotiation");
impl_status_string_boundary!(DisputeStatus, "dispute");
impl_status_string_boundary!(ProductStatus, "product");

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "SUCCESS" => Ok(Self::Success),
            "FAILED" => Ok(Self::Failed),
            _ => Err(format!("Invalid payment status: {s}")),
        }
    }
}

/// Default state for a newly created order
impl Default for OrderStatus {
    fn default() -> Self {
        Self::Created
    }
}

/// Default state for a fresh escrow hold
impl Default for EscrowStatus {
    fn default() -> Self {
        Self::Hold
    }
}

/// Default state for a new negotiation request
impl Default for NegotiationStatus {
    fn default() -> Self {
        Self::Requested
    }
}

/// Default state for a freshly filed dispute
impl Default for DisputeStatus {
    fn default() -> Self {
        Self::Open
    }
}

/// Default state for a new product listing
impl Default for ProductStatus {
    fn default() -> Self {
        Self::Draft
    }
}

/// Default state for an initiated payment
impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Status groupings for validation and logic
pub mod status_groups {
    use super::{DisputeStatus, OrderStatus};

    /// Dispute statuses that block escrow settlement
    pub const ACTIVE_DISPUTE_STATUSES: &[DisputeStatus] = &[
        DisputeStatus::Open,
        DisputeStatus::EvidenceCollection,
        DisputeStatus::UnderReview,
    ];

    /// Order statuses that indicate a finished lifecycle
    pub const ORDER_FINAL_STATUSES: &[OrderStatus] = &[
        OrderStatus::Settled,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    /// Order statuses from which a dispute may be opened
    pub const DISPUTABLE_ORDER_STATUSES: &[OrderStatus] = &[
        OrderStatus::Paid,
        OrderStatus::Confirmed,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::DeliveryConfirmed,
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_terminal_states() {
        assert!(OrderStatus::Settled.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::Created.is_terminal());
        assert!(!OrderStatus::Disputed.is_terminal());
    }

    #[test]
    fn test_cancellation_is_not_reversible() {
        assert!(OrderStatus::Paid.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Paid));
    }

    #[test]
    fn test_dispute_reachable_from_every_post_payment_stage() {
        for status in status_groups::DISPUTABLE_ORDER_STATUSES {
            assert!(
                status.can_transition_to(OrderStatus::Disputed),
                "DISPUTED should be reachable from {status}"
            );
        }
    }

    #[test]
    fn test_escrow_freeze_is_liftable() {
        assert!(EscrowStatus::Hold.can_transition_to(EscrowStatus::Frozen));
        assert!(EscrowStatus::Frozen.can_transition_to(EscrowStatus::Hold));
        assert!(!EscrowStatus::Released.can_transition_to(EscrowStatus::Frozen));
        assert!(!EscrowStatus::Refunded.can_transition_to(EscrowStatus::Hold));
    }

    #[test]
    fn test_product_has_no_terminal_state() {
        for status in ProductStatus::ALL {
            assert!(
                !status.is_terminal(),
                "product moderation must keep {status} in the loop"
            );
        }
    }

    #[test]
    fn test_moderation_loop() {
        assert!(ProductStatus::Rejected.can_transition_to(ProductStatus::Draft));
        assert!(ProductStatus::Disabled.can_transition_to(ProductStatus::Pending));
    }

    #[test]
    fn test_status_string_conversion() {
        assert_eq!(OrderStatus::PaymentPending.to_string(), "PAYMENT_PENDING");
        assert_eq!(
            "DELIVERY_CONFIRMED".parse::<OrderStatus>().unwrap(),
            OrderStatus::DeliveryConfirmed
        );

        assert_eq!(NegotiationStatus::OfferMade.to_string(), "OFFER_MADE");
        assert_eq!(
            "DEAL_CLOSED".parse::<NegotiationStatus>().unwrap(),
            NegotiationStatus::DealClosed
        );

        assert!("settled".parse::<OrderStatus>().is_err());
        assert!("UNKNOWN".parse::<EscrowStatus>().is_err());
    }

    #[test]
    fn test_status_serde() {
        let status = DisputeStatus::EvidenceCollection;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, "\"EVIDENCE_COLLECTION\"");

        let parsed: DisputeStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, status);
    }

    #[test]
    fn test_defaults_match_initial_lifecycle_states() {
        assert_eq!(OrderStatus::default(), OrderStatus::Created);
        assert_eq!(EscrowStatus::default(), EscrowStatus::Hold);
        assert_eq!(NegotiationStatus::default(), NegotiationStatus::Requested);
        assert_eq!(DisputeStatus::default(), DisputeStatus::Open);
        assert_eq!(ProductStatus::default(), ProductStatus::Draft);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }
}
