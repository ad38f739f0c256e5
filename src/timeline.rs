//! Immutable audit records for confirmed transitions.
//!
//! The recorder only constructs entries; persisting them belongs to
//! whichever service commits the transition. No validation happens here:
//! by the time a timeline entry is requested, the transition has already
//! been confirmed by the validator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One audit record of a confirmed transition. Field names serialize in
/// the camelCase wire form the surrounding services persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub from_state: String,
    pub to_state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    pub created_at: DateTime<Utc>,
}

impl TimelineEntry {
    /// Build an entry stamped with the current time.
    pub fn new(from_state: impl Into<String>, to_state: impl Into<String>) -> Self {
        Self {
            from_state: from_state.into(),
            to_state: to_state.into(),
            reason: None,
            metadata: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a human-readable reason for the transition.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach structured metadata (actor, amounts, gateway references).
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Construct a timeline entry for a confirmed transition.
pub fn create_timeline_entry(
    from_state: impl Into<String>,
    to_state: impl Into<String>,
    reason: Option<String>,
    metadata: Option<Value>,
) -> TimelineEntry {
    TimelineEntry {
        from_state: from_state.into(),
        to_state: to_state.into(),
        reason,
        metadata,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_captures_transition_and_timestamp() {
        let before = Utc::now();
        let entry = create_timeline_entry(
            "OPEN",
            "UNDER_REVIEW",
            Some("escalated by customer".to_string()),
            None,
        );
        let after = Utc::now();

        assert_eq!(entry.from_state, "OPEN");
        assert_eq!(entry.to_state, "UNDER_REVIEW");
        assert_eq!(entry.reason.as_deref(), Some("escalated by customer"));
        assert!(entry.created_at >= before && entry.created_at <= after);
    }

    #[test]
    fn test_builder_form() {
        let entry = TimelineEntry::new("PAID", "CONFIRMED")
            .with_reason("seller confirmed")
            .with_metadata(json!({ "actor": "seller:42" }));

        assert_eq!(entry.metadata.unwrap()["actor"], "seller:42");
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let entry = create_timeline_entry("HOLD", "FROZEN", None, None);
        let json = serde_json::to_value(&entry).unwrap();

        assert_eq!(json["fromState"], "HOLD");
        assert_eq!(json["toState"], "FROZEN");
        assert!(json.get("createdAt").is_some());
        // Absent optionals are omitted, matching the persisted log rows
        assert!(json.get("reason").is_none());
        assert!(json.get("metadata").is_none());
    }
}
