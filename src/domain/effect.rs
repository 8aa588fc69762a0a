//! Side effects emitted by engine operations
//!
//! State transitions never talk to the audit log or notification outbox
//! directly. Each operation returns the list of effects it produced and
//! the caller drains them after the state write commits. Effect dispatch
//! is best-effort: a failed audit or notification never rolls back the
//! transition it describes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::id::StaffId;

/// Audit actions recorded against assignments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    Assign,
    Unassign,
    Update,
    Override,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Assign => "ASSIGN",
            AuditAction::Unassign => "UNASSIGN",
            AuditAction::Update => "UPDATE",
            AuditAction::Override => "OVERRIDE",
        }
    }
}

/// Closed set of notification kinds the outbox understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    ShiftAssigned,
    ShiftUnassigned,
    ShiftChanged,
    AssignmentRejected,
    ApplicationApproved,
    ApplicationRejected,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::ShiftAssigned => "SHIFT_ASSIGNED",
            NotificationKind::ShiftUnassigned => "SHIFT_UNASSIGNED",
            NotificationKind::ShiftChanged => "SHIFT_CHANGED",
            NotificationKind::AssignmentRejected => "ASSIGNMENT_REJECTED",
            NotificationKind::ApplicationApproved => "APPLICATION_APPROVED",
            NotificationKind::ApplicationRejected => "APPLICATION_REJECTED",
        }
    }
}

/// A single pending side effect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Record an audit row for an assignment transition
    Audit {
        entity_id: String,
        action: AuditAction,
        actor_id: Option<StaffId>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        before: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        after: Option<Value>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        metadata: Option<Value>,
    },

    /// Queue a notification for a user
    Notify {
        user_id: StaffId,
        kind: NotificationKind,
        title: String,
        body: String,
        /// Correlation ids (assignment id, shift id, expiry instant)
        /// for downstream accept/reject affordances
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn wire_names_are_stable() {
        assert_eq!(AuditAction::Assign.as_str(), "ASSIGN");
        assert_eq!(
            serde_json::to_string(&NotificationKind::ShiftChanged).unwrap(),
            "\"SHIFT_CHANGED\""
        );
    }

    #[test]
    fn effect_serializes_with_tag() {
        let effect = Effect::Audit {
            entity_id: "g-1234567".to_string(),
            action: AuditAction::Assign,
            actor_id: None,
            before: None,
            after: None,
            metadata: None,
        };
        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["effect"], "audit");
        assert_eq!(json["action"], "ASSIGN");
    }

    #[test]
    fn notify_carries_correlation_data() {
        let effect = Effect::Notify {
            user_id: StaffId::new("Ada", Utc::now()),
            kind: NotificationKind::ShiftAssigned,
            title: "New shift assignment".to_string(),
            body: "You have been assigned".to_string(),
            data: Some(serde_json::json!({ "shift_id": "s-1234567" })),
        };

        let json = serde_json::to_value(&effect).unwrap();
        assert_eq!(json["data"]["shift_id"], "s-1234567");
    }
}
