//! Assignment records and their status machine
//!
//! An assignment binds one staff member to one shift. It is created
//! pending with an expiry window, and the assigned staff member either
//! accepts or rejects it before the sweeper expires it. Pending and
//! accepted assignments are "active": they count toward the daily cap
//! and the overlap rule; rejected and expired ones do not block
//! re-assignment of the same pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{AssignmentId, ShiftId, StaffId};

/// Status of an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Expired,
}

impl AssignmentStatus {
    /// Active assignments count toward conflict checks
    pub fn is_active(&self) -> bool {
        matches!(self, AssignmentStatus::Pending | AssignmentStatus::Accepted)
    }

    /// Terminal states can only be left via an update (reassignment)
    pub fn is_terminal(&self) -> bool {
        matches!(self, AssignmentStatus::Rejected | AssignmentStatus::Expired)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Pending => "pending",
            AssignmentStatus::Accepted => "accepted",
            AssignmentStatus::Rejected => "rejected",
            AssignmentStatus::Expired => "expired",
        }
    }
}

/// A binding between one shift and one staff member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    /// Unique identifier
    pub id: AssignmentId,

    pub shift_id: ShiftId,
    pub staff_id: StaffId,

    /// Who proposed the assignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<StaffId>,

    pub status: AssignmentStatus,

    /// Set only while pending; the sweeper expires past-due rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Set on any terminal transition (accept, reject, expire)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responded_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<StaffId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<StaffId>,
}

impl Assignment {
    /// Creates a pending assignment that expires at `expires_at`
    pub fn pending(
        shift_id: ShiftId,
        staff_id: StaffId,
        assigner: StaffId,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let id = AssignmentId::new(&format!("{}:{}", shift_id, staff_id), now);
        Self {
            id,
            shift_id,
            staff_id,
            assigned_by: Some(assigner.clone()),
            status: AssignmentStatus::Pending,
            expires_at: Some(expires_at),
            responded_at: None,
            created_at: now,
            updated_at: now,
            created_by: Some(assigner.clone()),
            updated_by: Some(assigner),
        }
    }

    /// Creates an already-accepted assignment (approval flows)
    pub fn accepted(
        shift_id: ShiftId,
        staff_id: StaffId,
        assigner: StaffId,
        now: DateTime<Utc>,
    ) -> Self {
        let mut assignment = Self::pending(shift_id, staff_id, assigner, now, now);
        assignment.status = AssignmentStatus::Accepted;
        assignment.expires_at = None;
        assignment.responded_at = Some(now);
        assignment
    }

    /// True if the assignment counts toward conflict checks
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// True if pending and past its expiry instant
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == AssignmentStatus::Pending
            && self.expires_at.is_some_and(|at| at < now)
    }

    /// Pending → Accepted; clears the expiry
    pub fn accept(&mut self, now: DateTime<Utc>) {
        self.status = AssignmentStatus::Accepted;
        self.expires_at = None;
        self.responded_at = Some(now);
        self.updated_at = now;
    }

    /// Pending → Rejected; clears the expiry
    pub fn reject(&mut self, now: DateTime<Utc>) {
        self.status = AssignmentStatus::Rejected;
        self.expires_at = None;
        self.responded_at = Some(now);
        self.updated_at = now;
    }

    /// Pending → Expired, driven by the sweeper or a late accept
    pub fn expire(&mut self, now: DateTime<Utc>) {
        self.status = AssignmentStatus::Expired;
        self.expires_at = None;
        self.responded_at = Some(now);
        self.updated_at = now;
    }

    /// Re-targets the assignment and resets it to pending with a fresh
    /// expiry. Used by the update (reassignment) operation.
    pub fn reassign(
        &mut self,
        shift_id: ShiftId,
        staff_id: StaffId,
        assigner: StaffId,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) {
        self.shift_id = shift_id;
        self.staff_id = staff_id;
        self.assigned_by = Some(assigner.clone());
        self.status = AssignmentStatus::Pending;
        self.expires_at = Some(expires_at);
        self.responded_at = None;
        self.updated_at = now;
        self.updated_by = Some(assigner);
    }
}
