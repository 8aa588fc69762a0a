//! Shift application records
//!
//! The inverse of a proposed assignment: a staff member asks for a
//! shift, and a scheduler decides. Approval creates a directly-accepted
//! assignment (the applicant's consent is the application itself), so
//! applications never carry an expiry window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ApplicationId, ShiftId, StaffId};

/// Status of a shift application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }
}

/// A staff member's request to work a shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftApplication {
    /// Unique identifier
    pub id: ApplicationId,

    pub shift_id: ShiftId,
    pub staff_id: StaffId,

    pub status: ApplicationStatus,

    /// Scheduler who approved or rejected, set on decision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_by: Option<StaffId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decided_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShiftApplication {
    /// Creates a pending application
    pub fn new(shift_id: ShiftId, staff_id: StaffId, now: DateTime<Utc>) -> Self {
        let id = ApplicationId::new(&format!("{}/{}", shift_id, staff_id), now);
        Self {
            id,
            shift_id,
            staff_id,
            status: ApplicationStatus::Pending,
            decided_by: None,
            decided_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Marks the application approved
    pub fn approve(&mut self, decided_by: StaffId, now: DateTime<Utc>) {
        self.status = ApplicationStatus::Approved;
        self.decided_by = Some(decided_by);
        self.decided_at = Some(now);
        self.updated_at = now;
    }

    /// Marks the application rejected
    pub fn reject(&mut self, decided_by: StaffId, now: DateTime<Utc>) {
        self.status = ApplicationStatus::Rejected;
        self.decided_by = Some(decided_by);
        self.decided_at = Some(now);
        self.updated_at = now;
    }
}
