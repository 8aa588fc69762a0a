//! Expiry sweep for overdue pending assignments
//!
//! The sweep finds every pending assignment whose expiry instant has
//! passed and transitions it to expired. It is idempotent: a second run
//! at the same instant finds nothing new. Expiry deliberately emits no
//! notifications and no audit rows.

use chrono::{DateTime, Utc};

use crate::domain::AssignmentId;

use super::Snapshot;

/// Outcome of one sweep run
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SweepReport {
    /// Assignments transitioned to expired this run
    pub expired: Vec<AssignmentId>,
    pub swept_at: DateTime<Utc>,
}

impl SweepReport {
    pub fn count(&self) -> usize {
        self.expired.len()
    }
}

/// Expires every pending assignment past its expiry as of `now`
pub fn sweep(snapshot: &mut Snapshot, now: DateTime<Utc>) -> SweepReport {
    let overdue = snapshot.overdue_pending(now);
    for id in &overdue {
        if let Some(assignment) = snapshot.assignments.get_mut(id) {
            assignment.expire(now);
        }
    }

    SweepReport {
        expired: overdue,
        swept_at: now,
    }
}
