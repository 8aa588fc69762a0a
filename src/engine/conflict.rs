//! Conflict checks for candidate assignments
//!
//! Two rules guard every create and reassignment:
//!
//! 1. **Daily cap** — a staff member holds at most two active assignments
//!    whose shift falls on the same UTC calendar day, unless the caller
//!    supplies an override with a non-blank reason. Overrides are
//!    recorded, not silently accepted.
//! 2. **No double-booking** — a staff member's active assignments must
//!    have pairwise non-overlapping shift ranges. Touching endpoints do
//!    not overlap.
//!
//! Both checks are pure: they read the snapshot and mutate nothing.

use chrono::{Days, NaiveDate};

use crate::domain::{AssignmentId, Shift, StaffId};

use super::{EngineError, Snapshot};

/// Active assignments allowed per staff member per calendar day
pub const DAILY_ASSIGNMENT_CAP: usize = 2;

/// An explicit, reasoned request to bypass the daily cap
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideRequest {
    pub enabled: bool,
    pub reason: Option<String>,
}

impl OverrideRequest {
    pub fn new(enabled: bool, reason: Option<String>) -> Self {
        Self { enabled, reason }
    }

    /// An override only counts with a non-blank reason
    pub fn is_valid(&self) -> bool {
        self.enabled
            && self
                .reason
                .as_deref()
                .map_or(false, |r| !r.trim().is_empty())
    }
}

/// Checks the daily cap for `staff_id` on `date`.
///
/// Returns `Ok(true)` when the cap was hit but a valid override was
/// supplied; the caller must then record an OVERRIDE audit event.
pub fn check_daily_limit(
    snapshot: &Snapshot,
    staff_id: &StaffId,
    date: NaiveDate,
    exclude: Option<&AssignmentId>,
    override_request: &OverrideRequest,
) -> Result<bool, EngineError> {
    let count = snapshot.active_count_on_day(staff_id, date, exclude);
    if count < DAILY_ASSIGNMENT_CAP {
        return Ok(false);
    }
    if override_request.is_valid() {
        return Ok(true);
    }
    Err(EngineError::DailyAssignmentLimit)
}

/// Checks the candidate shift against every other active assignment for
/// the staff member in a ±1-day window around the shift date.
pub fn check_overlap(
    snapshot: &Snapshot,
    staff_id: &StaffId,
    candidate: &Shift,
    exclude: Option<&AssignmentId>,
) -> Result<(), EngineError> {
    let range = candidate.range();
    let from = candidate
        .date
        .checked_sub_days(Days::new(1))
        .unwrap_or(candidate.date);
    let to = candidate
        .date
        .checked_add_days(Days::new(1))
        .unwrap_or(candidate.date);

    for (assignment, shift) in snapshot.active_for_staff_in_window(staff_id, from, to, exclude) {
        if shift.id == candidate.id {
            continue;
        }
        if range.overlaps(&shift.range()) {
            return Err(EngineError::ShiftOverlap(assignment.id.clone()));
        }
    }

    Ok(())
}
