//! In-memory view of all rota records
//!
//! The storage layer loads a snapshot under an exclusive workspace lock,
//! engine operations validate and mutate it, and the storage layer writes
//! it back before the lock is released. Re-reading under the lock is what
//! closes the check-then-act race between concurrent commands.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    ApplicationId, Assignment, AssignmentId, House, HouseId, Shift, ShiftApplication, ShiftId,
    ShiftTemplate, Staff, StaffId, TemplateId,
};

use super::EngineError;

/// All records, keyed by id
#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    pub houses: HashMap<HouseId, House>,
    pub staff: HashMap<StaffId, Staff>,
    pub shifts: HashMap<ShiftId, Shift>,
    pub assignments: HashMap<AssignmentId, Assignment>,
    pub templates: HashMap<TemplateId, ShiftTemplate>,
    pub applications: HashMap<ApplicationId, ShiftApplication>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn house(&self, id: &HouseId) -> Result<&House, EngineError> {
        self.houses.get(id).ok_or(EngineError::HouseNotFound)
    }

    pub fn staff(&self, id: &StaffId) -> Result<&Staff, EngineError> {
        self.staff.get(id).ok_or(EngineError::StaffNotFound)
    }

    pub fn shift(&self, id: &ShiftId) -> Result<&Shift, EngineError> {
        self.shifts.get(id).ok_or(EngineError::ShiftNotFound)
    }

    pub fn assignment(&self, id: &AssignmentId) -> Result<&Assignment, EngineError> {
        self.assignments
            .get(id)
            .ok_or(EngineError::AssignmentNotFound)
    }

    pub fn assignment_mut(&mut self, id: &AssignmentId) -> Result<&mut Assignment, EngineError> {
        self.assignments
            .get_mut(id)
            .ok_or(EngineError::AssignmentNotFound)
    }

    pub fn template(&self, id: &TemplateId) -> Result<&ShiftTemplate, EngineError> {
        self.templates.get(id).ok_or(EngineError::TemplateNotFound)
    }

    pub fn application(&self, id: &ApplicationId) -> Result<&ShiftApplication, EngineError> {
        self.applications
            .get(id)
            .ok_or(EngineError::ApplicationNotFound)
    }

    pub fn application_mut(
        &mut self,
        id: &ApplicationId,
    ) -> Result<&mut ShiftApplication, EngineError> {
        self.applications
            .get_mut(id)
            .ok_or(EngineError::ApplicationNotFound)
    }

    /// Looks up any assignment for a (shift, staff) pair, regardless of
    /// status. A past rejection or expiry still counts here: applying to
    /// a shift one was ever assigned to goes back through the scheduler.
    pub fn assignment_for_pair(
        &self,
        shift_id: &ShiftId,
        staff_id: &StaffId,
    ) -> Option<&Assignment> {
        self.assignments
            .values()
            .find(|a| &a.shift_id == shift_id && &a.staff_id == staff_id)
    }

    /// Looks up the application for a (shift, staff) pair, any status.
    /// One application per pair, ever: decided applications block re-applying.
    pub fn application_for_pair(
        &self,
        shift_id: &ShiftId,
        staff_id: &StaffId,
    ) -> Option<&ShiftApplication> {
        self.applications
            .values()
            .find(|a| &a.shift_id == shift_id && &a.staff_id == staff_id)
    }

    /// Looks up the active assignment for a (shift, staff) pair, if any.
    /// Rejected and expired assignments never block the pair.
    pub fn active_for_pair(
        &self,
        shift_id: &ShiftId,
        staff_id: &StaffId,
        exclude: Option<&AssignmentId>,
    ) -> Option<&Assignment> {
        self.assignments.values().find(|a| {
            a.is_active()
                && &a.shift_id == shift_id
                && &a.staff_id == staff_id
                && Some(&a.id) != exclude
        })
    }

    /// Active assignments for a staff member whose shift date falls in the
    /// inclusive `[from, to]` day window, paired with their shifts.
    ///
    /// A ±1-day window around a target date is sufficient context for
    /// overlap checks since no shift exceeds 24 hours.
    pub fn active_for_staff_in_window(
        &self,
        staff_id: &StaffId,
        from: NaiveDate,
        to: NaiveDate,
        exclude: Option<&AssignmentId>,
    ) -> Vec<(&Assignment, &Shift)> {
        self.assignments
            .values()
            .filter(|a| a.is_active() && &a.staff_id == staff_id && Some(&a.id) != exclude)
            .filter_map(|a| self.shifts.get(&a.shift_id).map(|s| (a, s)))
            .filter(|(_, s)| s.date >= from && s.date <= to)
            .collect()
    }

    /// Count of a staff member's active assignments on one calendar day
    pub fn active_count_on_day(
        &self,
        staff_id: &StaffId,
        date: NaiveDate,
        exclude: Option<&AssignmentId>,
    ) -> usize {
        self.active_for_staff_in_window(staff_id, date, date, exclude)
            .len()
    }

    /// Pending assignments past their expiry, oldest first
    pub fn overdue_pending(&self, now: DateTime<Utc>) -> Vec<AssignmentId> {
        let mut overdue: Vec<_> = self
            .assignments
            .values()
            .filter(|a| a.is_overdue(now))
            .collect();
        overdue.sort_by_key(|a| a.expires_at);
        overdue.into_iter().map(|a| a.id.clone()).collect()
    }

    /// Inserts a new assignment, enforcing pair uniqueness as a final
    /// backstop at the write boundary.
    pub fn insert_assignment(&mut self, assignment: Assignment) -> Result<(), EngineError> {
        if assignment.is_active()
            && self
                .active_for_pair(&assignment.shift_id, &assignment.staff_id, Some(&assignment.id))
                .is_some()
        {
            return Err(EngineError::AssignmentExists);
        }
        self.assignments.insert(assignment.id.clone(), assignment);
        Ok(())
    }

    /// Shifts whose date falls in the inclusive `[from, to]` window,
    /// optionally restricted to one house, ordered by date then start time
    pub fn shifts_in_range(
        &self,
        house_id: Option<&HouseId>,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Vec<&Shift> {
        let mut shifts: Vec<_> = self
            .shifts
            .values()
            .filter(|s| s.date >= from && s.date <= to)
            .filter(|s| house_id.map_or(true, |h| &s.house_id == h))
            .collect();
        shifts.sort_by_key(|s| (s.date, s.start_time, s.id.clone()));
        shifts
    }

    /// Assignments attached to a shift, any status
    pub fn assignments_for_shift(&self, shift_id: &ShiftId) -> Vec<&Assignment> {
        let mut assignments: Vec<_> = self
            .assignments
            .values()
            .filter(|a| &a.shift_id == shift_id)
            .collect();
        assignments.sort_by_key(|a| (a.created_at, a.id.clone()));
        assignments
    }
}
