//! The assignment state machine
//!
//! `Pending → {Accepted, Rejected, Expired}`; an accepted or terminal
//! assignment re-enters `Pending` only through an update (reassignment).
//!
//! Each operation validates against the snapshot it is given, applies the
//! transition, and returns the resulting record plus the audit and
//! notification effects the caller must dispatch after the write commits.

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::{
    Assignment, AssignmentId, AssignmentStatus, AuditAction, Effect, NotificationKind, Shift,
    ShiftId, Staff, StaffId,
};

use super::conflict::{self, OverrideRequest};
use super::{EngineError, Snapshot};

/// Inputs for creating an assignment
#[derive(Debug, Clone)]
pub struct CreateAssignment {
    pub shift_id: ShiftId,
    pub staff_id: StaffId,
    pub override_request: OverrideRequest,
    /// Skip the pending window and create directly accepted
    /// (approval flows that already have the staff member's consent)
    pub auto_accept: bool,
}

/// Inputs for updating (reassigning) an assignment
#[derive(Debug, Clone)]
pub struct UpdateAssignment {
    pub id: AssignmentId,
    pub shift_id: Option<ShiftId>,
    pub staff_id: Option<StaffId>,
    pub override_request: OverrideRequest,
}

/// Resolves a staff id to a user who may hold assignments.
///
/// Non-staff roles read as not found (schedulers and managers are
/// invisible to the rota as assignees); inactive staff get the more
/// specific error.
pub(super) fn assignable_staff<'a>(
    snapshot: &'a Snapshot,
    id: &StaffId,
) -> Result<&'a Staff, EngineError> {
    let staff = snapshot.staff(id)?;
    if staff.is_assignable() {
        return Ok(staff);
    }
    if staff.role != crate::domain::Role::Staff {
        Err(EngineError::StaffNotFound)
    } else {
        Err(EngineError::StaffInactive)
    }
}

fn pending_notification(staff: &Staff, shift: &Shift, assignment: &Assignment) -> Effect {
    Effect::Notify {
        user_id: staff.id.clone(),
        kind: NotificationKind::ShiftAssigned,
        title: "New shift assignment".to_string(),
        body: format!(
            "You have been assigned to {}. Please accept or reject before it expires.",
            shift.label()
        ),
        data: Some(json!({
            "assignment_id": assignment.id,
            "shift_id": shift.id,
            "expires_at": assignment.expires_at,
        })),
    }
}

fn unassigned_notification(staff_id: &StaffId, shift: &Shift) -> Effect {
    Effect::Notify {
        user_id: staff_id.clone(),
        kind: NotificationKind::ShiftUnassigned,
        title: "Shift unassigned".to_string(),
        body: format!("You are no longer assigned to {}.", shift.label()),
        data: Some(json!({ "shift_id": shift.id })),
    }
}

fn override_audit(assignment: &Assignment, actor: &StaffId, reason: Option<&str>) -> Effect {
    Effect::Audit {
        entity_id: assignment.id.to_string(),
        action: AuditAction::Override,
        actor_id: Some(actor.clone()),
        before: None,
        after: None,
        metadata: Some(json!({ "reason": reason })),
    }
}

/// Creates an assignment for a (shift, staff) pair.
///
/// Validation order: staff exists and is an active staff-role user, shift
/// exists, no active assignment for the pair, daily cap, overlap. On
/// success the record is pending with `expires_at = now + pending_for`,
/// or directly accepted when `auto_accept` is set.
pub fn create(
    snapshot: &mut Snapshot,
    input: CreateAssignment,
    actor: &StaffId,
    pending_for: Duration,
    now: DateTime<Utc>,
) -> Result<(Assignment, Vec<Effect>), EngineError> {
    let staff = assignable_staff(snapshot, &input.staff_id)?.clone();
    let shift = snapshot.shift(&input.shift_id)?.clone();

    if snapshot
        .active_for_pair(&input.shift_id, &input.staff_id, None)
        .is_some()
    {
        return Err(EngineError::AssignmentExists);
    }

    let override_used = conflict::check_daily_limit(
        snapshot,
        &input.staff_id,
        shift.date,
        None,
        &input.override_request,
    )?;
    conflict::check_overlap(snapshot, &input.staff_id, &shift, None)?;

    let assignment = if input.auto_accept {
        Assignment::accepted(input.shift_id, input.staff_id, actor.clone(), now)
    } else {
        Assignment::pending(
            input.shift_id,
            input.staff_id,
            actor.clone(),
            now + pending_for,
            now,
        )
    };
    snapshot.insert_assignment(assignment.clone())?;

    let mut effects = vec![Effect::Audit {
        entity_id: assignment.id.to_string(),
        action: AuditAction::Assign,
        actor_id: Some(actor.clone()),
        before: None,
        after: serde_json::to_value(&assignment).ok(),
        metadata: None,
    }];
    if override_used {
        effects.push(override_audit(
            &assignment,
            actor,
            input.override_request.reason.as_deref(),
        ));
    }

    if assignment.status == AssignmentStatus::Accepted {
        effects.push(Effect::Notify {
            user_id: staff.id.clone(),
            kind: NotificationKind::ShiftAssigned,
            title: "Shift assigned".to_string(),
            body: format!("You have been assigned to {}.", shift.label()),
            data: Some(json!({
                "assignment_id": assignment.id,
                "shift_id": shift.id,
            })),
        });
    } else {
        effects.push(pending_notification(&staff, &shift, &assignment));
    }

    Ok((assignment, effects))
}

/// Updates an assignment's shift and/or staff, re-validating and
/// resetting it to pending with a fresh expiry.
///
/// When neither target changes this is a true no-op: the record is
/// returned untouched and nothing is re-validated, even if override
/// flags were passed. Override flags only matter at creation and
/// reassignment time.
pub fn update(
    snapshot: &mut Snapshot,
    input: UpdateAssignment,
    actor: &StaffId,
    pending_for: Duration,
    now: DateTime<Utc>,
) -> Result<(Assignment, Vec<Effect>), EngineError> {
    let current = snapshot.assignment(&input.id)?.clone();

    let target_shift_id = input.shift_id.unwrap_or_else(|| current.shift_id.clone());
    let target_staff_id = input.staff_id.unwrap_or_else(|| current.staff_id.clone());

    let shift_changed = target_shift_id != current.shift_id;
    let staff_changed = target_staff_id != current.staff_id;
    if !shift_changed && !staff_changed {
        return Ok((current, Vec::new()));
    }

    let staff = assignable_staff(snapshot, &target_staff_id)?.clone();
    let shift = snapshot.shift(&target_shift_id)?.clone();
    let old_shift = snapshot.shift(&current.shift_id).ok().cloned();

    if snapshot
        .active_for_pair(&target_shift_id, &target_staff_id, Some(&current.id))
        .is_some()
    {
        return Err(EngineError::AssignmentExists);
    }

    let override_used = conflict::check_daily_limit(
        snapshot,
        &target_staff_id,
        shift.date,
        Some(&current.id),
        &input.override_request,
    )?;
    conflict::check_overlap(snapshot, &target_staff_id, &shift, Some(&current.id))?;

    let before = serde_json::to_value(&current).ok();
    let assignment = snapshot.assignment_mut(&input.id)?;
    assignment.reassign(
        target_shift_id,
        target_staff_id,
        actor.clone(),
        now + pending_for,
        now,
    );
    let updated = assignment.clone();

    let mut effects = vec![Effect::Audit {
        entity_id: updated.id.to_string(),
        action: AuditAction::Update,
        actor_id: Some(actor.clone()),
        before,
        after: serde_json::to_value(&updated).ok(),
        metadata: None,
    }];
    if override_used {
        effects.push(override_audit(
            &updated,
            actor,
            input.override_request.reason.as_deref(),
        ));
    }

    if staff_changed {
        // Old staff loses the shift; new staff gets a fresh pending ask.
        if let Some(old_shift) = &old_shift {
            effects.push(unassigned_notification(&current.staff_id, old_shift));
        }
        effects.push(pending_notification(&staff, &shift, &updated));
    } else if shift_changed {
        effects.push(Effect::Notify {
            user_id: staff.id.clone(),
            kind: NotificationKind::ShiftChanged,
            title: "Shift changed".to_string(),
            body: format!(
                "Your assignment moved to {}. Please accept or reject again.",
                shift.label()
            ),
            data: Some(json!({
                "assignment_id": updated.id,
                "shift_id": shift.id,
                "expires_at": updated.expires_at,
            })),
        });
    }

    Ok((updated, effects))
}

fn respondable<'a>(
    snapshot: &'a mut Snapshot,
    id: &AssignmentId,
    acting_staff: &StaffId,
    now: DateTime<Utc>,
) -> Result<&'a mut Assignment, EngineError> {
    let assignment = snapshot.assignment_mut(id)?;
    if &assignment.staff_id != acting_staff {
        return Err(EngineError::Forbidden);
    }
    if assignment.status != AssignmentStatus::Pending {
        return Err(EngineError::AssignmentNotPending);
    }
    // A response past the expiry instant races the sweeper; the sweeper
    // wins either way. The caller must still persist the snapshot so
    // the expiry sticks.
    if assignment.is_overdue(now) {
        assignment.expire(now);
        return Err(EngineError::AssignmentExpired);
    }
    Ok(assignment)
}

/// Accepts a pending assignment as the assigned staff member.
///
/// A late accept past `expires_at` transitions the row to expired and
/// fails with [`EngineError::AssignmentExpired`]; the caller must still
/// persist the snapshot so the expiry sticks.
pub fn accept(
    snapshot: &mut Snapshot,
    id: &AssignmentId,
    acting_staff: &StaffId,
    now: DateTime<Utc>,
) -> Result<(Assignment, Vec<Effect>), EngineError> {
    let assignment = respondable(snapshot, id, acting_staff, now)?;
    assignment.accept(now);
    // Deliberate: accepting notifies nobody. Only rejections go back
    // to the assigner.
    Ok((assignment.clone(), Vec::new()))
}

/// Rejects a pending assignment as the assigned staff member and
/// notifies the original assigner.
///
/// Like [`accept`], a late reject past `expires_at` transitions the row
/// to expired and fails with [`EngineError::AssignmentExpired`].
pub fn reject(
    snapshot: &mut Snapshot,
    id: &AssignmentId,
    acting_staff: &StaffId,
    now: DateTime<Utc>,
) -> Result<(Assignment, Vec<Effect>), EngineError> {
    let assignment = respondable(snapshot, id, acting_staff, now)?;
    assignment.reject(now);
    let rejected = assignment.clone();

    let staff_name = snapshot
        .staff(&rejected.staff_id)
        .map(|s| s.name())
        .unwrap_or_else(|_| rejected.staff_id.to_string());
    let shift_label = snapshot
        .shift(&rejected.shift_id)
        .map(|s| s.label())
        .unwrap_or_else(|_| "a shift".to_string());

    let mut effects = Vec::new();
    if let Some(assigner) = &rejected.assigned_by {
        effects.push(Effect::Notify {
            user_id: assigner.clone(),
            kind: NotificationKind::AssignmentRejected,
            title: "Assignment rejected".to_string(),
            body: format!("{} rejected {}.", staff_name, shift_label),
            data: Some(json!({
                "assignment_id": rejected.id,
                "shift_id": rejected.shift_id,
            })),
        });
    }

    Ok((rejected, effects))
}

/// Hard-deletes an assignment regardless of status
pub fn remove(
    snapshot: &mut Snapshot,
    id: &AssignmentId,
    actor: &StaffId,
) -> Result<(Assignment, Vec<Effect>), EngineError> {
    let removed = snapshot
        .assignments
        .remove(id)
        .ok_or(EngineError::AssignmentNotFound)?;

    let mut effects = vec![Effect::Audit {
        entity_id: removed.id.to_string(),
        action: AuditAction::Unassign,
        actor_id: Some(actor.clone()),
        before: serde_json::to_value(&removed).ok(),
        after: None,
        metadata: None,
    }];
    if let Ok(shift) = snapshot.shift(&removed.shift_id) {
        effects.push(unassigned_notification(&removed.staff_id, shift));
    }

    Ok((removed, effects))
}
