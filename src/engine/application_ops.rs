//! Shift applications: staff ask, schedulers decide
//!
//! The inverse flow of a proposed assignment. A staff member applies to
//! a shift; a scheduler approves (which creates a directly-accepted
//! assignment, since the application is the staff member's consent) or
//! rejects it. Either decision is final and notifies the applicant.

use chrono::{DateTime, Days, Duration, NaiveDate, Utc};
use serde::Serialize;
use serde_json::json;

use crate::domain::{
    ApplicationId, ApplicationStatus, Assignment, Effect, NotificationKind, ShiftApplication,
    ShiftId, StaffId,
};

use super::assignment_ops::{self, CreateAssignment};
use super::conflict::OverrideRequest;
use super::{EngineError, Snapshot};

/// Files an application for a (shift, staff) pair.
///
/// Any prior assignment for the pair blocks applying, whatever its
/// status: a pair with history goes back through the scheduler. One
/// application per pair, ever.
pub fn apply(
    snapshot: &mut Snapshot,
    shift_id: ShiftId,
    staff_id: StaffId,
    now: DateTime<Utc>,
) -> Result<ShiftApplication, EngineError> {
    assignment_ops::assignable_staff(snapshot, &staff_id)?;
    snapshot.shift(&shift_id)?;

    if snapshot.assignment_for_pair(&shift_id, &staff_id).is_some() {
        return Err(EngineError::AlreadyAssigned);
    }
    if snapshot.application_for_pair(&shift_id, &staff_id).is_some() {
        return Err(EngineError::ApplicationExists);
    }

    let application = ShiftApplication::new(shift_id, staff_id, now);
    snapshot
        .applications
        .insert(application.id.clone(), application.clone());

    Ok(application)
}

fn pending_application(
    snapshot: &Snapshot,
    id: &ApplicationId,
) -> Result<ShiftApplication, EngineError> {
    let application = snapshot.application(id)?;
    if !application.is_pending() {
        return Err(EngineError::ApplicationDecided);
    }
    Ok(application.clone())
}

/// Approves a pending application as a scheduler.
///
/// Creates the auto-accepted assignment first; if the conflict rules
/// reject it (the staff member picked up other work since applying),
/// the approval fails and the application stays pending. No override
/// path here: a cap-breaking application needs a manual assignment.
pub fn approve(
    snapshot: &mut Snapshot,
    id: &ApplicationId,
    actor: &StaffId,
    now: DateTime<Utc>,
) -> Result<(ShiftApplication, Assignment, Vec<Effect>), EngineError> {
    let application = pending_application(snapshot, id)?;
    let shift_label = snapshot.shift(&application.shift_id)?.label();

    let (assignment, mut effects) = assignment_ops::create(
        snapshot,
        CreateAssignment {
            shift_id: application.shift_id.clone(),
            staff_id: application.staff_id.clone(),
            override_request: OverrideRequest::default(),
            auto_accept: true,
        },
        actor,
        Duration::zero(),
        now,
    )?;

    let application = snapshot.application_mut(id)?;
    application.approve(actor.clone(), now);
    let approved = application.clone();

    effects.push(Effect::Notify {
        user_id: approved.staff_id.clone(),
        kind: NotificationKind::ApplicationApproved,
        title: "Shift application approved".to_string(),
        body: format!("You have been assigned to {}.", shift_label),
        data: Some(json!({
            "application_id": approved.id,
            "shift_id": approved.shift_id,
            "assignment_id": assignment.id,
        })),
    });

    Ok((approved, assignment, effects))
}

/// Rejects a pending application as a scheduler and notifies the
/// applicant.
pub fn reject(
    snapshot: &mut Snapshot,
    id: &ApplicationId,
    actor: &StaffId,
    now: DateTime<Utc>,
) -> Result<(ShiftApplication, Vec<Effect>), EngineError> {
    let application = pending_application(snapshot, id)?;
    let shift_label = snapshot
        .shift(&application.shift_id)
        .map(|s| s.label())
        .unwrap_or_else(|_| "a shift".to_string());

    let application = snapshot.application_mut(id)?;
    application.reject(actor.clone(), now);
    let rejected = application.clone();

    let effects = vec![Effect::Notify {
        user_id: rejected.staff_id.clone(),
        kind: NotificationKind::ApplicationRejected,
        title: "Shift application rejected".to_string(),
        body: format!("Your application for {} was rejected.", shift_label),
        data: Some(json!({
            "application_id": rejected.id,
            "shift_id": rejected.shift_id,
        })),
    }];

    Ok((rejected, effects))
}

/// One application joined with its shift and applicant, for listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub shift_id: ShiftId,
    pub shift_date: NaiveDate,
    pub shift_label: String,
    pub staff_id: StaffId,
    pub staff_name: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Applications whose shift falls in the 7-day window starting at
/// `start` (any day, not just Mondays), newest first
pub fn list_for_week(snapshot: &Snapshot, start: NaiveDate) -> Vec<ApplicationView> {
    let end = start + Days::new(6);

    let mut views: Vec<_> = snapshot
        .applications
        .values()
        .filter_map(|a| {
            let shift = snapshot.shifts.get(&a.shift_id)?;
            if shift.date < start || shift.date > end {
                return None;
            }
            let staff_name = snapshot
                .staff(&a.staff_id)
                .map(|s| s.name())
                .unwrap_or_else(|_| a.staff_id.to_string());
            Some(ApplicationView {
                id: a.id.clone(),
                shift_id: a.shift_id.clone(),
                shift_date: shift.date,
                shift_label: shift.label(),
                staff_id: a.staff_id.clone(),
                staff_name,
                status: a.status,
                created_at: a.created_at,
            })
        })
        .collect();
    views.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    views
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AssignmentStatus, Gender, House, HouseId, Role, Shift, ShiftType, Staff, TimeOfDay,
    };

    struct Fixture {
        snap: Snapshot,
        house_id: HouseId,
        staff_id: StaffId,
        scheduler_id: StaffId,
        now: DateTime<Utc>,
    }

    fn fixture() -> Fixture {
        let now = Utc::now();
        let mut snap = Snapshot::new();

        let house = House::new("Main", "North St", now);
        let house_id = house.id.clone();
        snap.houses.insert(house_id.clone(), house);

        let staff = Staff::new("Ada", "Lovelace", Role::Staff, Gender::Female, now);
        let staff_id = staff.id.clone();
        snap.staff.insert(staff_id.clone(), staff);

        let scheduler = Staff::new("Sam", "Planner", Role::Scheduler, Gender::Unspecified, now);
        let scheduler_id = scheduler.id.clone();
        snap.staff.insert(scheduler_id.clone(), scheduler);

        Fixture {
            snap,
            house_id,
            staff_id,
            scheduler_id,
            now,
        }
    }

    fn add_shift(f: &mut Fixture, date: &str, start: &str, end: &str) -> ShiftId {
        let shift = Shift::new(
            f.house_id.clone(),
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
            ShiftType::Day,
            1,
            Some(format!("{} {}", date, start)),
            f.now,
        );
        let id = shift.id.clone();
        f.snap.shifts.insert(id.clone(), shift);
        f.now += Duration::milliseconds(1);
        id
    }

    #[test]
    fn apply_creates_pending_application() {
        let mut f = fixture();
        let shift = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let staff = f.staff_id.clone();

        let application = apply(&mut f.snap, shift.clone(), staff.clone(), f.now).unwrap();

        assert!(application.is_pending());
        assert_eq!(application.shift_id, shift);
        assert!(f
            .snap
            .application_for_pair(&shift, &staff)
            .is_some());
    }

    #[test]
    fn only_active_staff_may_apply() {
        let mut f = fixture();
        let shift = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let scheduler = f.scheduler_id.clone();

        assert_eq!(
            apply(&mut f.snap, shift, scheduler, f.now).unwrap_err(),
            EngineError::StaffNotFound
        );
    }

    #[test]
    fn prior_assignment_blocks_applying_whatever_its_status() {
        let mut f = fixture();
        let shift = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let actor = f.scheduler_id.clone();
        let staff = f.staff_id.clone();
        let now = f.now;

        let (a, _) = assignment_ops::create(
            &mut f.snap,
            CreateAssignment {
                shift_id: shift.clone(),
                staff_id: staff.clone(),
                override_request: OverrideRequest::default(),
                auto_accept: false,
            },
            &actor,
            Duration::minutes(10),
            now,
        )
        .unwrap();
        assignment_ops::reject(&mut f.snap, &a.id, &staff, now).unwrap();

        // Even a rejected assignment sends the pair back through the scheduler
        assert_eq!(
            apply(&mut f.snap, shift, staff, now).unwrap_err(),
            EngineError::AlreadyAssigned
        );
    }

    #[test]
    fn one_application_per_pair() {
        let mut f = fixture();
        let shift = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let staff = f.staff_id.clone();

        apply(&mut f.snap, shift.clone(), staff.clone(), f.now).unwrap();
        assert_eq!(
            apply(&mut f.snap, shift, staff, f.now).unwrap_err(),
            EngineError::ApplicationExists
        );
    }

    #[test]
    fn approve_creates_accepted_assignment_and_notifies() {
        let mut f = fixture();
        let shift = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let staff = f.staff_id.clone();
        let scheduler = f.scheduler_id.clone();
        let now = f.now;

        let application = apply(&mut f.snap, shift.clone(), staff.clone(), now).unwrap();
        let (approved, assignment, effects) =
            approve(&mut f.snap, &application.id, &scheduler, now).unwrap();

        assert_eq!(approved.status, ApplicationStatus::Approved);
        assert_eq!(approved.decided_by, Some(scheduler));
        assert_eq!(assignment.status, AssignmentStatus::Accepted);
        assert_eq!(assignment.shift_id, shift);
        assert_eq!(assignment.staff_id, staff);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Notify { kind: NotificationKind::ApplicationApproved, .. }
        )));
        // The assignment creation itself is audited as usual
        assert!(effects
            .iter()
            .any(|e| matches!(e, Effect::Audit { .. })));
    }

    #[test]
    fn approve_fails_when_conflict_rules_do() {
        let mut f = fixture();
        let wanted = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let clashing = add_shift(&mut f, "2026-01-06", "12:00", "22:00");
        let staff = f.staff_id.clone();
        let scheduler = f.scheduler_id.clone();
        let now = f.now;

        let application = apply(&mut f.snap, wanted, staff.clone(), now).unwrap();

        // The staff member picked up overlapping work after applying
        assignment_ops::create(
            &mut f.snap,
            CreateAssignment {
                shift_id: clashing,
                staff_id: staff,
                override_request: OverrideRequest::default(),
                auto_accept: true,
            },
            &scheduler,
            Duration::minutes(10),
            now,
        )
        .unwrap();

        assert!(matches!(
            approve(&mut f.snap, &application.id, &scheduler, now).unwrap_err(),
            EngineError::ShiftOverlap(_)
        ));
        // The application stays pending for a later decision
        assert!(f.snap.application(&application.id).unwrap().is_pending());
    }

    #[test]
    fn decided_applications_cannot_be_decided_again() {
        let mut f = fixture();
        let shift = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let staff = f.staff_id.clone();
        let scheduler = f.scheduler_id.clone();
        let now = f.now;

        let application = apply(&mut f.snap, shift, staff, now).unwrap();
        reject(&mut f.snap, &application.id, &scheduler, now).unwrap();

        assert_eq!(
            approve(&mut f.snap, &application.id, &scheduler, now).unwrap_err(),
            EngineError::ApplicationDecided
        );
        assert_eq!(
            reject(&mut f.snap, &application.id, &scheduler, now).unwrap_err(),
            EngineError::ApplicationDecided
        );
    }

    #[test]
    fn reject_notifies_the_applicant() {
        let mut f = fixture();
        let shift = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let staff = f.staff_id.clone();
        let scheduler = f.scheduler_id.clone();
        let now = f.now;

        let application = apply(&mut f.snap, shift, staff.clone(), now).unwrap();
        let (rejected, effects) = reject(&mut f.snap, &application.id, &scheduler, now).unwrap();

        assert_eq!(rejected.status, ApplicationStatus::Rejected);
        assert!(effects.iter().any(|e| matches!(
            e,
            Effect::Notify { user_id, kind: NotificationKind::ApplicationRejected, .. }
                if *user_id == staff
        )));
    }

    #[test]
    fn week_listing_joins_and_filters_by_shift_date() {
        let mut f = fixture();
        let inside = add_shift(&mut f, "2026-01-06", "08:00", "20:00");
        let outside = add_shift(&mut f, "2026-01-20", "08:00", "20:00");
        let staff = f.staff_id.clone();

        apply(&mut f.snap, inside.clone(), staff.clone(), f.now).unwrap();
        apply(&mut f.snap, outside, staff, f.now + Duration::seconds(1)).unwrap();

        let views = list_for_week(&f.snap, NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].shift_id, inside);
        assert_eq!(views[0].staff_name, "Ada Lovelace");
    }
}
