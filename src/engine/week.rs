//! Week aggregation: the read side of the rota
//!
//! Builds a denormalized view of all houses, their shifts for a
//! Monday-aligned 7-day window, and every assignment on those shifts
//! (any status; callers filter as needed). Pure read path, independent
//! of the state machine.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::{
    time, AssignmentId, AssignmentStatus, Gender, HouseId, Shift, ShiftId, ShiftType, StaffId,
    TimeOfDay,
};

use super::{EngineError, Snapshot};

/// One assignment as shown on the rota
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignmentView {
    pub id: AssignmentId,
    pub staff_id: StaffId,
    pub staff_name: String,
    pub staff_gender: Gender,
    pub status: AssignmentStatus,
}

/// Who last edited a shift
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorView {
    pub id: StaffId,
    pub name: String,
}

/// One shift as shown on the rota
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftView {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub ends_next_day: bool,
    pub shift_type: ShiftType,
    pub required_staff: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub assignments: Vec<AssignmentView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<EditorView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,
}

/// One house with its shifts for the week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseWeek {
    pub id: HouseId,
    pub name: String,
    pub location: String,
    pub shifts: Vec<ShiftView>,
}

/// The full weekly rota
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub houses: Vec<HouseWeek>,
}

fn shift_view(snapshot: &Snapshot, shift: &Shift) -> ShiftView {
    let assignments = snapshot
        .assignments_for_shift(&shift.id)
        .into_iter()
        .map(|a| {
            let (staff_name, staff_gender) = snapshot
                .staff(&a.staff_id)
                .map(|s| (s.name(), s.gender))
                .unwrap_or_else(|_| (a.staff_id.to_string(), Gender::Unspecified));
            AssignmentView {
                id: a.id.clone(),
                staff_id: a.staff_id.clone(),
                staff_name,
                staff_gender,
                status: a.status,
            }
        })
        .collect();

    let last_edited_by = shift.last_edited_by.as_ref().map(|id| EditorView {
        id: id.clone(),
        name: snapshot
            .staff(id)
            .map(|s| s.name())
            .unwrap_or_else(|_| id.to_string()),
    });

    ShiftView {
        id: shift.id.clone(),
        date: shift.date,
        start_time: shift.start_time,
        end_time: shift.end_time,
        ends_next_day: shift.ends_next_day(),
        shift_type: shift.shift_type,
        required_staff: shift.required_staff,
        name: shift.name.clone(),
        assignments,
        last_edited_by,
        last_edited_at: shift.last_edited_at,
    }
}

/// Builds the rota for the week starting at `week_start` (a Monday)
pub fn week_view(snapshot: &Snapshot, week_start: NaiveDate) -> Result<WeekView, EngineError> {
    let week_start = time::monday_of(week_start)?;
    let week_end = time::week_end(week_start);

    let mut houses: Vec<_> = snapshot.houses.values().collect();
    houses.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

    let houses = houses
        .into_iter()
        .map(|house| HouseWeek {
            id: house.id.clone(),
            name: house.name.clone(),
            location: house.location.clone(),
            shifts: snapshot
                .shifts_in_range(Some(&house.id), week_start, week_end)
                .into_iter()
                .map(|shift| shift_view(snapshot, shift))
                .collect(),
        })
        .collect();

    Ok(WeekView {
        week_start,
        week_end,
        houses,
    })
}

/// Clones every shift (never assignments) from one Monday-week into
/// another, preserving relative day offsets.
pub fn copy_week(
    snapshot: &mut Snapshot,
    from: NaiveDate,
    to: NaiveDate,
    actor: &StaffId,
    now: DateTime<Utc>,
) -> Result<Vec<Shift>, EngineError> {
    let from = time::monday_of(from)?;
    let to = time::monday_of(to)?;
    let from_end = time::week_end(from);

    let sources: Vec<Shift> = snapshot
        .shifts_in_range(None, from, from_end)
        .into_iter()
        .cloned()
        .collect();
    if sources.is_empty() {
        return Err(EngineError::NoShifts);
    }

    let mut created = Vec::with_capacity(sources.len());
    for (seq, source) in sources.into_iter().enumerate() {
        let offset = (source.date - from).num_days() as u64;
        let date = to + Days::new(offset);

        let mut shift = Shift::new(
            source.house_id.clone(),
            date,
            source.start_time,
            source.end_time,
            source.shift_type,
            source.required_staff,
            source.name.clone(),
            now + chrono::Duration::milliseconds(seq as i64),
        );
        shift.notes = source.notes.clone();
        shift.touch(actor.clone(), now);

        snapshot.shifts.insert(shift.id.clone(), shift.clone());
        created.push(shift);
    }

    Ok(created)
}

/// A shift with unfilled accepted slots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenShift {
    #[serde(flatten)]
    pub shift: ShiftView,
    pub assigned_count: u32,
    pub open_slots: u32,
}

/// Shifts in `[from, to]` whose accepted assignments have not filled the
/// required staff count
pub fn open_shifts(
    snapshot: &Snapshot,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<OpenShift>, EngineError> {
    let (from, to) = time::date_range(from, to)?;

    Ok(snapshot
        .shifts_in_range(None, from, to)
        .into_iter()
        .filter_map(|shift| {
            let accepted = snapshot
                .assignments_for_shift(&shift.id)
                .iter()
                .filter(|a| a.status == AssignmentStatus::Accepted)
                .count() as u32;
            if accepted < shift.required_staff {
                Some(OpenShift {
                    shift: shift_view(snapshot, shift),
                    assigned_count: accepted,
                    open_slots: shift.required_staff - accepted,
                })
            } else {
                None
            }
        })
        .collect())
}
