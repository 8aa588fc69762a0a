//! Week templates: snapshot a week's shifts, re-materialize them later
//!
//! Templates generalize copy-week. Creating one records the shape of
//! every shift in a Monday-week keyed by day-of-week; applying one
//! creates fresh shifts in any target Monday-week. Assignments are never
//! part of a template.

use chrono::{DateTime, Days, Datelike, NaiveDate, Utc};

use crate::domain::{time, Shift, ShiftTemplate, StaffId, TemplateId, TemplateItem};

use super::{EngineError, Snapshot};

/// Snapshots the shifts of the week starting at `week_start` into a
/// named template
pub fn create_from_week(
    snapshot: &mut Snapshot,
    name: &str,
    week_start: NaiveDate,
    actor: &StaffId,
    now: DateTime<Utc>,
) -> Result<ShiftTemplate, EngineError> {
    let week_start = time::monday_of(week_start)?;
    let week_end = time::week_end(week_start);

    let items: Vec<TemplateItem> = snapshot
        .shifts_in_range(None, week_start, week_end)
        .into_iter()
        .map(|shift| TemplateItem {
            house_id: shift.house_id.clone(),
            day_of_week: shift.date.weekday(),
            start_time: shift.start_time,
            end_time: shift.end_time,
            shift_type: shift.shift_type,
            required_staff: shift.required_staff,
            name: shift.name.clone(),
        })
        .collect();
    if items.is_empty() {
        return Err(EngineError::NoShifts);
    }

    let template = ShiftTemplate::new(name, actor.clone(), items, now);
    snapshot
        .templates
        .insert(template.id.clone(), template.clone());

    Ok(template)
}

/// Materializes a template into the week starting at `week_start`
pub fn apply(
    snapshot: &mut Snapshot,
    template_id: &TemplateId,
    week_start: NaiveDate,
    actor: &StaffId,
    now: DateTime<Utc>,
) -> Result<Vec<Shift>, EngineError> {
    let week_start = time::monday_of(week_start)?;
    let template = snapshot.template(template_id)?.clone();

    let mut created = Vec::with_capacity(template.items.len());
    for (seq, item) in template.items.iter().enumerate() {
        let date = week_start + Days::new(item.day_offset());

        let mut shift = Shift::new(
            item.house_id.clone(),
            date,
            item.start_time,
            item.end_time,
            item.shift_type,
            item.required_staff,
            item.name.clone(),
            now + chrono::Duration::milliseconds(seq as i64),
        );
        shift.touch(actor.clone(), now);

        snapshot.shifts.insert(shift.id.clone(), shift.clone());
        created.push(shift);
    }

    Ok(created)
}
