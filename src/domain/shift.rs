//! Shift records
//!
//! A shift is a scheduled work period at a house on a calendar day.
//! Shifts are immutable with respect to assignment operations: assigning
//! or unassigning staff never mutates the shift itself.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::id::{HouseId, ShiftId, StaffId};
use super::time::{self, ShiftRange, TimeOfDay};

/// Broad category of a shift, carried for display and templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShiftType {
    #[default]
    Day,
    Night,
    Sleepin,
}

impl ShiftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftType::Day => "day",
            ShiftType::Night => "night",
            ShiftType::Sleepin => "sleepin",
        }
    }
}

impl std::str::FromStr for ShiftType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "day" => Ok(ShiftType::Day),
            "night" => Ok(ShiftType::Night),
            "sleepin" => Ok(ShiftType::Sleepin),
            other => Err(format!(
                "unknown shift type '{}' (expected day, night, or sleepin)",
                other
            )),
        }
    }
}

/// A scheduled work period at a house
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shift {
    /// Unique identifier
    pub id: ShiftId,

    pub house_id: HouseId,

    /// UTC calendar day the shift starts on
    pub date: NaiveDate,

    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,

    #[serde(default)]
    pub shift_type: ShiftType,

    /// How many staff this shift needs, at least 1
    pub required_staff: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_by: Option<StaffId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shift {
    /// Creates a new shift
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        house_id: HouseId,
        date: NaiveDate,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        shift_type: ShiftType,
        required_staff: u32,
        name: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let label = name.clone().unwrap_or_else(|| format!("{} shift", date));
        Self {
            id: ShiftId::new(&label, now),
            house_id,
            date,
            start_time,
            end_time,
            shift_type,
            required_staff: required_staff.max(1),
            name,
            notes: None,
            last_edited_by: None,
            last_edited_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The absolute interval this shift occupies
    pub fn range(&self) -> ShiftRange {
        ShiftRange::of(self.date, self.start_time, self.end_time)
    }

    /// True if the shift crosses midnight (or start == end)
    pub fn ends_next_day(&self) -> bool {
        time::ends_next_day(self.start_time, self.end_time)
    }

    /// Display label, falling back to type + date
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{} shift on {}", self.shift_type.as_str(), self.date),
        }
    }

    /// Records who last touched the shift record
    pub fn touch(&mut self, editor: StaffId, now: DateTime<Utc>) {
        self.last_edited_by = Some(editor);
        self.last_edited_at = Some(now);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::time::parse_date;

    fn make_shift(start: &str, end: &str) -> Shift {
        Shift::new(
            HouseId::new("Main", Utc::now()),
            parse_date("2026-01-06").unwrap(),
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
            ShiftType::Day,
            1,
            Some("Early".to_string()),
            Utc::now(),
        )
    }

    #[test]
    fn day_shift_does_not_end_next_day() {
        assert!(!make_shift("08:00", "20:00").ends_next_day());
    }

    #[test]
    fn night_shift_ends_next_day() {
        assert!(make_shift("20:00", "08:00").ends_next_day());
    }

    #[test]
    fn required_staff_floors_at_one() {
        let shift = Shift::new(
            HouseId::new("Main", Utc::now()),
            parse_date("2026-01-06").unwrap(),
            TimeOfDay::parse("08:00").unwrap(),
            TimeOfDay::parse("20:00").unwrap(),
            ShiftType::Day,
            0,
            None,
            Utc::now(),
        );
        assert_eq!(shift.required_staff, 1);
    }

    #[test]
    fn serde_roundtrip() {
        let shift = make_shift("20:00", "08:00");
        let json = serde_json::to_string(&shift).unwrap();
        let back: Shift = serde_json::from_str(&json).unwrap();
        assert_eq!(back, shift);
    }
}
