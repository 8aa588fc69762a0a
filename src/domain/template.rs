//! Reusable week templates
//!
//! A template snapshots a week's shifts keyed by day-of-week so the same
//! pattern can be materialized into any Monday-aligned week. Templates
//! carry shift shape only, never assignments.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};

use super::id::{HouseId, StaffId, TemplateId};
use super::shift::ShiftType;
use super::time::TimeOfDay;

/// One shift pattern within a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateItem {
    pub house_id: HouseId,

    /// Day the shift falls on when the template is applied
    pub day_of_week: Weekday,

    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub shift_type: ShiftType,
    pub required_staff: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TemplateItem {
    /// Offset in days from the Monday week start
    pub fn day_offset(&self) -> u64 {
        u64::from(self.day_of_week.num_days_from_monday())
    }
}

/// A named, reusable weekly shift pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub id: TemplateId,
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<StaffId>,

    pub items: Vec<TemplateItem>,

    pub created_at: DateTime<Utc>,
}

impl ShiftTemplate {
    pub fn new(
        name: impl Into<String>,
        created_by: StaffId,
        items: Vec<TemplateItem>,
        now: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        Self {
            id: TemplateId::new(&name, now),
            name,
            created_by: Some(created_by),
            items,
            created_at: now,
        }
    }
}
