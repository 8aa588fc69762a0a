//! Wall-clock times, shift ranges, and week arithmetic
//!
//! Shifts store their date as a plain UTC calendar day and their start/end
//! as "HH:MM" wall-clock strings. A shift whose end is at or before its
//! start rolls over to the next calendar day (an overnight shift).

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TimeError {
    #[error("Invalid time format: expected 'HH:MM' with hours 00-23 and minutes 00-59, got '{0}'")]
    InvalidTimeFormat(String),

    #[error("Invalid date: expected 'YYYY-MM-DD', got '{0}'")]
    InvalidDate(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    #[error("Week start must be a Monday, got {0}")]
    InvalidWeekStart(NaiveDate),
}

/// A wall-clock time of day, minute resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
}

impl TimeOfDay {
    /// Parses a strict "HH:MM" string
    pub fn parse(value: &str) -> Result<Self, TimeError> {
        let invalid = || TimeError::InvalidTimeFormat(value.to_string());

        let (h, m) = value.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        if !h.bytes().all(|b| b.is_ascii_digit()) || !m.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }

        Ok(Self { hour, minute })
    }

    /// Minutes since midnight
    pub fn minutes(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }

    /// Anchors this wall-clock time onto a UTC calendar day
    pub fn on(&self, date: NaiveDate) -> DateTime<Utc> {
        let naive = date
            .and_hms_opt(u32::from(self.hour), u32::from(self.minute), 0)
            .expect("hour/minute validated at parse time");
        Utc.from_utc_datetime(&naive)
    }
}

impl std::fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(t: TimeOfDay) -> Self {
        t.to_string()
    }
}

/// The absolute interval a shift occupies
///
/// Half-open: a shift ending at 20:00 does not overlap one starting
/// at 20:00. End is always strictly after start; when the wall-clock
/// end is at or before the start, the end lands on the next day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub ends_next_day: bool,
}

impl ShiftRange {
    /// Computes the absolute range for a shift on `date`
    pub fn of(date: NaiveDate, start: TimeOfDay, end: TimeOfDay) -> Self {
        let ends_next_day = end.minutes() <= start.minutes();
        let end_date = if ends_next_day {
            date.succ_opt().expect("date within chrono range")
        } else {
            date
        };

        Self {
            start: start.on(date),
            end: end.on(end_date),
            ends_next_day,
        }
    }

    /// Half-open interval intersection; touching endpoints do not overlap
    pub fn overlaps(&self, other: &ShiftRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Returns true if a shift with these wall-clock times ends on the next day
pub fn ends_next_day(start: TimeOfDay, end: TimeOfDay) -> bool {
    end.minutes() <= start.minutes()
}

/// Parses a strict "YYYY-MM-DD" date
pub fn parse_date(value: &str) -> Result<NaiveDate, TimeError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| TimeError::InvalidDate(value.to_string()))
}

/// Validates that `date` is a Monday and can anchor a week view
pub fn monday_of(date: NaiveDate) -> Result<NaiveDate, TimeError> {
    if date.weekday() != Weekday::Mon {
        return Err(TimeError::InvalidWeekStart(date));
    }
    Ok(date)
}

/// Last day of the week starting at `monday`
pub fn week_end(monday: NaiveDate) -> NaiveDate {
    monday + chrono::Days::new(6)
}

/// Validates an inclusive date range
pub fn date_range(start: NaiveDate, end: NaiveDate) -> Result<(NaiveDate, NaiveDate), TimeError> {
    if start > end {
        return Err(TimeError::InvalidDateRange { start, end });
    }
    Ok((start, end))
}
