use std::{fmt, str::FromStr};

use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{slots::generate_slots, time::{hhmm, parse_time_of_day}},
    errors::{BookingError, BookingResult},
};

/// Shortest slot the backend accepts for a schedule row, in minutes.
pub const MIN_SLOT_DURATION: i64 = 15;
/// Longest slot the backend accepts for a schedule row, in minutes.
pub const MAX_SLOT_DURATION: i64 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }

    /// Days since Monday (Monday = 0, Sunday = 6).
    pub fn index(&self) -> u32 {
        self.weekday().num_days_from_monday()
    }

    pub fn weekday(&self) -> Weekday {
        match self {
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
            DayOfWeek::Sunday => Weekday::Sun,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = BookingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str() == normalized)
            .ok_or_else(|| BookingError::InvalidDayOfWeek(value.to_string()))
    }
}

impl TryFrom<String> for DayOfWeek {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weekly schedule row exactly as the backend returns it.
///
/// Times stay as strings until the engine parses them so that a malformed row
/// surfaces as `InvalidTimeFormat` instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(alias = "slotDurationMinutes")]
    pub slot_duration: i64,
}

/// A parsed schedule row: one working-hours window on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub day: DayOfWeek,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub slot_duration_minutes: i64,
}

impl ScheduleWindow {
    /// Candidate start times for this window, see [`generate_slots`].
    pub fn slots(&self) -> BookingResult<Vec<NaiveTime>> {
        generate_slots(self.start, self.end, self.slot_duration_minutes)
    }

    /// Whether a slot starting at `start` would still be running at closing time.
    pub fn overruns_closing(&self, start: NaiveTime) -> bool {
        match Duration::try_minutes(self.slot_duration_minutes) {
            Some(step) => {
                let (slot_end, wrapped) = start.overflowing_add_signed(step);
                wrapped != 0 || slot_end > self.end
            }
            None => true,
        }
    }
}

impl TryFrom<&ScheduleRow> for ScheduleWindow {
    type Error = BookingError;

    fn try_from(row: &ScheduleRow) -> Result<Self, Self::Error> {
        let day = row.day_of_week.parse()?;
        let start = parse_time_of_day(&row.start_time)?;
        let end = parse_time_of_day(&row.end_time)?;
        if row.slot_duration <= 0 {
            return Err(BookingError::InvalidDuration(row.slot_duration));
        }

        Ok(Self {
            day,
            start,
            end,
            slot_duration_minutes: row.slot_duration,
        })
    }
}

/// Payload for creating or updating a doctor's schedule row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub doctor_id: i64,
    pub day_of_week: DayOfWeek,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub slot_duration: i64,
}

impl ScheduleRequest {
    /// Applies the same rules the backend enforces before it stores a row.
    pub fn validate(&self) -> BookingResult<()> {
        if self.start_time >= self.end_time {
            return Err(BookingError::Validation(
                "Start time must be before end time".to_string(),
            ));
        }

        if !(MIN_SLOT_DURATION..=MAX_SLOT_DURATION).contains(&self.slot_duration) {
            return Err(BookingError::Validation(format!(
                "Slot duration must be between {} and {} minutes",
                MIN_SLOT_DURATION, MAX_SLOT_DURATION
            )));
        }

        Ok(())
    }
}
