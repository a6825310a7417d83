use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::{engine::time::hhmm, models::schedule::DayOfWeek};

/// One candidate start time and whether it can still be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub doctor_id: i64,
    pub day_of_week: DayOfWeek,
    /// Local date the slots were resolved against.
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub slot_duration: i64,
    pub slots: Vec<SlotAvailability>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAvailability {
    pub doctor_id: i64,
    pub days: Vec<DayAvailability>,
}
