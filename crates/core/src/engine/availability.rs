use std::collections::HashSet;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use tracing::{debug, warn};

use crate::{
    engine::time::{
        next_occurrence, normalize_to_millisecond_epoch, parse_booked_instant, to_absolute_instant,
    },
    errors::BookingResult,
    models::{
        appointment::Appointment,
        availability::{DayAvailability, SlotAvailability},
        schedule::{DayOfWeek, ScheduleRow, ScheduleWindow},
    },
};

/// Snapshot of instants that already hold a booking, normalized for
/// equality checks with [`normalize_to_millisecond_epoch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookedInstants {
    normalized: HashSet<i64>,
}

impl BookedInstants {
    pub fn new<I>(instants: I) -> Self
    where
        I: IntoIterator<Item = DateTime<Utc>>,
    {
        instants.into_iter().collect()
    }

    /// Builds the set from ISO-8601 strings. Offset-less values are read in `zone`.
    pub fn from_iso<Tz, S>(values: &[S], zone: &Tz) -> BookingResult<Self>
    where
        Tz: TimeZone,
        S: AsRef<str>,
    {
        values
            .iter()
            .map(|value| parse_booked_instant(value.as_ref(), zone))
            .collect()
    }

    /// Keeps appointments that still hold their slot and start strictly after `now`.
    pub fn from_appointments<Tz: TimeZone>(
        appointments: &[Appointment],
        now: &DateTime<Utc>,
        zone: &Tz,
    ) -> BookingResult<Self> {
        let mut booked = Self::default();
        for appointment in appointments.iter().filter(|a| a.status.holds_slot()) {
            let instant = parse_booked_instant(&appointment.appointment_date_time, zone)?;
            if instant > *now {
                booked.insert(&instant);
            }
        }

        debug!(
            "{} of {} appointments block future slots",
            booked.len(),
            appointments.len()
        );
        Ok(booked)
    }

    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.normalized
            .contains(&normalize_to_millisecond_epoch(instant))
    }

    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    fn insert(&mut self, instant: &DateTime<Utc>) {
        self.normalized.insert(normalize_to_millisecond_epoch(instant));
    }
}

impl FromIterator<DateTime<Utc>> for BookedInstants {
    fn from_iter<I: IntoIterator<Item = DateTime<Utc>>>(iter: I) -> Self {
        let mut booked = Self::default();
        for instant in iter {
            booked.insert(&instant);
        }
        booked
    }
}

/// Flags each candidate slot as available or taken.
///
/// Every slot is pinned to its next occurrence of `day` relative to
/// `reference` (in `reference`'s time zone) and looked up in `booked`.
/// Output order matches `slots`.
pub fn mark_availability<Tz: TimeZone>(
    slots: &[NaiveTime],
    day: DayOfWeek,
    reference: &DateTime<Tz>,
    booked: &BookedInstants,
) -> BookingResult<Vec<SlotAvailability>> {
    let zone = reference.timezone();

    slots
        .iter()
        .map(|&time| {
            let instant = to_absolute_instant(next_occurrence(day, time, reference), &zone)?;
            Ok(SlotAvailability {
                time,
                available: !booked.contains(&instant),
            })
        })
        .collect()
}

/// Runs the whole pipeline for one backend schedule row.
///
/// Malformed rows fail with `InvalidDayOfWeek`, `InvalidTimeFormat` or
/// `InvalidDuration`.
pub fn day_availability<Tz: TimeZone>(
    doctor_id: i64,
    row: &ScheduleRow,
    reference: &DateTime<Tz>,
    booked: &BookedInstants,
) -> BookingResult<DayAvailability> {
    let window = ScheduleWindow::try_from(row).inspect_err(|err| {
        warn!(
            "Doctor {} has a malformed schedule row {:?}: {}",
            doctor_id, row.id, err
        );
    })?;

    let candidates = window.slots()?;
    let slots = mark_availability(&candidates, window.day, reference, booked)?;
    let date = next_occurrence(window.day, window.start, reference).date();

    Ok(DayAvailability {
        doctor_id,
        day_of_week: window.day,
        date,
        start_time: window.start,
        end_time: window.end,
        slot_duration: window.slot_duration_minutes,
        slots,
    })
}

/// The absolute instant to submit when the patient confirms `time` on `day`.
pub fn resolve_booking_instant<Tz: TimeZone>(
    day: DayOfWeek,
    time: NaiveTime,
    reference: &DateTime<Tz>,
) -> BookingResult<DateTime<Utc>> {
    to_absolute_instant(next_occurrence(day, time, reference), &reference.timezone())
}
