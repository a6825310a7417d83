use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::errors::{BookingError, BookingResult};

/// Expands a working-hours window into candidate appointment start times.
///
/// The sequence starts at `start` and steps by `duration_minutes` while the
/// current value is strictly before `end`. Only the start of a slot is checked
/// against closing time, so the last slot may run past `end`; that policy
/// decides which times patients are offered and must not be tightened here.
///
/// `start >= end` yields an empty list. A non-positive duration, or one too
/// large to represent, is rejected with `InvalidDuration`. Generation also stops rather than wrap past midnight.
pub fn generate_slots(
    start: NaiveTime,
    end: NaiveTime,
    duration_minutes: i64,
) -> BookingResult<Vec<NaiveTime>> {
    if duration_minutes <= 0 {
        return Err(BookingError::InvalidDuration(duration_minutes));
    }

    let step = Duration::try_minutes(duration_minutes)
        .ok_or(BookingError::InvalidDuration(duration_minutes))?;
    let mut slots = Vec::new();
    let mut current = start;

    while current < end {
        slots.push(current);

        let (next, wrapped) = current.overflowing_add_signed(step);
        if wrapped != 0 {
            break;
        }
        current = next;
    }

    debug!(
        "Generated {} slots between {} and {} every {} minutes",
        slots.len(),
        start,
        end,
        duration_minutes
    );

    Ok(slots)
}
