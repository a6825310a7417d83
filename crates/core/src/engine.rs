//! # Availability Slot Engine
//!
//! Turns a doctor's weekly schedule and the instants already booked into the
//! list of bookable start times for a day.
//!
//! 1. [`slots::generate_slots`] expands a working-hours window into candidate
//!    local times of day.
//! 2. [`time::next_occurrence`] and [`time::to_absolute_instant`] pin each
//!    candidate to a concrete UTC instant in the clinic's time zone.
//! 3. [`availability::mark_availability`] flags candidates whose instant is
//!    already booked.

pub mod availability;
pub mod slots;
pub mod time;

pub use availability::{BookedInstants, day_availability, mark_availability, resolve_booking_instant};
pub use slots::generate_slots;
pub use time::{
    format_time_of_day, next_occurrence, normalize_to_millisecond_epoch, parse_booked_instant,
    parse_time_of_day, to_absolute_instant, to_iso_instant, to_local_datetime,
};
