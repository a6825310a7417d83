//! # Availability Handlers
//!
//! Builds the slot grid a patient picks from. Schedules and bookings are
//! fetched from the backend on every call and run through the engine against
//! a single reference instant, so a response is always internally consistent.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use medisys_core::{
    engine::{day_availability, BookedInstants},
    errors::{BookingError, BookingResult},
    models::{
        availability::{DayAvailability, WeeklyAvailability},
        schedule::{DayOfWeek, ScheduleRow},
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::{
    middleware::{auth::SessionContext, error_handling::AppError},
    ApiState,
};

#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Restrict the answer to one weekday, any letter case
    pub day: Option<String>,

    /// RFC 3339 instant to compute "next occurrence" from, instead of now
    pub at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum AvailabilityResponse {
    Day(DayAvailability),
    Week(WeeklyAvailability),
}

/// Slot availability for a doctor
///
/// ```text
/// GET /api/doctors/:id/availability?day=MONDAY&at=2026-10-17T10:00:00Z
/// ```
///
/// With `day` the response is one [`DayAvailability`]; without it, a
/// [`WeeklyAvailability`] holding every schedule row ordered Monday to Sunday.
///
/// # Errors
///
/// * `Validation` - unknown `day` or unparsable `at`
/// * `NotFound` - the doctor does not work on `day`
/// * `InvalidTimeFormat` / `InvalidDayOfWeek` / `InvalidDuration` - a schedule row is malformed
/// * `InvalidTimestamp` - an existing booking carries an unreadable timestamp
#[axum::debug_handler]
pub async fn doctor_availability(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
    Path(doctor_id): Path<i64>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let day = query.day.as_deref().map(parse_day).transpose()?;
    let reference = match query.at.as_deref() {
        Some(raw) => parse_reference(raw, &state.timezone)?,
        None => state.now(),
    };

    let (rows, appointments) = tokio::try_join!(
        state.backend.doctor_schedules(&session, doctor_id),
        state.backend.doctor_appointments(&session, doctor_id),
    )?;

    let booked = BookedInstants::from_appointments(
        &appointments,
        &reference.with_timezone(&Utc),
        &state.timezone,
    )?;
    debug!(
        "Doctor {}: {} schedule rows, {} future bookings, reference {}",
        doctor_id,
        rows.len(),
        booked.len(),
        reference
    );

    let response = match day {
        Some(day) => {
            let row = find_row(&rows, day).ok_or_else(|| {
                BookingError::NotFound(format!("Doctor {} has no schedule on {}", doctor_id, day))
            })?;
            AvailabilityResponse::Day(day_availability(doctor_id, row, &reference, &booked)?)
        }
        None => {
            let mut days = rows
                .iter()
                .map(|row| day_availability(doctor_id, row, &reference, &booked))
                .collect::<BookingResult<Vec<_>>>()?;
            days.sort_by_key(|day| day.day_of_week.index());
            AvailabilityResponse::Week(WeeklyAvailability { doctor_id, days })
        }
    };

    Ok(Json(response))
}

/// Parses a weekday supplied by the caller; a bad value is a request error.
pub(crate) fn parse_day(value: &str) -> BookingResult<DayOfWeek> {
    value
        .parse()
        .map_err(|_| BookingError::Validation(format!("Unknown day of week: {}", value)))
}

fn parse_reference(value: &str, zone: &Tz) -> BookingResult<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(zone))
        .map_err(|_| BookingError::Validation(format!("Invalid reference instant: {}", value)))
}

/// The first schedule row for `day`. Rows whose day does not parse never match.
pub(crate) fn find_row(rows: &[ScheduleRow], day: DayOfWeek) -> Option<&ScheduleRow> {
    rows.iter()
        .find(|row| row.day_of_week.parse::<DayOfWeek>().ok() == Some(day))
}
