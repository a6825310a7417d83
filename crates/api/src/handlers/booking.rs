//! # Booking Handlers
//!
//! Confirms a slot the patient picked. The slot is checked against the
//! doctor's schedule and re-checked against freshly fetched bookings right
//! before the request is forwarded, so a slot taken since the grid was shown
//! is reported as a conflict instead of a generic failure.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use medisys_core::{
    engine::{format_time_of_day, parse_time_of_day, resolve_booking_instant, BookedInstants},
    errors::BookingError,
    models::{
        appointment::{BookingConfirmation, BookingRequest, CreateBookingRequest},
        schedule::ScheduleWindow,
    },
};
use std::sync::Arc;
use tracing::{info, warn};

use super::availability::{find_row, parse_day};
use crate::{
    middleware::{auth::SessionContext, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingConfirmation>), AppError> {
    session.require_token()?;

    let day = parse_day(&payload.day_of_week)?;
    let time = parse_time_of_day(&payload.time)
        .map_err(|_| BookingError::Validation(format!("Invalid slot time: {}", payload.time)))?;
    let now = state.now();

    let rows = state
        .backend
        .doctor_schedules(&session, payload.doctor_id)
        .await?;
    let row = find_row(&rows, day).ok_or_else(|| {
        BookingError::NotFound(format!(
            "Doctor {} has no schedule on {}",
            payload.doctor_id, day
        ))
    })?;
    let window = ScheduleWindow::try_from(row)?;
    if !window.slots()?.contains(&time) {
        return Err(BookingError::Validation(format!(
            "{} is not an offered slot on {}",
            format_time_of_day(time),
            day
        ))
        .into());
    }

    if window.overruns_closing(time) {
        warn!(
            "Doctor {} slot {} {} ends after closing time {}, the backend may refuse it",
            payload.doctor_id,
            day,
            format_time_of_day(time),
            format_time_of_day(window.end)
        );
    }

    let instant = resolve_booking_instant(day, time, &now)?;

    let appointments = state
        .backend
        .doctor_appointments(&session, payload.doctor_id)
        .await?;
    let booked =
        BookedInstants::from_appointments(&appointments, &now.with_timezone(&Utc), &state.timezone)?;
    if booked.contains(&instant) {
        warn!(
            "Doctor {} slot {} {} was taken before patient {} confirmed",
            payload.doctor_id,
            day,
            format_time_of_day(time),
            payload.patient_id
        );
        return Err(BookingError::SlotUnavailable(format!(
            "{} {} is already booked, please pick another slot",
            day,
            format_time_of_day(time)
        ))
        .into());
    }

    let request = BookingRequest {
        doctor_id: payload.doctor_id,
        patient_id: payload.patient_id,
        appointment_date_time: instant,
    };
    let appointment = state.backend.book_appointment(&session, &request).await?;
    info!(
        "Booked appointment {} for patient {} with doctor {} at {}",
        appointment.id, payload.patient_id, payload.doctor_id, instant
    );

    let confirmation = BookingConfirmation {
        appointment_id: appointment.id,
        doctor_id: payload.doctor_id,
        appointment_date_time: instant,
        status: appointment.status,
    };

    Ok((StatusCode::CREATED, Json(confirmation)))
}
