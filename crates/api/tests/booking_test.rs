mod test_utils;

use axum::http::StatusCode;
use chrono::{TimeZone, Utc};
use medisys_client::mock::MockBackend;
use medisys_core::{
    errors::BookingError,
    models::appointment::{Appointment, AppointmentStatus},
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use test_utils::{appointment, json_request, schedule_row, send, TOKEN};

fn booking(time: &str) -> Value {
    json!({
        "doctorId": 7,
        "patientId": 42,
        "dayOfWeek": "MONDAY",
        "time": time
    })
}

fn backend_with_monday(existing: Vec<Appointment>) -> MockBackend {
    let mut backend = MockBackend::new();
    backend
        .expect_doctor_schedules()
        .withf(|_, id| *id == 7)
        .returning(|_, _| Ok(vec![schedule_row(1, "MONDAY", "09:00:00", "10:00:00", 30)]));
    backend
        .expect_doctor_appointments()
        .withf(|_, id| *id == 7)
        .returning(move |_, _| Ok(existing.clone()));
    backend
}

#[tokio::test]
async fn test_booking_forwards_resolved_instant() {
    let mut backend = backend_with_monday(vec![]);
    backend
        .expect_book_appointment()
        .withf(|session, request| {
            session.bearer() == Some(TOKEN)
                && request.doctor_id == 7
                && request.patient_id == 42
                // Monday 09:30 in New York (EDT)
                && request.appointment_date_time
                    == Utc.with_ymd_and_hms(2026, 10, 19, 13, 30, 0).unwrap()
        })
        .times(1)
        .returning(|_, _| {
            Ok(Appointment {
                id: 100,
                appointment_date_time: "2026-10-19T09:30:00".to_string(),
                status: AppointmentStatus::Booked,
            })
        });

    let (status, body) = send(
        backend,
        json_request("POST", "/api/appointments", booking("09:30"), Some(TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "appointmentId": 100,
            "doctorId": 7,
            "appointmentDateTime": "2026-10-19T13:30:00.000Z",
            "status": "BOOKED"
        })
    );
}

#[tokio::test]
async fn test_slot_taken_since_display_is_conflict() {
    let mut backend = backend_with_monday(vec![appointment(
        55,
        "2026-10-19T09:30:00",
        AppointmentStatus::Booked,
    )]);
    backend.expect_book_appointment().never();

    let (status, body) = send(
        backend,
        json_request("POST", "/api/appointments", booking("09:30"), Some(TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        json!("Slot no longer available: MONDAY 09:30 is already booked, please pick another slot")
    );
}

#[tokio::test]
async fn test_cancelled_booking_frees_the_slot() {
    let mut backend = backend_with_monday(vec![appointment(
        55,
        "2026-10-19T13:30:00Z",
        AppointmentStatus::Cancelled,
    )]);
    backend.expect_book_appointment().times(1).returning(|_, _| {
        Ok(Appointment {
            id: 101,
            appointment_date_time: "2026-10-19T13:30:00Z".to_string(),
            status: AppointmentStatus::Booked,
        })
    });

    let (status, body) = send(
        backend,
        json_request("POST", "/api/appointments", booking("09:30"), Some(TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["appointmentId"], json!(101));
}

#[tokio::test]
async fn test_backend_conflict_is_reported_the_same_way() {
    let mut backend = backend_with_monday(vec![]);
    backend.expect_book_appointment().returning(|_, _| {
        Err(BookingError::SlotUnavailable(
            "Doctor already has an appointment at this time".to_string(),
        ))
    });

    let (status, _) = send(
        backend,
        json_request("POST", "/api/appointments", booking("09:00"), Some(TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_slot_running_past_closing_is_still_forwarded() {
    let mut backend = MockBackend::new();
    backend
        .expect_doctor_schedules()
        .returning(|_, _| Ok(vec![schedule_row(1, "MONDAY", "09:00", "10:00", 45)]));
    backend
        .expect_doctor_appointments()
        .returning(|_, _| Ok(vec![]));
    backend
        .expect_book_appointment()
        .withf(|_, request| {
            // Monday 09:45 in New York (EDT)
            request.appointment_date_time == Utc.with_ymd_and_hms(2026, 10, 19, 13, 45, 0).unwrap()
        })
        .times(1)
        .returning(|_, _| {
            Err(BookingError::SlotUnavailable(
                "Appointment exceeds doctor's working hours".to_string(),
            ))
        });

    let (status, body) = send(
        backend,
        json_request("POST", "/api/appointments", booking("09:45"), Some(TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        json!("Slot no longer available: Appointment exceeds doctor's working hours")
    );
}

#[tokio::test]
async fn test_time_outside_schedule_is_rejected() {
    let mut backend = backend_with_monday(vec![]);
    backend.expect_book_appointment().never();

    let (status, body) = send(
        backend,
        json_request("POST", "/api/appointments", booking("09:15"), Some(TOKEN)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        json!("Validation error: 09:15 is not an offered slot on MONDAY")
    );
}

#[tokio::test]
async fn test_booking_requires_sign_in() {
    let mut backend = MockBackend::new();
    backend.expect_doctor_schedules().never();
    backend.expect_doctor_appointments().never();
    backend.expect_book_appointment().never();

    let (status, body) = send(
        backend,
        json_request("POST", "/api/appointments", booking("09:30"), None),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Authentication error: Sign in to continue"));
}

#[tokio::test]
async fn test_malformed_authorization_header_is_rejected() {
    let backend = MockBackend::new();
    let mut request = json_request("POST", "/api/appointments", booking("09:30"), None);
    request
        .headers_mut()
        .insert("authorization", "Token abc".parse().unwrap());

    let (status, _) = send(backend, request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
