#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use medisys_api::{build_router, ApiState};
use medisys_client::mock::MockBackend;
use medisys_core::models::{
    appointment::{Appointment, AppointmentStatus},
    schedule::ScheduleRow,
};
use serde_json::Value;
use tower::ServiceExt;

pub const TOKEN: &str = "jwt-token";

/// Saturday 2026-10-17, 10:00 in New York.
pub fn saturday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 14, 0, 0).unwrap()
}

pub fn schedule_row(id: i64, day: &str, start: &str, end: &str, duration: i64) -> ScheduleRow {
    ScheduleRow {
        id: Some(id),
        day_of_week: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        slot_duration: duration,
    }
}

pub fn appointment(id: i64, at: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        id,
        appointment_date_time: at.to_string(),
        status,
    }
}

/// Sends one request through a router backed by `backend`, in the New York
/// zone with the clock pinned to [`saturday_morning`].
pub async fn send(backend: MockBackend, request: Request<Body>) -> (StatusCode, Value) {
    let state = ApiState::new(Arc::new(backend), New_York).with_clock(saturday_morning);
    let response = build_router(Arc::new(state))
        .oneshot(request)
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {}", TOKEN))
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let builder = match token {
        Some(token) => builder.header("authorization", format!("Bearer {}", token)),
        None => builder,
    };
    builder.body(Body::from(body.to_string())).unwrap()
}
