use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::time::iso_instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppointmentStatus {
    #[default]
    Booked,
    Cancelled,
    Completed,
    #[serde(other)]
    Unknown,
}

impl AppointmentStatus {
    /// Whether an appointment in this status still occupies its slot.
    pub fn holds_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

/// An appointment as listed by the backend.
///
/// `appointment_date_time` is kept verbatim; the backend may send it with or
/// without an offset, and the engine decides how to read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub appointment_date_time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
}

/// Booking payload sent to the backend once the patient confirms a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub doctor_id: i64,
    pub patient_id: i64,
    #[serde(with = "iso_instant")]
    pub appointment_date_time: DateTime<Utc>,
}

/// What the UI submits when the patient confirms a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub doctor_id: i64,
    pub patient_id: i64,
    pub day_of_week: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmation {
    pub appointment_id: i64,
    pub doctor_id: i64,
    #[serde(with = "iso_instant")]
    pub appointment_date_time: DateTime<Utc>,
    pub status: AppointmentStatus,
}
