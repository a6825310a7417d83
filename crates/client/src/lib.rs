//! # MediSys Client
//!
//! Typed access to the hospital backend's REST API.
//!
//! [`ClinicBackend`] is the seam the rest of the workspace depends on;
//! [`BackendClient`] implements it over `reqwest`, and [`mock::MockBackend`]
//! stands in for it in tests. Every call takes an explicit [`Session`] so no
//! credentials are read from ambient state.

pub mod config;
pub mod mock;
pub mod session;

use std::time::Duration;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use medisys_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, BookingRequest},
        auth::{AuthResponse, LoginRequest},
        doctor::Doctor,
        schedule::{ScheduleRequest, ScheduleRow},
    },
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

pub use config::ClientConfig;
pub use session::{Session, SessionStore};

/// Operations the hospital backend offers to the booking flow.
#[async_trait]
pub trait ClinicBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> BookingResult<AuthResponse>;

    async fn list_doctors(&self, session: &Session) -> BookingResult<Vec<Doctor>>;

    async fn get_doctor(&self, session: &Session, doctor_id: i64) -> BookingResult<Doctor>;

    /// Weekly schedule rows for a doctor, unparsed.
    async fn doctor_schedules(
        &self,
        session: &Session,
        doctor_id: i64,
    ) -> BookingResult<Vec<ScheduleRow>>;

    /// Every appointment the backend holds for a doctor, past and future.
    async fn doctor_appointments(
        &self,
        session: &Session,
        doctor_id: i64,
    ) -> BookingResult<Vec<Appointment>>;

    async fn book_appointment(
        &self,
        session: &Session,
        request: &BookingRequest,
    ) -> BookingResult<Appointment>;

    async fn create_schedule(
        &self,
        session: &Session,
        request: &ScheduleRequest,
    ) -> BookingResult<ScheduleRow>;

    async fn update_schedule(
        &self,
        session: &Session,
        schedule_id: i64,
        request: &ScheduleRequest,
    ) -> BookingResult<ScheduleRow>;

    async fn delete_schedule(&self, session: &Session, schedule_id: i64) -> BookingResult<()>;
}

/// `reqwest`-backed implementation of [`ClinicBackend`].
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .wrap_err("Failed to build backend HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: &Session) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.client.request(method, url);
        match session.bearer() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> BookingResult<Response> {
        let response = builder
            .send()
            .await
            .wrap_err("Request to backend failed")?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!("Backend error ({}): {}", status, body);
        Err(map_status(status, &body))
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> BookingResult<T> {
        let response = self.execute(builder).await?;
        let data = response
            .json::<T>()
            .await
            .wrap_err("Malformed backend response")?;
        Ok(data)
    }
}

/// Maps a failed backend response onto the booking error taxonomy.
pub fn map_status(status: StatusCode, body: &str) -> BookingError {
    let message = error_message(body);
    match status {
        StatusCode::BAD_REQUEST => BookingError::Validation(message),
        StatusCode::UNAUTHORIZED => BookingError::Authentication(message),
        StatusCode::FORBIDDEN => BookingError::Authorization(message),
        StatusCode::NOT_FOUND => BookingError::NotFound(message),
        StatusCode::CONFLICT => BookingError::SlotUnavailable(message),
        _ => BookingError::Backend(eyre::eyre!("API error ({}): {}", status, message)),
    }
}

/// Pulls `message` or `error` out of a JSON error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl ClinicBackend for BackendClient {
    async fn login(&self, request: &LoginRequest) -> BookingResult<AuthResponse> {
        let builder = self
            .request(Method::POST, "/api/auth/login", &Session::anonymous())
            .json(request);
        self.fetch(builder).await
    }

    async fn list_doctors(&self, session: &Session) -> BookingResult<Vec<Doctor>> {
        self.fetch(self.request(Method::GET, "/api/doctors", session))
            .await
    }

    async fn get_doctor(&self, session: &Session, doctor_id: i64) -> BookingResult<Doctor> {
        let path = format!("/api/doctors/{}", doctor_id);
        self.fetch(self.request(Method::GET, &path, session)).await
    }

    async fn doctor_schedules(
        &self,
        session: &Session,
        doctor_id: i64,
    ) -> BookingResult<Vec<ScheduleRow>> {
        let path = format!("/api/doctor-schedules/doctor/{}", doctor_id);
        self.fetch(self.request(Method::GET, &path, session)).await
    }

    async fn doctor_appointments(
        &self,
        session: &Session,
        doctor_id: i64,
    ) -> BookingResult<Vec<Appointment>> {
        let path = format!("/api/appointments/doctor/{}", doctor_id);
        self.fetch(self.request(Method::GET, &path, session)).await
    }

    async fn book_appointment(
        &self,
        session: &Session,
        request: &BookingRequest,
    ) -> BookingResult<Appointment> {
        session.require_token()?;
        let builder = self
            .request(Method::POST, "/api/appointments/book", session)
            .json(request);
        self.fetch(builder).await
    }

    async fn create_schedule(
        &self,
        session: &Session,
        request: &ScheduleRequest,
    ) -> BookingResult<ScheduleRow> {
        session.require_token()?;
        let builder = self
            .request(Method::POST, "/api/doctor-schedules", session)
            .json(request);
        self.fetch(builder).await
    }

    async fn update_schedule(
        &self,
        session: &Session,
        schedule_id: i64,
        request: &ScheduleRequest,
    ) -> BookingResult<ScheduleRow> {
        session.require_token()?;
        let path = format!("/api/doctor-schedules/{}", schedule_id);
        let builder = self.request(Method::PUT, &path, session).json(request);
        self.fetch(builder).await
    }

    async fn delete_schedule(&self, session: &Session, schedule_id: i64) -> BookingResult<()> {
        session.require_token()?;
        let path = format!("/api/doctor-schedules/{}", schedule_id);
        self.execute(self.request(Method::DELETE, &path, session))
            .await?;
        Ok(())
    }
}
