use async_trait::async_trait;
use medisys_core::{
    errors::BookingResult,
    models::{
        appointment::{Appointment, BookingRequest},
        auth::{AuthResponse, LoginRequest},
        doctor::Doctor,
        schedule::{ScheduleRequest, ScheduleRow},
    },
};
use mockall::mock;

use crate::{ClinicBackend, Session};

// Mock backend for testing
mock! {
    pub Backend {}

    #[async_trait]
    impl ClinicBackend for Backend {
        async fn login(&self, request: &LoginRequest) -> BookingResult<AuthResponse>;

        async fn list_doctors(&self, session: &Session) -> BookingResult<Vec<Doctor>>;

        async fn get_doctor(&self, session: &Session, doctor_id: i64) -> BookingResult<Doctor>;

        async fn doctor_schedules(
            &self,
            session: &Session,
            doctor_id: i64,
        ) -> BookingResult<Vec<ScheduleRow>>;

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
}
