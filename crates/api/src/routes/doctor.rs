use axum::{routing::get, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/doctors", get(handlers::doctor::list_doctors))
        .route("/api/doctors/:id", get(handlers::doctor::get_doctor))
        .route(
            "/api/doctors/:id/schedules",
            get(handlers::doctor::doctor_schedules),
        )
}
