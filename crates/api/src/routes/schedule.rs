use axum::{
    routing::{post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/doctor-schedules",
            post(handlers::schedule::create_schedule),
        )
        .route(
            "/api/doctor-schedules/:id",
            put(handlers::schedule::update_schedule).delete(handlers::schedule::delete_schedule),
        )
}
