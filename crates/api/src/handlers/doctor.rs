use axum::{
    extract::{Path, State},
    Json,
};
use medisys_core::models::{doctor::Doctor, schedule::ScheduleRow};
use std::sync::Arc;

use crate::{
    middleware::{auth::SessionContext, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let doctors = state.backend.list_doctors(&session).await?;
    Ok(Json(doctors))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
    Path(id): Path<i64>,
) -> Result<Json<Doctor>, AppError> {
    let doctor = state.backend.get_doctor(&session, id).await?;
    Ok(Json(doctor))
}

#[axum::debug_handler]
pub async fn doctor_schedules(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
    Path(id): Path<i64>,
) -> Result<Json<Vec<ScheduleRow>>, AppError> {
    let rows = state.backend.doctor_schedules(&session, id).await?;
    Ok(Json(rows))
}
