use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use medisys_core::{
    errors::BookingError,
    models::schedule::{ScheduleRequest, ScheduleRow},
};
use std::sync::Arc;
use tracing::info;

use super::availability::find_row;
use crate::{
    middleware::{auth::SessionContext, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_schedule(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
    Json(payload): Json<ScheduleRequest>,
) -> Result<(StatusCode, Json<ScheduleRow>), AppError> {
    session.require_token()?;
    payload.validate()?;

    // One schedule per doctor and weekday
    let existing = state
        .backend
        .doctor_schedules(&session, payload.doctor_id)
        .await?;
    if find_row(&existing, payload.day_of_week).is_some() {
        return Err(BookingError::Validation(format!(
            "Schedule already exists for this doctor on {}",
            payload.day_of_week
        ))
        .into());
    }

    let row = state.backend.create_schedule(&session, &payload).await?;
    info!(
        "Created {} schedule for doctor {}",
        payload.day_of_week, payload.doctor_id
    );

    Ok((StatusCode::CREATED, Json(row)))
}

#[axum::debug_handler]
pub async fn update_schedule(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
    Path(id): Path<i64>,
    Json(payload): Json<ScheduleRequest>,
) -> Result<Json<ScheduleRow>, AppError> {
    session.require_token()?;
    payload.validate()?;

    let row = state.backend.update_schedule(&session, id, &payload).await?;
    info!("Updated schedule {}", id);

    Ok(Json(row))
}

#[axum::debug_handler]
pub async fn delete_schedule(
    State(state): State<Arc<ApiState>>,
    SessionContext(session): SessionContext,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    session.require_token()?;

    state.backend.delete_schedule(&session, id).await?;
    info!("Deleted schedule {}", id);

    Ok(StatusCode::NO_CONTENT)
}
