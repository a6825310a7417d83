use axum::{extract::State, Json};
use medisys_core::models::auth::{LoginRequest, LoginResponse};
use std::sync::Arc;
use tracing::info;

use crate::{middleware::error_handling::AppError, ApiState};

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let auth = state.backend.login(&payload).await?;
    info!("User {} logged in as {:?}", auth.user_id, auth.role);

    Ok(Json(LoginResponse::from(auth)))
}
