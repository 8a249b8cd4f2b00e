use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chronos_core::services::auth_service::AuthService;
use chronos_core::AppState;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::auth_dto::{RegisterManagerRequest, RegisterManagerResponse};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn register_manager(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterManagerRequest>,
) -> Result<(StatusCode, Json<RegisterManagerResponse>), ApiError> {
    let payload = payload.normalize();

    payload.validate().map_err(|e| {
        error!("manager.register: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let response = AuthService::register_manager(&state, payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}
