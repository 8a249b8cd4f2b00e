use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use chronos_core::services::auth_service::AuthService;
use chronos_core::AppState;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::invitation_dto::{
    RegisterEmployeeRequest, RegisterEmployeeResponse,
};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn register_employee(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterEmployeeRequest>,
) -> Result<(StatusCode, Json<RegisterEmployeeResponse>), ApiError> {
    let payload = payload.normalize();

    payload.validate().map_err(|e| {
        error!("employee.register: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let response = AuthService::register_employee(&state, payload).await?;

    Ok((StatusCode::CREATED, Json(response)))
}
