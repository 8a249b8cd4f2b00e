use crate::extractors::ClientMeta;
use axum::extract::{Extension, Json, State};
use chronos_core::services::employee_service::EmployeeService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::user_dto::UpdateUserRequest;
use chronos_primitives::models::entities::user::User;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ClientMeta(meta): ClientMeta,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    req.validate().map_err(|e| {
        error!("users.update_profile: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        EmployeeService::update_profile(&state, &claims, req, meta).await?,
    ))
}
