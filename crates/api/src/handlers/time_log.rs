use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use chronos_core::services::time_log_service::TimeLogService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::time_log_dto::{CheckInRequest, CheckOutRequest};
use chronos_primitives::models::entities::time_log::TimeLog;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn check_in(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CheckInRequest>,
) -> Result<(StatusCode, Json<TimeLog>), ApiError> {
    req.validate().map_err(|e| {
        error!("timelog.check_in: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let log = TimeLogService::check_in(&state, &claims, req).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn check_out(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CheckOutRequest>,
) -> Result<Json<TimeLog>, ApiError> {
    req.validate().map_err(|e| {
        error!("timelog.check_out: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(TimeLogService::check_out(&state, &claims, req).await?))
}

pub async fn list_time_logs(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<TimeLog>>, ApiError> {
    Ok(Json(TimeLogService::list_mine(&state, &claims).await?))
}
