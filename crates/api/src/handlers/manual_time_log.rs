use axum::{
    extract::{Extension, Json, State},
    http::StatusCode,
};
use chronos_core::services::time_log_service::TimeLogService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::time_log_dto::{ManualCheckInRequest, ManualCheckOutRequest};
use chronos_primitives::models::entities::time_log::TimeLog;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn manual_check_in(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ManualCheckInRequest>,
) -> Result<(StatusCode, Json<TimeLog>), ApiError> {
    req.validate().map_err(|e| {
        error!("timelog.manual_check_in: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let log = TimeLogService::manual_check_in(&state, &claims, req).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn manual_check_out(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ManualCheckOutRequest>,
) -> Result<Json<TimeLog>, ApiError> {
    req.validate().map_err(|e| {
        error!("timelog.manual_check_out: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        TimeLogService::manual_check_out(&state, &claims, req).await?,
    ))
}
