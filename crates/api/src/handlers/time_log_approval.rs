use axum::extract::{Extension, Json, State};
use chronos_core::services::time_log_service::TimeLogService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::time_log_dto::{
    ApproveTimeLogRequest, PendingTimeLogDto, RejectTimeLogRequest,
};
use chronos_primitives::models::entities::time_log::TimeLog;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn approve_time_log(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<ApproveTimeLogRequest>,
) -> Result<Json<TimeLog>, ApiError> {
    Ok(Json(TimeLogService::approve(&state, &claims, req).await?))
}

pub async fn reject_time_log(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<RejectTimeLogRequest>,
) -> Result<Json<TimeLog>, ApiError> {
    req.validate().map_err(|e| {
        error!("timelog.reject: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(TimeLogService::reject(&state, &claims, req).await?))
}

pub async fn pending_time_logs(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<PendingTimeLogDto>>, ApiError> {
    Ok(Json(TimeLogService::list_pending(&state, &claims).await?))
}
