use axum::extract::{Extension, Json, Query, State};
use chronos_core::services::audit_service::AuditService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::audit_dto::{AuditHistoryQuery, AuditHistoryResponse};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn audit_history(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<AuditHistoryQuery>,
) -> Result<Json<AuditHistoryResponse>, ApiError> {
    query.validate().map_err(|e| {
        error!("audit.history: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(AuditService::history(&state, &claims, query).await?))
}
