use axum::extract::{Extension, Json, State};
use chronos_core::services::audit_service::AuditService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::audit_dto::{AvailableField, UpdateAuditConfigRequest};
use chronos_primitives::models::entities::audit_configuration::AuditConfiguration;
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn get_audit_configuration(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<AuditConfiguration>, ApiError> {
    Ok(Json(AuditService::get_configuration(&state, &claims).await?))
}

pub async fn update_audit_configuration(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateAuditConfigRequest>,
) -> Result<Json<AuditConfiguration>, ApiError> {
    req.validate().map_err(|e| {
        error!("audit.config: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        AuditService::update_configuration(&state, &claims, req).await?,
    ))
}

pub async fn available_fields(
    Extension(claims): Extension<Claims>,
) -> Result<Json<&'static [AvailableField]>, ApiError> {
    Ok(Json(AuditService::available_fields(&claims)?))
}
