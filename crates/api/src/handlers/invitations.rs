use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use chronos_core::services::invitation_service::InvitationService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::invitation_dto::{
    CreateInvitationRequest, InvitationListQuery, InvitationListResponse,
};
use chronos_primitives::models::entities::invitation::Invitation;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

pub async fn create_invitation(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<CreateInvitationRequest>,
) -> Result<(StatusCode, Json<Invitation>), ApiError> {
    let req = req.normalize();
    req.validate().map_err(|e| {
        error!("manager.create_invitation: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let invitation = InvitationService::create_invitation(&state, &claims, req).await?;
    Ok((StatusCode::CREATED, Json(invitation)))
}

pub async fn list_invitations(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<InvitationListQuery>,
) -> Result<Json<InvitationListResponse>, ApiError> {
    query.validate().map_err(|e| {
        error!("manager.list_invitations: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        InvitationService::list_invitations(&state, &claims, query).await?,
    ))
}

pub async fn cancel_invitation(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(invitation_id): Path<Uuid>,
) -> Result<Json<Invitation>, ApiError> {
    Ok(Json(
        InvitationService::cancel_invitation(&state, &claims, invitation_id).await?,
    ))
}
