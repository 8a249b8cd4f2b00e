use crate::extractors::ClientMeta;
use axum::extract::{Extension, Json, Path, Query, State};
use chronos_core::services::employee_service::EmployeeService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::user_dto::{
    ApproveEmployeeRequest, EmployeeListQuery, EmployeeListResponse, UpdateUserRequest,
};
use chronos_primitives::models::entities::user::User;
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;
use validator::Validate;

pub async fn update_employee(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(user_id): Path<Uuid>,
    ClientMeta(meta): ClientMeta,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    req.validate().map_err(|e| {
        error!("manager.update_employee: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        EmployeeService::update_employee(&state, &claims, user_id, req, meta).await?,
    ))
}

pub async fn approve_employee(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ClientMeta(meta): ClientMeta,
    Json(req): Json<ApproveEmployeeRequest>,
) -> Result<Json<User>, ApiError> {
    req.validate().map_err(|e| {
        error!("manager.approve_employee: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        EmployeeService::approve_employee(&state, &claims, req, meta).await?,
    ))
}

pub async fn list_employees(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<EmployeeListResponse>, ApiError> {
    query.validate().map_err(|e| {
        error!("manager.list_employees: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        EmployeeService::list_employees(&state, &claims, query).await?,
    ))
}

pub async fn pending_approvals(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<EmployeeListResponse>, ApiError> {
    query.validate().map_err(|e| {
        error!("manager.pending_approvals: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    Ok(Json(
        EmployeeService::list_pending_approvals(&state, &claims, query).await?,
    ))
}
