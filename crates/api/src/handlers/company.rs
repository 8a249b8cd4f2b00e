use axum::extract::{Extension, Json, State};
use chronos_core::services::company_service::CompanyService;
use chronos_core::{AppState, Claims};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::company_dto::{CompanyResponse, UpdateCompanyRequest};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

pub async fn get_company(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let company = CompanyService::get_company(&state, &claims).await?;
    Ok(Json(CompanyResponse {
        message: None,
        company,
    }))
}

pub async fn update_company(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateCompanyRequest>,
) -> Result<Json<CompanyResponse>, ApiError> {
    let req = req.normalize();
    req.validate().map_err(|e| {
        error!("manager.update_company: validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let company = CompanyService::update_company(&state, &claims, req).await?;
    Ok(Json(CompanyResponse {
        message: Some("Company updated"),
        company,
    }))
}
