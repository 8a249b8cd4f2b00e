use crate::app_state::AppState;
use crate::repositories::company_repository::CompanyRepository;
use crate::security::Claims;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::company_dto::UpdateCompanyRequest;
use chronos_primitives::models::entities::company::Company;
use chronos_primitives::models::entities::enum_types::UserRole;
use diesel::prelude::*;
use tracing::{error, info, warn};

pub struct CompanyService;

impl CompanyService {
    pub async fn get_company(state: &AppState, claims: &Claims) -> Result<Company, ApiError> {
        claims.require_role(UserRole::EMPLOYEE_EDITORS)?;
        let company_id = claims.company_id()?;

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.get_company: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        CompanyRepository::find_by_id(&mut conn, company_id)?
            .ok_or_else(|| ApiError::NotFound("Company not found".into()))
    }

    pub async fn update_company(
        state: &AppState,
        claims: &Claims,
        req: UpdateCompanyRequest,
    ) -> Result<Company, ApiError> {
        claims.require_role(UserRole::MANAGERS)?;
        let company_id = claims.company_id()?;

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.update_company: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let company = conn.transaction::<_, ApiError, _>(|conn| {
            let current = CompanyRepository::find_by_id(conn, company_id)?
                .ok_or_else(|| ApiError::NotFound("Company not found".into()))?;

            if req.is_empty() {
                return Ok(current);
            }
            if let Some(cnpj) = req.cnpj.as_deref() {
                if CompanyRepository::cnpj_taken_by_other(conn, cnpj, company_id)? {
                    warn!(company_id = %company_id, "manager.update_company: duplicate cnpj");
                    return Err(ApiError::BadRequest("CNPJ already in use".into()));
                }
            }
            CompanyRepository::update(conn, company_id, &req)
        })?;

        info!(company_id = %company.id, "manager.update_company: company updated");
        Ok(company)
    }
}
