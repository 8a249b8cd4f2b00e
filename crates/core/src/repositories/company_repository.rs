use chrono::Utc;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::company_dto::UpdateCompanyRequest;
use chronos_primitives::models::entities::company::{Company, NewCompany};
use chronos_primitives::schema::companies;
use diesel::prelude::*;
use uuid::Uuid;

pub struct CompanyRepository;

impl CompanyRepository {
    pub fn find_by_id(conn: &mut PgConnection, company_id: Uuid) -> Result<Option<Company>, ApiError> {
        companies::table
            .find(company_id)
            .select(Company::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn cnpj_exists(conn: &mut PgConnection, cnpj: &str) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            companies::table.filter(companies::cnpj.eq(cnpj)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    /// Same as `cnpj_exists` but ignores `company_id` itself.
    pub fn cnpj_taken_by_other(
        conn: &mut PgConnection,
        cnpj: &str,
        company_id: Uuid,
    ) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            companies::table
                .filter(companies::cnpj.eq(cnpj))
                .filter(companies::id.ne(company_id)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    pub fn update(
        conn: &mut PgConnection,
        company_id: Uuid,
        changes: &UpdateCompanyRequest,
    ) -> Result<Company, ApiError> {
        diesel::update(companies::table.find(company_id))
            .set((changes, companies::updated_at.eq(Utc::now())))
            .returning(Company::as_returning())
            .get_result(conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => ApiError::BadRequest("CNPJ already in use".into()),
                other => ApiError::from(other),
            })
    }

    pub fn create(conn: &mut PgConnection, new_company: NewCompany) -> Result<Company, ApiError> {
        diesel::insert_into(companies::table)
            .values(&new_company)
            .returning(Company::as_returning())
            .get_result(conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => ApiError::BadRequest("CNPJ already in use".into()),
                other => ApiError::from(other),
            })
    }
}
