use chrono::Utc;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::user_dto::{
    EmployeeListQuery, EmployeeStatusFilter, UserChanges,
};
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::models::entities::user::{NewUser, User};
use chronos_primitives::schema::users;
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_id(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<User>, ApiError> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Row-locked read used as the "before" snapshot of an audited update.
    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<User>, ApiError> {
        users::table
            .find(user_id)
            .select(User::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_many(conn: &mut PgConnection, ids: &[Uuid]) -> Result<Vec<User>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        users::table
            .filter(users::id.eq_any(ids))
            .select(User::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn email_exists(conn: &mut PgConnection, user_email: &str) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(user_email)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    pub fn create(conn: &mut PgConnection, new_user: NewUser) -> Result<User, ApiError> {
        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => ApiError::BadRequest("Email already in use".into()),
                other => ApiError::from(other),
            })
    }

    pub fn apply_changes(
        conn: &mut PgConnection,
        user_id: Uuid,
        changes: &UserChanges,
    ) -> Result<User, ApiError> {
        diesel::update(users::table.find(user_id))
            .set((changes, users::updated_at.eq(Utc::now())))
            .returning(User::as_returning())
            .get_result(conn)
            .map_err(|e| match e {
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => ApiError::BadRequest("Email already in use".into()),
                other => ApiError::from(other),
            })
    }

    pub fn count_employees(
        conn: &mut PgConnection,
        company_id: Uuid,
        query: &EmployeeListQuery,
    ) -> Result<i64, ApiError> {
        Self::employees_filtered(company_id, query)
            .count()
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Newest first.
    pub fn find_employees_page(
        conn: &mut PgConnection,
        company_id: Uuid,
        query: &EmployeeListQuery,
    ) -> Result<Vec<User>, ApiError> {
        let window = query.window();
        Self::employees_filtered(company_id, query)
            .order((users::created_at.desc(), users::id.desc()))
            .limit(window.limit)
            .offset(window.offset())
            .select(User::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    fn employees_filtered(
        company_id: Uuid,
        query: &EmployeeListQuery,
    ) -> users::BoxedQuery<'static, Pg> {
        let mut q = users::table
            .filter(users::company_id.eq(company_id))
            .filter(users::role.eq(UserRole::Employee))
            .into_boxed();

        q = match query.status {
            None => q,
            Some(EmployeeStatusFilter::Approved) => q.filter(users::is_approved.eq(true)),
            Some(EmployeeStatusFilter::Pending) => q.filter(users::is_approved.eq(false)),
            Some(EmployeeStatusFilter::Active) => q.filter(users::is_active.eq(true)),
            Some(EmployeeStatusFilter::Inactive) => q.filter(users::is_active.eq(false)),
        };

        if let Some(pattern) = query.search_pattern() {
            q = q.filter(
                users::name
                    .ilike(pattern.clone())
                    .or(users::email.ilike(pattern)),
            );
        }
        q
    }
}
