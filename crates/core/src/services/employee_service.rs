use crate::app_state::AppState;
use crate::repositories::user_repository::UserRepository;
use crate::security::Claims;
use crate::services::audit_service::{AuditService, ChangeContext, RequestMeta};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::user_dto::{
    ApproveEmployeeRequest, EmployeeListQuery, EmployeeListResponse, EmployeeStatusFilter,
    UpdateUserRequest, UserChanges,
};
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::models::entities::user::User;
use diesel::prelude::*;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const APPROVAL_JUSTIFICATION: &str = "Aprovação de cadastro";
pub const REJECTION_JUSTIFICATION: &str = "Rejeição de cadastro";

pub struct EmployeeService;

impl EmployeeService {
    pub async fn update_profile(
        state: &AppState,
        claims: &Claims,
        req: UpdateUserRequest,
        meta: RequestMeta,
    ) -> Result<User, ApiError> {
        let user_id = claims.user_id()?;

        if req.changes.touches_privileged_fields() {
            warn!(user_id = %user_id, "users.update_profile: privileged fields in self update");
            return Err(ApiError::Forbidden(
                "You cannot change your own role or approval status".into(),
            ));
        }

        let ctx = ChangeContext::new(user_id, meta).with_justification(req.justification);
        let changes = req.changes.normalize();

        let mut conn = state.db.get().map_err(|_| {
            error!("users.update_profile: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = Self::apply_audited(&mut conn, user_id, |_| true, &changes, &ctx)?;
        info!(user_id = %user.id, "users.update_profile: profile updated");
        Ok(user)
    }

    pub async fn update_employee(
        state: &AppState,
        claims: &Claims,
        employee_id: Uuid,
        req: UpdateUserRequest,
        meta: RequestMeta,
    ) -> Result<User, ApiError> {
        claims.require_role(UserRole::EMPLOYEE_EDITORS)?;
        let actor_id = claims.user_id()?;
        let company_id = claims.company_id()?;

        Self::authorize_privileged_changes(claims, actor_id, employee_id, &req.changes)?;

        let ctx = ChangeContext::new(actor_id, meta).with_justification(req.justification);
        let changes = req.changes.normalize();

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.update_employee: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let user = Self::apply_audited(
            &mut conn,
            employee_id,
            |u| u.company_id == Some(company_id),
            &changes,
            &ctx,
        )?;
        info!(
            user_id = %user.id,
            changed_by = %actor_id,
            "manager.update_employee: employee updated"
        );
        Ok(user)
    }

    pub async fn approve_employee(
        state: &AppState,
        claims: &Claims,
        req: ApproveEmployeeRequest,
        meta: RequestMeta,
    ) -> Result<User, ApiError> {
        claims.require_role(UserRole::MANAGERS)?;
        let actor_id = claims.user_id()?;
        let company_id = claims.company_id()?;

        let justification = if req.approved {
            APPROVAL_JUSTIFICATION
        } else {
            REJECTION_JUSTIFICATION
        };
        let ctx = ChangeContext::new(actor_id, meta)
            .with_justification(Some(justification.to_string()));

        let changes = UserChanges {
            is_approved: Some(req.approved),
            is_active: Some(req.approved),
            notes: req.notes.filter(|n| !n.trim().is_empty()),
            ..Default::default()
        };

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.approve_employee: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        // only employees go through the approval queue
        let user = Self::apply_audited(
            &mut conn,
            req.user_id,
            |u| u.company_id == Some(company_id) && u.role == UserRole::Employee,
            &changes,
            &ctx,
        )?;
        info!(
            user_id = %user.id,
            approved = req.approved,
            "manager.approve_employee: decision recorded"
        );
        Ok(user)
    }

    pub async fn list_employees(
        state: &AppState,
        claims: &Claims,
        query: EmployeeListQuery,
    ) -> Result<EmployeeListResponse, ApiError> {
        claims.require_role(UserRole::EMPLOYEE_EDITORS)?;
        let company_id = claims.company_id()?;

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.list_employees: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let total = UserRepository::count_employees(&mut conn, company_id, &query)?;
        let employees = UserRepository::find_employees_page(&mut conn, company_id, &query)?;

        Ok(EmployeeListResponse {
            employees,
            pagination: query.window().pagination(total),
        })
    }

    /// Employees of the caller's company still waiting for approval.
    pub async fn list_pending_approvals(
        state: &AppState,
        claims: &Claims,
        query: EmployeeListQuery,
    ) -> Result<EmployeeListResponse, ApiError> {
        let query = EmployeeListQuery {
            status: Some(EmployeeStatusFilter::Pending),
            ..query
        };
        Self::list_employees(state, claims, query).await
    }

    /// Nobody edits their own access through the employee path. Role and
    /// approval changes are reserved to managers and never grant `admin`.
    pub fn authorize_privileged_changes(
        claims: &Claims,
        actor_id: Uuid,
        employee_id: Uuid,
        changes: &UserChanges,
    ) -> Result<(), ApiError> {
        if !changes.touches_privileged_fields() {
            return Ok(());
        }

        if actor_id == employee_id {
            warn!(user_id = %actor_id, "manager.update_employee: privileged self edit refused");
            return Err(ApiError::Forbidden(
                "You cannot change your own role or approval status".into(),
            ));
        }

        let touches_access = changes.role.is_some() || changes.is_approved.is_some();
        if touches_access && !claims.role.is_one_of(UserRole::MANAGERS) {
            warn!(
                user_id = %actor_id,
                role = %claims.role,
                "manager.update_employee: role or approval change refused"
            );
            return Err(ApiError::Forbidden(
                "Only managers can change roles or approval status".into(),
            ));
        }

        if changes.role == Some(UserRole::Admin) {
            return Err(ApiError::Forbidden("The admin role cannot be assigned".into()));
        }

        Ok(())
    }

    /// Entity update and history rows commit or roll back together.
    fn apply_audited(
        conn: &mut PgConnection,
        user_id: Uuid,
        visible: impl Fn(&User) -> bool,
        changes: &UserChanges,
        ctx: &ChangeContext,
    ) -> Result<User, ApiError> {
        conn.transaction::<_, ApiError, _>(|conn| {
            let before = UserRepository::find_by_id_for_update(conn, user_id)?
                .filter(|u| visible(u))
                .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

            let updated = UserRepository::apply_changes(conn, user_id, changes)?;
            AuditService::track_changes(conn, &before, changes, ctx)?;

            Ok(updated)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: UserRole) -> Claims {
        Claims {
            sub: Uuid::new_v4().to_string(),
            role,
            company_id: Some(Uuid::new_v4()),
            exp: 0,
            iat: 0,
            iss: "chronos".into(),
            aud: "chronos_api".into(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    fn promote_to(role: UserRole) -> UserChanges {
        UserChanges {
            role: Some(role),
            ..Default::default()
        }
    }

    #[test]
    fn nobody_edits_their_own_access() {
        let manager = claims(UserRole::Manager);
        let me = Uuid::new_v4();
        let deactivate = UserChanges {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(matches!(
            EmployeeService::authorize_privileged_changes(&manager, me, me, &deactivate),
            Err(ApiError::Forbidden(_))
        ));
    }

    #[test]
    fn only_managers_change_roles_or_approval() {
        let hr = claims(UserRole::Hr);
        let (actor, other) = (Uuid::new_v4(), Uuid::new_v4());

        let err = EmployeeService::authorize_privileged_changes(
            &hr,
            actor,
            other,
            &promote_to(UserRole::Manager),
        );
        assert!(matches!(err, Err(ApiError::Forbidden(_))));

        let deactivate = UserChanges {
            is_active: Some(false),
            ..Default::default()
        };
        assert!(EmployeeService::authorize_privileged_changes(&hr, actor, other, &deactivate).is_ok());

        let manager = claims(UserRole::Manager);
        assert!(EmployeeService::authorize_privileged_changes(
            &manager,
            actor,
            other,
            &promote_to(UserRole::Hr)
        )
        .is_ok());
        assert!(EmployeeService::authorize_privileged_changes(
            &manager,
            actor,
            other,
            &promote_to(UserRole::Admin)
        )
        .is_err());
    }
}
