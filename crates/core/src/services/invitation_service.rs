use crate::app_state::AppState;
use crate::repositories::invitation_repository::InvitationRepository;
use crate::repositories::user_repository::UserRepository;
use crate::security::Claims;
use chrono::{Duration, Utc};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::invitation_dto::{
    CreateInvitationRequest, InvitationListQuery, InvitationListResponse,
};
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::models::entities::invitation::{Invitation, NewInvitation};
use diesel::prelude::*;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const INVITATION_TTL_DAYS: i64 = 7;
const CODE_LEN: usize = 8;

pub struct InvitationService;

impl InvitationService {
    pub async fn create_invitation(
        state: &AppState,
        claims: &Claims,
        req: CreateInvitationRequest,
    ) -> Result<Invitation, ApiError> {
        claims.require_role(UserRole::MANAGERS)?;
        let actor_id = claims.user_id()?;
        let company_id = claims.company_id()?;

        let now = Utc::now();
        let expires_at = req
            .expires_at
            .unwrap_or(now + Duration::days(INVITATION_TTL_DAYS));
        if expires_at <= now {
            return Err(ApiError::BadRequest(
                "Expiration must be in the future".into(),
            ));
        }

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.create_invitation: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        if UserRepository::email_exists(&mut conn, &req.email)? {
            warn!(company_id = %company_id, "manager.create_invitation: email already registered");
            return Err(ApiError::BadRequest(
                "A user with this email already exists".into(),
            ));
        }
        if InvitationRepository::pending_exists_for_email(&mut conn, &req.email)? {
            warn!(company_id = %company_id, "manager.create_invitation: pending invitation exists");
            return Err(ApiError::BadRequest(
                "Invitation already exists for this email".into(),
            ));
        }

        let code = generate_code();
        let invitation = InvitationRepository::create(
            &mut conn,
            NewInvitation {
                code: &code,
                email: &req.email,
                name: req.name.as_deref(),
                position: req.position.as_deref(),
                department: req.department.as_deref(),
                expires_at,
                company_id,
                created_by_id: actor_id,
            },
        )?;

        info!(
            invitation_id = %invitation.id,
            company_id = %company_id,
            "manager.create_invitation: invitation created"
        );
        Ok(invitation)
    }

    pub async fn list_invitations(
        state: &AppState,
        claims: &Claims,
        query: InvitationListQuery,
    ) -> Result<InvitationListResponse, ApiError> {
        claims.require_role(UserRole::MANAGERS)?;
        let company_id = claims.company_id()?;
        let now = Utc::now();

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.list_invitations: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let total = InvitationRepository::count_for_company(&mut conn, company_id, &query, now)?;
        let invitations =
            InvitationRepository::find_page_for_company(&mut conn, company_id, &query, now)?;

        Ok(InvitationListResponse {
            invitations,
            pagination: query.window().pagination(total),
        })
    }

    /// Cancelling is idempotent for unused invitations.
    pub async fn cancel_invitation(
        state: &AppState,
        claims: &Claims,
        invitation_id: Uuid,
    ) -> Result<Invitation, ApiError> {
        claims.require_role(UserRole::MANAGERS)?;
        let company_id = claims.company_id()?;

        let mut conn = state.db.get().map_err(|_| {
            error!("manager.cancel_invitation: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let invitation = conn.transaction::<_, ApiError, _>(|conn| {
            let invitation =
                InvitationRepository::find_for_company_for_update(conn, invitation_id, company_id)?
                    .ok_or_else(|| ApiError::NotFound("Invitation not found".into()))?;

            if invitation.is_used {
                return Err(ApiError::BadRequest("Invitation already used".into()));
            }
            InvitationRepository::deactivate(conn, invitation.id)
        })?;

        info!(
            invitation_id = %invitation.id,
            "manager.cancel_invitation: invitation cancelled"
        );
        Ok(invitation)
    }
}

/// Short uppercase hex code, easy to type from an email.
pub fn generate_code() -> String {
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(CODE_LEN);
    code.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_short_uppercase_hex() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LEN);
        assert!(code
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        assert_ne!(generate_code(), generate_code());
    }
}
