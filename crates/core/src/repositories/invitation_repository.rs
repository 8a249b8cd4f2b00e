use chrono::{DateTime, Utc};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::invitation_dto::{
    InvitationListQuery, InvitationStatusFilter,
};
use chronos_primitives::models::entities::invitation::{Invitation, NewInvitation};
use chronos_primitives::schema::invitations;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

const PENDING_EMAIL_INDEX: &str = "idx_invitations_one_pending_per_email";

pub struct InvitationRepository;

impl InvitationRepository {
    pub fn create(
        conn: &mut PgConnection,
        new_invitation: NewInvitation,
    ) -> Result<Invitation, ApiError> {
        diesel::insert_into(invitations::table)
            .values(&new_invitation)
            .returning(Invitation::as_returning())
            .get_result(conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
                    if info.constraint_name() == Some(PENDING_EMAIL_INDEX) =>
                {
                    ApiError::BadRequest("Invitation already exists for this email".into())
                }
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    ApiError::Internal("Invitation code collision".into())
                }
                other => ApiError::from(other),
            })
    }

    /// An unused, uncancelled invitation for `email`, expired or not.
    pub fn pending_exists_for_email(
        conn: &mut PgConnection,
        email: &str,
    ) -> Result<bool, ApiError> {
        diesel::select(diesel::dsl::exists(
            invitations::table
                .filter(invitations::email.eq(email))
                .filter(invitations::is_active.eq(true))
                .filter(invitations::is_used.eq(false)),
        ))
        .get_result(conn)
        .map_err(ApiError::from)
    }

    /// Row-locked so two registrations cannot redeem the same code.
    pub fn find_by_code_for_update(
        conn: &mut PgConnection,
        code: &str,
    ) -> Result<Option<Invitation>, ApiError> {
        invitations::table
            .filter(invitations::code.eq(code))
            .select(Invitation::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn find_for_company_for_update(
        conn: &mut PgConnection,
        invitation_id: Uuid,
        company_id: Uuid,
    ) -> Result<Option<Invitation>, ApiError> {
        invitations::table
            .find(invitation_id)
            .filter(invitations::company_id.eq(company_id))
            .select(Invitation::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn deactivate(conn: &mut PgConnection, invitation_id: Uuid) -> Result<Invitation, ApiError> {
        diesel::update(invitations::table.find(invitation_id))
            .set((
                invitations::is_active.eq(false),
                invitations::updated_at.eq(Utc::now()),
            ))
            .returning(Invitation::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn mark_used(
        conn: &mut PgConnection,
        invitation_id: Uuid,
        user_id: Uuid,
    ) -> Result<Invitation, ApiError> {
        let now = Utc::now();
        diesel::update(invitations::table.find(invitation_id))
            .set((
                invitations::is_used.eq(true),
                invitations::used_at.eq(Some(now)),
                invitations::used_by_id.eq(Some(user_id)),
                invitations::updated_at.eq(now),
            ))
            .returning(Invitation::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn count_for_company(
        conn: &mut PgConnection,
        company_id: Uuid,
        query: &InvitationListQuery,
        now: DateTime<Utc>,
    ) -> Result<i64, ApiError> {
        Self::filtered(company_id, query, now)
            .count()
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Newest first.
    pub fn find_page_for_company(
        conn: &mut PgConnection,
        company_id: Uuid,
        query: &InvitationListQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<Invitation>, ApiError> {
        let window = query.window();
        Self::filtered(company_id, query, now)
            .order((invitations::created_at.desc(), invitations::id.desc()))
            .limit(window.limit)
            .offset(window.offset())
            .select(Invitation::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    fn filtered(
        company_id: Uuid,
        query: &InvitationListQuery,
        now: DateTime<Utc>,
    ) -> invitations::BoxedQuery<'static, Pg> {
        let q = invitations::table
            .filter(invitations::company_id.eq(company_id))
            .into_boxed();

        match query.status {
            None => q,
            Some(InvitationStatusFilter::Used) => q.filter(invitations::is_used.eq(true)),
            Some(InvitationStatusFilter::Active) => q
                .filter(invitations::is_used.eq(false))
                .filter(invitations::is_active.eq(true))
                .filter(invitations::expires_at.gt(now)),
            Some(InvitationStatusFilter::Expired) => q
                .filter(invitations::is_used.eq(false))
                .filter(invitations::expires_at.le(now)),
        }
    }
}
