use crate::error::ApiError;
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::invitations)]
#[diesel(belongs_to(crate::models::entities::company::Company))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Invitation {
    pub id: Uuid,
    pub code: String,
    pub email: String,
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub is_used: bool,
    pub used_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
    pub is_active: bool,
    pub company_id: Uuid,
    pub created_by_id: Uuid,
    pub used_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invitation {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether `email` may register with this invitation at `now`.
    pub fn check_redeemable(&self, email: &str, now: DateTime<Utc>) -> Result<(), ApiError> {
        if !self.is_active {
            return Err(ApiError::BadRequest("Invitation was cancelled".into()));
        }
        if self.is_used {
            return Err(ApiError::BadRequest("Invitation already used".into()));
        }
        if self.is_expired(now) {
            return Err(ApiError::BadRequest("Invitation expired".into()));
        }
        if !self.email.eq_ignore_ascii_case(email.trim()) {
            return Err(ApiError::BadRequest(
                "Email does not match the invitation".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::invitations)]
pub struct NewInvitation<'a> {
    pub code: &'a str,
    pub email: &'a str,
    pub name: Option<&'a str>,
    pub position: Option<&'a str>,
    pub department: Option<&'a str>,
    pub expires_at: DateTime<Utc>,
    pub company_id: Uuid,
    pub created_by_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn invitation() -> Invitation {
        let now = Utc::now();
        Invitation {
            id: Uuid::new_v4(),
            code: "AB12CD34".into(),
            email: "joao@empresa.com".into(),
            name: Some("João".into()),
            position: Some("Analista".into()),
            department: Some("TI".into()),
            is_used: false,
            used_at: None,
            expires_at: now + Duration::days(7),
            is_active: true,
            company_id: Uuid::new_v4(),
            created_by_id: Uuid::new_v4(),
            used_by_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn rejection(inv: &Invitation, email: &str, now: DateTime<Utc>) -> String {
        match inv.check_redeemable(email, now) {
            Err(ApiError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {:?}", other),
        }
    }

    #[test]
    fn open_invitation_accepts_its_address_in_any_case() {
        let inv = invitation();
        assert!(inv.check_redeemable(" Joao@Empresa.com ", Utc::now()).is_ok());
    }

    #[test]
    fn closed_invitations_are_refused() {
        let now = Utc::now();

        let mut cancelled = invitation();
        cancelled.is_active = false;
        assert_eq!(rejection(&cancelled, "joao@empresa.com", now), "Invitation was cancelled");

        let mut used = invitation();
        used.is_used = true;
        assert_eq!(rejection(&used, "joao@empresa.com", now), "Invitation already used");

        let inv = invitation();
        let later = inv.expires_at;
        assert_eq!(rejection(&inv, "joao@empresa.com", later), "Invitation expired");

        assert_eq!(
            rejection(&inv, "outra@empresa.com", now),
            "Email does not match the invitation"
        );
    }
}
