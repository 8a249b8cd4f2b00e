use crate::models::dtos::page_dto::{PageWindow, Pagination};
use crate::models::entities::invitation::Invitation;
use crate::models::entities::user::User;
use crate::utility::{validate_cpf, validate_password};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvitationRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,
    #[validate(length(max = 120))]
    pub position: Option<String>,
    #[validate(length(max = 120))]
    pub department: Option<String>,
    /// Defaults to seven days from now.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CreateInvitationRequest {
    pub fn normalize(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self.name = self.name.map(|n| n.trim().to_string());
        self
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatusFilter {
    /// Redeemed by an employee.
    Used,
    /// Neither used, cancelled nor expired.
    Active,
    /// Unused and past its expiry.
    Expired,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct InvitationListQuery {
    pub status: Option<InvitationStatusFilter>,
    #[validate(range(min = 1, max = 100000))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl InvitationListQuery {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }
}

#[derive(Debug, Serialize)]
pub struct InvitationListResponse {
    pub invitations: Vec<Invitation>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterEmployeeRequest {
    #[validate(length(min = 1, max = 32))]
    pub invitation_code: String,
    #[validate(length(min = 3, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 20))]
    pub mobile_phone: Option<String>,
}

impl RegisterEmployeeRequest {
    pub fn normalize(mut self) -> Self {
        self.invitation_code = self.invitation_code.trim().to_uppercase();
        self.email = self.email.trim().to_lowercase();
        self.name = self.name.trim().to_string();
        self.cpf = self
            .cpf
            .map(|c| c.chars().filter(char::is_ascii_digit).collect());
        self
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterEmployeeResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_is_normalized() {
        let req: RegisterEmployeeRequest = serde_json::from_value(serde_json::json!({
            "invitation_code": " ab12cd34 ",
            "name": " João Silva ",
            "email": " Joao@Empresa.COM ",
            "password": "Segura123",
            "cpf": "529.982.247-25"
        }))
        .unwrap();

        let req = req.normalize();
        assert_eq!(req.invitation_code, "AB12CD34");
        assert_eq!(req.email, "joao@empresa.com");
        assert_eq!(req.name, "João Silva");
        assert_eq!(req.cpf.as_deref(), Some("52998224725"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn status_filter_parses_lowercase() {
        let query: InvitationListQuery =
            serde_json::from_value(serde_json::json!({ "status": "expired" })).unwrap();
        assert_eq!(query.status, Some(InvitationStatusFilter::Expired));
        assert_eq!(query.window().page, 1);
    }
}
