use crate::models::entities::company::Company;
use crate::models::entities::user::User;
use crate::utility::{validate_cnpj, validate_password};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CompanyRegistration {
    #[validate(length(min = 2, max = 160))]
    pub name: String,
    #[validate(custom(function = "validate_cnpj"))]
    pub cnpj: String,
    pub corporate_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterManagerRequest {
    #[validate(length(min = 3, max = 120))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
    #[validate(nested)]
    pub company: CompanyRegistration,
}

impl RegisterManagerRequest {
    pub fn normalize(mut self) -> Self {
        self.email = self.email.trim().to_lowercase();
        self.name = self.name.trim().to_string();
        self.company.cnpj = self
            .company
            .cnpj
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        self
    }
}

#[derive(Debug, Serialize)]
pub struct RegisterManagerResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
    pub company: Company,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(cnpj: &str) -> RegisterManagerRequest {
        serde_json::from_value(serde_json::json!({
            "name": "  Ana Gestora ",
            "email": " Ana@Empresa.COM ",
            "password": "Segura123",
            "company": { "name": "Empresa", "cnpj": cnpj }
        }))
        .unwrap()
    }

    #[test]
    fn normalize_cleans_email_and_cnpj() {
        let req = request("12.345.678/0001-90").normalize();
        assert_eq!(req.email, "ana@empresa.com");
        assert_eq!(req.name, "Ana Gestora");
        assert_eq!(req.company.cnpj, "12345678000190");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn nested_company_is_validated() {
        let req = request("123").normalize();
        let errors = req.validate().unwrap_err();
        assert!(errors.errors().contains_key("company"));
    }
}
