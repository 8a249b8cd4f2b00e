use crate::models::entities::company::Company;
use crate::utility::validate_cnpj;
use diesel::AsChangeset;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Partial update of the caller's company. Absent fields are left untouched.
#[derive(Debug, Default, Deserialize, Validate, AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
pub struct UpdateCompanyRequest {
    #[validate(length(min = 2, max = 160))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_cnpj"))]
    pub cnpj: Option<String>,
    #[validate(length(max = 200))]
    pub corporate_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
}

impl UpdateCompanyRequest {
    pub fn normalize(mut self) -> Self {
        self.name = self.name.map(|n| n.trim().to_string());
        self.cnpj = self
            .cnpj
            .map(|c| c.chars().filter(char::is_ascii_digit).collect());
        self.email = self.email.map(|e| e.trim().to_lowercase());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.cnpj.is_none()
            && self.corporate_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct CompanyResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub company: Company,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_cnpj_is_stripped_before_validation() {
        let req = UpdateCompanyRequest {
            cnpj: Some("12.345.678/0001-90".into()),
            ..Default::default()
        }
        .normalize();
        assert_eq!(req.cnpj.as_deref(), Some("12345678000190"));
        assert!(req.validate().is_ok());
        assert!(!req.is_empty());
        assert!(UpdateCompanyRequest::default().is_empty());
    }
}
