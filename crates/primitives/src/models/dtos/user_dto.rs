use crate::models::dtos::page_dto::{PageWindow, Pagination};
use crate::models::entities::enum_types::UserRole;
use crate::models::entities::user::User;
use crate::models::field_value::FieldValue;
use crate::utility::{validate_cpf, validate_employment_type, validate_zip_code};
use chrono::NaiveDate;
use diesel::AsChangeset;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A partial update of a user. `None` means "leave untouched".
#[derive(Debug, Default, Clone, Deserialize, Validate, AsChangeset)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    #[validate(length(min = 3, max = 120))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,
    pub birth_date: Option<NaiveDate>,
    #[validate(length(max = 20))]
    pub phone: Option<String>,
    #[validate(length(max = 20))]
    pub mobile_phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[validate(length(equal = 2))]
    pub state: Option<String>,
    #[validate(custom(function = "validate_zip_code"))]
    pub zip_code: Option<String>,

    pub employee_id: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub hire_date: Option<NaiveDate>,
    #[validate(range(exclusive_min = 0.0))]
    pub salary: Option<f64>,
    pub work_schedule: Option<String>,
    #[validate(custom(function = "validate_employment_type"))]
    pub employment_type: Option<String>,
    pub direct_supervisor: Option<String>,

    pub bank_name: Option<String>,
    pub bank_account: Option<String>,
    pub pix: Option<String>,

    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(url)]
    pub profile_photo: Option<String>,

    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub is_approved: Option<bool>,
}

/// `(field, old, new)` for one attribute present in an update.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: FieldValue,
    pub new: FieldValue,
}

macro_rules! present_fields {
    ($changes:expr, $old:expr; $($field:ident),* $(,)?) => {{
        let mut out = Vec::new();
        $(
            if let Some(new) = &$changes.$field {
                out.push(FieldChange {
                    field: stringify!($field),
                    old: FieldValue::from($old.$field.clone()),
                    new: FieldValue::from(new.clone()),
                });
            }
        )*
        out
    }};
}

impl UserChanges {
    /// Every attribute set on this update paired with the value it replaces,
    /// in declaration order. Unchanged values are included; filtering is the
    /// caller's job.
    pub fn field_changes(&self, old: &User) -> Vec<FieldChange> {
        present_fields!(self, old;
            name, email, cpf, birth_date, phone, mobile_phone, address, city,
            state, zip_code, employee_id, department, position, hire_date,
            salary, work_schedule, employment_type, direct_supervisor,
            bank_name, bank_account, pix, notes, profile_photo,
            role, is_active, is_approved,
        )
    }

    /// Fields a user may not change on their own profile.
    pub fn touches_privileged_fields(&self) -> bool {
        self.role.is_some() || self.is_active.is_some() || self.is_approved.is_some()
    }

    pub fn normalize(mut self) -> Self {
        self.email = self.email.map(|e| e.trim().to_lowercase());
        self
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub changes: UserChanges,
    pub justification: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApproveEmployeeRequest {
    pub user_id: Uuid,
    pub approved: bool,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRefDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserRefDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatusFilter {
    Approved,
    Pending,
    Active,
    Inactive,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct EmployeeListQuery {
    pub status: Option<EmployeeStatusFilter>,
    /// Case-insensitive match on name or email.
    #[validate(length(min = 1, max = 100))]
    pub search: Option<String>,
    #[validate(range(min = 1, max = 100000))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl EmployeeListQuery {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }

    /// `search` as a LIKE pattern with its wildcards escaped.
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref()?.trim();
        if term.is_empty() {
            return None;
        }
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        Some(format!("%{}%", escaped))
    }
}

#[derive(Debug, Serialize)]
pub struct EmployeeListResponse {
    pub employees: Vec<User>,
    pub pagination: Pagination,
}
