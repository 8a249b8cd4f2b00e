use crate::error::ApiError;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, DbEnum, Display, EnumString,
)]
#[ExistingTypePath = "crate::schema::sql_types::UserRole"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    Manager,
    Employee,
    Hr,
    Admin,
}

impl UserRole {
    pub const AUDIT_VIEWERS: &'static [UserRole] =
        &[UserRole::Manager, UserRole::Hr, UserRole::Admin];

    pub const AUDIT_ADMINS: &'static [UserRole] = &[UserRole::Manager, UserRole::Admin];

    pub const EMPLOYEE_EDITORS: &'static [UserRole] =
        &[UserRole::Manager, UserRole::Hr, UserRole::Admin];

    pub const MANAGERS: &'static [UserRole] = &[UserRole::Manager];

    pub const TIME_LOG_APPROVERS: &'static [UserRole] = Self::MANAGERS;

    pub fn is_one_of(self, allowed: &[UserRole]) -> bool {
        allowed.contains(&self)
    }
}

/// Lifecycle of a check-in/check-out record.
///
/// Automatic entries are born `Approved`; manual ones are born
/// `PendingApproval` and move exactly once to `Approved` or `Rejected`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString,
)]
#[ExistingTypePath = "crate::schema::sql_types::TimeLogStatus"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TimeLogStatus {
    PendingApproval,
    Approved,
    Rejected,
}

impl TimeLogStatus {
    pub fn initial(is_manual: bool) -> Self {
        if is_manual {
            TimeLogStatus::PendingApproval
        } else {
            TimeLogStatus::Approved
        }
    }

    pub fn approve(self) -> Result<Self, ApiError> {
        self.decide(TimeLogStatus::Approved)
    }

    pub fn reject(self) -> Result<Self, ApiError> {
        self.decide(TimeLogStatus::Rejected)
    }

    fn decide(self, to: TimeLogStatus) -> Result<Self, ApiError> {
        match self {
            TimeLogStatus::PendingApproval => Ok(to),
            _ => Err(ApiError::BadRequest(format!(
                "Time log already processed (status: {})",
                self
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn manual_entries_start_pending() {
        assert_eq!(TimeLogStatus::initial(true), TimeLogStatus::PendingApproval);
        assert_eq!(TimeLogStatus::initial(false), TimeLogStatus::Approved);
    }

    #[test]
    fn pending_entries_can_be_decided_once() {
        let approved = TimeLogStatus::PendingApproval.approve().unwrap();
        assert_eq!(approved, TimeLogStatus::Approved);
        assert!(approved.approve().is_err());
        assert!(approved.reject().is_err());

        let rejected = TimeLogStatus::PendingApproval.reject().unwrap();
        assert_eq!(rejected, TimeLogStatus::Rejected);
        assert!(rejected.approve().is_err());
    }

    #[test]
    fn terminal_error_says_already_processed() {
        let err = TimeLogStatus::Rejected.approve().unwrap_err();
        assert!(err.to_string().contains("already processed"));
    }

    #[test]
    fn statuses_use_snake_case_on_the_wire() {
        assert_eq!(TimeLogStatus::PendingApproval.to_string(), "pending_approval");
        assert_eq!(
            serde_json::to_value(TimeLogStatus::PendingApproval).unwrap(),
            serde_json::json!("pending_approval")
        );
        assert_eq!(UserRole::from_str("hr").unwrap(), UserRole::Hr);
    }

    #[test]
    fn role_groups() {
        assert!(UserRole::Hr.is_one_of(UserRole::AUDIT_VIEWERS));
        assert!(!UserRole::Hr.is_one_of(UserRole::AUDIT_ADMINS));
        assert!(!UserRole::Employee.is_one_of(UserRole::AUDIT_VIEWERS));
        assert!(!UserRole::Admin.is_one_of(UserRole::TIME_LOG_APPROVERS));
    }
}
