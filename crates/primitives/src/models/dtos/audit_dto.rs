use crate::models::dtos::page_dto::{PageWindow, Pagination};
use crate::models::dtos::user_dto::UserRefDto;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AuditHistoryQuery {
    pub user_id: Option<Uuid>,
    #[validate(length(min = 1, max = 64))]
    pub field_name: Option<String>,
    pub changed_by_id: Option<Uuid>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    #[validate(range(min = 1, max = 100000))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl AuditHistoryQuery {
    pub fn window(&self) -> PageWindow {
        PageWindow::new(self.page, self.limit)
    }

    pub fn page(&self) -> i64 {
        self.window().page
    }

    pub fn limit(&self) -> i64 {
        self.window().limit
    }

    pub fn offset(&self) -> i64 {
        self.window().offset()
    }
}

#[derive(Debug, Serialize)]
pub struct AuditHistoryEntryDto {
    pub id: Uuid,
    pub user: Option<UserRefDto>,
    pub changed_by: Option<UserRefDto>,
    pub field_name: String,
    pub field_display_name: String,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub diff: String,
    pub justification: Option<String>,
    pub ip_address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AuditHistoryResponse {
    pub data: Vec<AuditHistoryEntryDto>,
    pub pagination: Pagination,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAuditConfigRequest {
    #[validate(length(min = 1, message = "at least one field must be tracked"))]
    pub tracked_fields: Vec<String>,
    #[serde(default)]
    pub require_justification: bool,
    #[serde(default = "enabled_by_default")]
    pub is_enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AvailableField {
    pub value: &'static str,
    pub label: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_and_offset() {
        let query = AuditHistoryQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 0);

        let query = AuditHistoryQuery {
            page: Some(3),
            limit: Some(25),
            ..Default::default()
        };
        assert_eq!(query.offset(), 50);
    }

    #[test]
    fn absurd_page_is_rejected_and_never_overflows() {
        let query: AuditHistoryQuery =
            serde_json::from_value(serde_json::json!({ "page": i64::MAX, "limit": 100 }))
                .unwrap();
        assert!(query.validate().is_err());
        assert!(query.offset() >= 0);
    }

    #[test]
    fn oversized_limit_fails_validation() {
        let query = AuditHistoryQuery {
            limit: Some(500),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }

    #[test]
    fn empty_tracked_fields_are_rejected() {
        let req: UpdateAuditConfigRequest =
            serde_json::from_value(serde_json::json!({ "tracked_fields": [] })).unwrap();
        assert!(req.validate().is_err());
        assert!(req.is_enabled);
        assert!(!req.require_justification);
    }
}
