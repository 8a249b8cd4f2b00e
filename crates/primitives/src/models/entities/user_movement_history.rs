use chrono::{DateTime, Utc};
use diesel::{Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

/// One audited change of one field. Rows are insert-only.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize)]
#[diesel(table_name = crate::schema::user_movement_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserMovementHistory {
    pub id: Uuid,
    pub user_id: Uuid,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub diff: String,
    pub changed_by_id: Uuid,
    pub justification: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::user_movement_history)]
pub struct NewUserMovementHistory {
    pub user_id: Uuid,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub diff: String,
    pub changed_by_id: Uuid,
    pub justification: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub company_id: Uuid,
}
