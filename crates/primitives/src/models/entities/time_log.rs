use crate::models::entities::enum_types::TimeLogStatus;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::time_logs)]
#[diesel(belongs_to(crate::models::entities::user::User))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TimeLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_out: Option<DateTime<Utc>>,
    pub check_in_photo: Option<String>,
    pub check_out_photo: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub check_in_location: Option<String>,
    pub out_latitude: Option<f64>,
    pub out_longitude: Option<f64>,
    pub check_out_location: Option<String>,
    pub is_manual: bool,
    pub reason: Option<String>,
    pub status: TimeLogStatus,
    pub approver_id: Option<Uuid>,
    pub approval_date: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TimeLog {
    pub fn is_open(&self) -> bool {
        self.check_out.is_none() && self.status != TimeLogStatus::Rejected
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::time_logs)]
pub struct NewTimeLog<'a> {
    pub user_id: Uuid,
    pub check_in: DateTime<Utc>,
    pub check_in_photo: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub check_in_location: Option<String>,
    pub is_manual: bool,
    pub reason: Option<&'a str>,
    pub status: TimeLogStatus,
}

/// Columns written when a shift is closed. `None` fields are left as they are.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::time_logs)]
pub struct TimeLogCheckOut {
    pub check_out: DateTime<Utc>,
    pub check_out_photo: Option<String>,
    pub out_latitude: Option<f64>,
    pub out_longitude: Option<f64>,
    pub check_out_location: Option<String>,
    pub is_manual: Option<bool>,
    pub reason: Option<String>,
    pub status: Option<TimeLogStatus>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::time_logs)]
pub struct TimeLogDecision {
    pub status: TimeLogStatus,
    pub approver_id: Uuid,
    pub approval_date: DateTime<Utc>,
    pub rejection_reason: Option<String>,
}
