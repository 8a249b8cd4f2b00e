use crate::models::dtos::user_dto::UserRefDto;
use crate::models::entities::time_log::TimeLog;
use crate::utility::validate_reason;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CheckInRequest {
    #[validate(url)]
    pub photo_url: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct CheckOutRequest {
    #[validate(url)]
    pub photo_url: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ManualCheckInRequest {
    pub check_in: DateTime<Utc>,
    #[validate(custom(function = "validate_reason"))]
    pub reason: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ManualCheckOutRequest {
    pub time_log_id: Uuid,
    pub check_out: DateTime<Utc>,
    #[validate(custom(function = "validate_reason"))]
    pub reason: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(length(max = 255))]
    pub location: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ApproveTimeLogRequest {
    pub time_log_id: Uuid,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RejectTimeLogRequest {
    pub time_log_id: Uuid,
    #[validate(custom(function = "validate_reason"))]
    pub rejection_reason: String,
}

#[derive(Debug, Serialize)]
pub struct PendingTimeLogDto {
    #[serde(flatten)]
    pub time_log: TimeLog,
    pub employee: UserRefDto,
}
