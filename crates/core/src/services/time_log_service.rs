use crate::app_state::AppState;
use crate::repositories::time_log_repository::{TimeLogRepository, ALREADY_CHECKED_IN};
use crate::repositories::user_repository::UserRepository;
use crate::security::Claims;
use chrono::Utc;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::time_log_dto::{
    ApproveTimeLogRequest, CheckInRequest, CheckOutRequest, ManualCheckInRequest,
    ManualCheckOutRequest, PendingTimeLogDto, RejectTimeLogRequest,
};
use chronos_primitives::models::dtos::user_dto::UserRefDto;
use chronos_primitives::models::entities::enum_types::{TimeLogStatus, UserRole};
use chronos_primitives::models::entities::time_log::{
    NewTimeLog, TimeLog, TimeLogCheckOut, TimeLogDecision,
};
use diesel::prelude::*;
use tracing::{error, info, warn};
use uuid::Uuid;

pub struct TimeLogService;

impl TimeLogService {
    pub async fn check_in(
        state: &AppState,
        claims: &Claims,
        req: CheckInRequest,
    ) -> Result<TimeLog, ApiError> {
        let user_id = claims.user_id()?;
        let mut conn = Self::conn(state, "timelog.check_in")?;

        Self::ensure_no_open_shift(&mut conn, user_id)?;

        let log = TimeLogRepository::create(
            &mut conn,
            NewTimeLog {
                user_id,
                check_in: Utc::now(),
                check_in_photo: req.photo_url.as_deref(),
                latitude: req.latitude,
                longitude: req.longitude,
                check_in_location: location_label(req.location, req.latitude, req.longitude),
                is_manual: false,
                reason: None,
                status: TimeLogStatus::initial(false),
            },
        )?;

        info!(user_id = %user_id, time_log_id = %log.id, "timelog: checked in");
        Ok(log)
    }

    pub async fn check_out(
        state: &AppState,
        claims: &Claims,
        req: CheckOutRequest,
    ) -> Result<TimeLog, ApiError> {
        let user_id = claims.user_id()?;
        let mut conn = Self::conn(state, "timelog.check_out")?;

        let open = TimeLogRepository::find_open_for_user(&mut conn, user_id)?
            .ok_or_else(|| ApiError::BadRequest("User not checked in".into()))?;

        let log = TimeLogRepository::close(
            &mut conn,
            open.id,
            &TimeLogCheckOut {
                check_out: Utc::now(),
                check_out_photo: req.photo_url,
                out_latitude: req.latitude,
                out_longitude: req.longitude,
                check_out_location: location_label(req.location, req.latitude, req.longitude),
                ..Default::default()
            },
        )?;

        info!(user_id = %user_id, time_log_id = %log.id, "timelog: checked out");
        Ok(log)
    }

    pub async fn manual_check_in(
        state: &AppState,
        claims: &Claims,
        req: ManualCheckInRequest,
    ) -> Result<TimeLog, ApiError> {
        let user_id = claims.user_id()?;

        if req.check_in > Utc::now() {
            return Err(ApiError::BadRequest(
                "Check-in time cannot be in the future".into(),
            ));
        }

        let mut conn = Self::conn(state, "timelog.manual_check_in")?;

        Self::ensure_no_open_shift(&mut conn, user_id)?;

        let reason = req.reason.trim();
        let log = TimeLogRepository::create(
            &mut conn,
            NewTimeLog {
                user_id,
                check_in: req.check_in,
                check_in_photo: None,
                latitude: req.latitude,
                longitude: req.longitude,
                check_in_location: location_label(req.location, req.latitude, req.longitude),
                is_manual: true,
                reason: Some(reason),
                status: TimeLogStatus::initial(true),
            },
        )?;

        info!(user_id = %user_id, time_log_id = %log.id, "timelog: manual check-in pending approval");
        Ok(log)
    }

    pub async fn manual_check_out(
        state: &AppState,
        claims: &Claims,
        req: ManualCheckOutRequest,
    ) -> Result<TimeLog, ApiError> {
        let user_id = claims.user_id()?;
        let mut conn = Self::conn(state, "timelog.manual_check_out")?;

        conn.transaction::<_, ApiError, _>(|conn| {
            // foreign entries look exactly like missing ones
            let log = TimeLogRepository::find_by_id_for_update(conn, req.time_log_id)?
                .filter(|log| log.user_id == user_id)
                .ok_or_else(|| ApiError::NotFound("Time log not found".into()))?;

            Self::validate_manual_check_out(&log, &req)?;

            let updated = TimeLogRepository::close(
                conn,
                log.id,
                &TimeLogCheckOut {
                    check_out: req.check_out,
                    out_latitude: req.latitude,
                    out_longitude: req.longitude,
                    check_out_location: location_label(
                        req.location.clone(),
                        req.latitude,
                        req.longitude,
                    ),
                    is_manual: Some(true),
                    reason: Some(req.reason.trim().to_string()),
                    status: Some(TimeLogStatus::PendingApproval),
                    ..Default::default()
                },
            )?;

            info!(user_id = %user_id, time_log_id = %updated.id, "timelog: manual check-out pending approval");
            Ok(updated)
        })
    }

    pub fn validate_manual_check_out(
        log: &TimeLog,
        req: &ManualCheckOutRequest,
    ) -> Result<(), ApiError> {
        if !log.is_open() {
            return Err(ApiError::BadRequest("Time log already closed".into()));
        }
        if req.check_out <= log.check_in {
            return Err(ApiError::BadRequest(
                "Check-out must be after check-in".into(),
            ));
        }
        if req.check_out > Utc::now() {
            return Err(ApiError::BadRequest(
                "Check-out time cannot be in the future".into(),
            ));
        }
        Ok(())
    }

    pub async fn approve(
        state: &AppState,
        claims: &Claims,
        req: ApproveTimeLogRequest,
    ) -> Result<TimeLog, ApiError> {
        Self::decide(state, claims, req.time_log_id, None).await
    }

    pub async fn reject(
        state: &AppState,
        claims: &Claims,
        req: RejectTimeLogRequest,
    ) -> Result<TimeLog, ApiError> {
        let reason = req.rejection_reason.trim().to_string();
        Self::decide(state, claims, req.time_log_id, Some(reason)).await
    }

    /// `rejection_reason` present means reject, absent means approve.
    async fn decide(
        state: &AppState,
        claims: &Claims,
        time_log_id: Uuid,
        rejection_reason: Option<String>,
    ) -> Result<TimeLog, ApiError> {
        claims.require_role(UserRole::TIME_LOG_APPROVERS)?;
        let approver_id = claims.user_id()?;
        let company_id = claims.company_id()?;

        let mut conn = Self::conn(state, "timelog.decide")?;

        conn.transaction::<_, ApiError, _>(|conn| {
            let log = TimeLogRepository::find_by_id_for_update(conn, time_log_id)?
                .ok_or_else(|| ApiError::NotFound("Time log not found".into()))?;

            let owner = UserRepository::find_by_id(conn, log.user_id)?
                .ok_or_else(|| ApiError::NotFound("Time log not found".into()))?;

            if owner.company_id != Some(company_id) {
                warn!(
                    approver_id = %approver_id,
                    time_log_id = %log.id,
                    "timelog: decision on another company's entry refused"
                );
                return Err(ApiError::Forbidden(
                    "Time log belongs to another company".into(),
                ));
            }

            let status = match rejection_reason {
                Some(_) => log.status.reject()?,
                None => log.status.approve()?,
            };

            let updated = TimeLogRepository::record_decision(
                conn,
                log.id,
                &TimeLogDecision {
                    status,
                    approver_id,
                    approval_date: Utc::now(),
                    rejection_reason,
                },
            )?;

            info!(
                approver_id = %approver_id,
                time_log_id = %updated.id,
                status = %updated.status,
                "timelog: decision recorded"
            );
            Ok(updated)
        })
    }

    pub async fn list_mine(state: &AppState, claims: &Claims) -> Result<Vec<TimeLog>, ApiError> {
        let user_id = claims.user_id()?;
        let mut conn = Self::conn(state, "timelog.list")?;
        TimeLogRepository::list_for_user(&mut conn, user_id)
    }

    pub async fn list_pending(
        state: &AppState,
        claims: &Claims,
    ) -> Result<Vec<PendingTimeLogDto>, ApiError> {
        claims.require_role(UserRole::TIME_LOG_APPROVERS)?;
        let company_id = claims.company_id()?;
        let mut conn = Self::conn(state, "timelog.pending")?;

        Ok(
            TimeLogRepository::list_pending_for_company(&mut conn, company_id)?
                .into_iter()
                .map(|(time_log, user)| PendingTimeLogDto {
                    employee: UserRefDto::from(&user),
                    time_log,
                })
                .collect(),
        )
    }

    fn ensure_no_open_shift(conn: &mut PgConnection, user_id: Uuid) -> Result<(), ApiError> {
        if TimeLogRepository::find_open_for_user(conn, user_id)?.is_some() {
            return Err(ApiError::BadRequest(ALREADY_CHECKED_IN.into()));
        }
        Ok(())
    }

    fn conn(
        state: &AppState,
        op: &'static str,
    ) -> Result<
        diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<PgConnection>>,
        ApiError,
    > {
        state.db.get().map_err(|_| {
            error!("{}: failed to acquire db connection", op);
            ApiError::DatabaseConnection("Database unavailable".into())
        })
    }
}

/// Falls back to `"<lat>, <lon>"` when only coordinates are known.
pub fn location_label(
    location: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
) -> Option<String> {
    match (location.filter(|l| !l.trim().is_empty()), latitude, longitude) {
        (Some(label), _, _) => Some(label),
        (None, Some(lat), Some(lon)) => Some(format!("{}, {}", lat, lon)),
        _ => None,
    }
}
