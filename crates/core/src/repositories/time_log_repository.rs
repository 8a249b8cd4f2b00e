use chrono::Utc;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::entities::enum_types::TimeLogStatus;
use chronos_primitives::models::entities::time_log::{
    NewTimeLog, TimeLog, TimeLogCheckOut, TimeLogDecision,
};
use chronos_primitives::models::entities::user::User;
use chronos_primitives::schema::{time_logs, users};
use diesel::prelude::*;
use uuid::Uuid;

pub const ALREADY_CHECKED_IN: &str = "User already checked in";

pub struct TimeLogRepository;

impl TimeLogRepository {
    pub fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<TimeLog>, ApiError> {
        time_logs::table
            .find(id)
            .select(TimeLog::as_select())
            .for_update()
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// The single non-rejected entry without a check-out, if any.
    pub fn find_open_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<TimeLog>, ApiError> {
        time_logs::table
            .filter(time_logs::user_id.eq(user_id))
            .filter(time_logs::check_out.is_null())
            .filter(time_logs::status.ne(TimeLogStatus::Rejected))
            .select(TimeLog::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn create(conn: &mut PgConnection, new_log: NewTimeLog) -> Result<TimeLog, ApiError> {
        diesel::insert_into(time_logs::table)
            .values(&new_log)
            .returning(TimeLog::as_returning())
            .get_result(conn)
            .map_err(|e| match e {
                // partial unique index on open shifts
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => ApiError::BadRequest(ALREADY_CHECKED_IN.into()),
                other => ApiError::from(other),
            })
    }

    pub fn close(
        conn: &mut PgConnection,
        id: Uuid,
        check_out: &TimeLogCheckOut,
    ) -> Result<TimeLog, ApiError> {
        diesel::update(time_logs::table.find(id))
            .set((check_out, time_logs::updated_at.eq(Utc::now())))
            .returning(TimeLog::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn record_decision(
        conn: &mut PgConnection,
        id: Uuid,
        decision: &TimeLogDecision,
    ) -> Result<TimeLog, ApiError> {
        diesel::update(time_logs::table.find(id))
            .set((decision, time_logs::updated_at.eq(Utc::now())))
            .returning(TimeLog::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Newest first.
    pub fn list_for_user(conn: &mut PgConnection, user_id: Uuid) -> Result<Vec<TimeLog>, ApiError> {
        time_logs::table
            .filter(time_logs::user_id.eq(user_id))
            .order(time_logs::check_in.desc())
            .select(TimeLog::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    /// Oldest first, paired with the owning employee.
    pub fn list_pending_for_company(
        conn: &mut PgConnection,
        company_id: Uuid,
    ) -> Result<Vec<(TimeLog, User)>, ApiError> {
        time_logs::table
            .inner_join(users::table)
            .filter(users::company_id.eq(company_id))
            .filter(time_logs::status.eq(TimeLogStatus::PendingApproval))
            .order(time_logs::created_at.asc())
            .select((TimeLog::as_select(), User::as_select()))
            .load(conn)
            .map_err(ApiError::from)
    }
}
