use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::audit_dto::AuditHistoryQuery;
use chronos_primitives::models::entities::audit_configuration::{
    AuditConfiguration, NewAuditConfiguration,
};
use chronos_primitives::models::entities::user_movement_history::{
    NewUserMovementHistory, UserMovementHistory,
};
use chronos_primitives::schema::{audit_configurations, user_movement_history};
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

pub struct AuditRepository;

impl AuditRepository {
    pub fn find_configuration(
        conn: &mut PgConnection,
        company_id: Uuid,
    ) -> Result<Option<AuditConfiguration>, ApiError> {
        audit_configurations::table
            .filter(audit_configurations::company_id.eq(company_id))
            .select(AuditConfiguration::as_select())
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Inserts unless the company already has a row. Returns rows written.
    pub fn insert_configuration_if_absent(
        conn: &mut PgConnection,
        config: &NewAuditConfiguration,
    ) -> Result<usize, ApiError> {
        diesel::insert_into(audit_configurations::table)
            .values(config)
            .on_conflict(audit_configurations::company_id)
            .do_nothing()
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn upsert_configuration(
        conn: &mut PgConnection,
        config: &NewAuditConfiguration,
    ) -> Result<AuditConfiguration, ApiError> {
        diesel::insert_into(audit_configurations::table)
            .values(config)
            .on_conflict(audit_configurations::company_id)
            .do_update()
            .set((config, audit_configurations::updated_at.eq(Utc::now())))
            .returning(AuditConfiguration::as_returning())
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn insert_history(
        conn: &mut PgConnection,
        rows: &[NewUserMovementHistory],
    ) -> Result<usize, ApiError> {
        if rows.is_empty() {
            return Ok(0);
        }
        diesel::insert_into(user_movement_history::table)
            .values(rows)
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn count_history(
        conn: &mut PgConnection,
        company_id: Uuid,
        query: &AuditHistoryQuery,
    ) -> Result<i64, ApiError> {
        Self::filtered(company_id, query)
            .count()
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Newest first.
    pub fn find_history_page(
        conn: &mut PgConnection,
        company_id: Uuid,
        query: &AuditHistoryQuery,
    ) -> Result<Vec<UserMovementHistory>, ApiError> {
        Self::filtered(company_id, query)
            .order((
                user_movement_history::created_at.desc(),
                user_movement_history::id.desc(),
            ))
            .limit(query.limit())
            .offset(query.offset())
            .select(UserMovementHistory::as_select())
            .load(conn)
            .map_err(ApiError::from)
    }

    fn filtered<'a>(
        company_id: Uuid,
        query: &'a AuditHistoryQuery,
    ) -> user_movement_history::BoxedQuery<'a, Pg> {
        let mut q = user_movement_history::table
            .filter(user_movement_history::company_id.eq(company_id))
            .into_boxed();

        if let Some(user_id) = query.user_id {
            q = q.filter(user_movement_history::user_id.eq(user_id));
        }
        if let Some(field_name) = query.field_name.as_deref() {
            q = q.filter(user_movement_history::field_name.eq(field_name));
        }
        if let Some(changed_by_id) = query.changed_by_id {
            q = q.filter(user_movement_history::changed_by_id.eq(changed_by_id));
        }
        if let Some(from) = query.date_from {
            q = q.filter(user_movement_history::created_at.ge(start_of_day(from)));
        }
        if let Some(to) = query.date_to {
            // inclusive: everything before the next midnight
            if let Some(next) = to.checked_add_days(Days::new(1)) {
                q = q.filter(user_movement_history::created_at.lt(start_of_day(next)));
            }
        }
        q
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
