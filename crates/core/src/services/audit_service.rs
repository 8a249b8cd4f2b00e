pub mod diff;
pub mod fields;

use crate::app_state::AppState;
use crate::repositories::audit_repository::AuditRepository;
use crate::repositories::user_repository::UserRepository;
use crate::security::Claims;
use chronos_primitives::error::ApiError;
use chronos_primitives::models::dtos::audit_dto::{
    AuditHistoryEntryDto, AuditHistoryQuery, AuditHistoryResponse, AvailableField,
    UpdateAuditConfigRequest,
};
use chronos_primitives::models::dtos::user_dto::{FieldChange, UserChanges, UserRefDto};
use chronos_primitives::models::entities::audit_configuration::{
    AuditConfiguration, NewAuditConfiguration,
};
use chronos_primitives::models::entities::enum_types::UserRole;
use chronos_primitives::models::entities::user::User;
use chronos_primitives::models::entities::user_movement_history::NewUserMovementHistory;
use diesel::prelude::*;
use std::collections::HashMap;
use tracing::{error, info, warn};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

/// Client details captured at the HTTP edge.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Who is changing a record and from where.
#[derive(Debug, Clone, Default)]
pub struct ChangeContext {
    pub actor_id: Uuid,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub justification: Option<String>,
}

impl ChangeContext {
    pub fn new(actor_id: Uuid, meta: RequestMeta) -> Self {
        Self {
            actor_id,
            ip_address: meta.ip_address,
            user_agent: meta.user_agent,
            justification: None,
        }
    }

    pub fn with_justification(mut self, justification: Option<String>) -> Self {
        self.justification = justification
            .map(|j| j.trim().to_string())
            .filter(|j| !j.is_empty());
        self
    }
}

pub struct AuditService;

impl AuditService {
    /// Records one history row per tracked, actually-changed field of `changes`
    /// against the `before` snapshot. Runs on the caller's connection so it can
    /// share the caller's transaction. Returns the number of rows written.
    pub fn track_changes(
        conn: &mut PgConnection,
        before: &User,
        changes: &UserChanges,
        ctx: &ChangeContext,
    ) -> Result<usize, ApiError> {
        let Some(company_id) = before.company_id else {
            return Ok(0);
        };

        let config = Self::get_or_create_configuration(conn, company_id)?;
        if !config.is_enabled {
            return Ok(0);
        }

        let surviving = Self::select_changes(&config, changes.field_changes(before));
        if surviving.is_empty() {
            return Ok(0);
        }

        if config.require_justification && ctx.justification.is_none() {
            warn!(user_id = %before.id, "audit: change rejected, justification required");
            let mut errors = ValidationErrors::new();
            errors.add(
                "justification",
                ValidationError::new("justification_required")
                    .with_message("A justification is required for this change".into()),
            );
            return Err(ApiError::Validation(errors));
        }

        let rows: Vec<NewUserMovementHistory> = surviving
            .into_iter()
            .map(|change| NewUserMovementHistory {
                user_id: before.id,
                field_name: change.field.to_string(),
                old_value: change.old.to_json(),
                new_value: change.new.to_json(),
                diff: diff::generate_diff(change.field, &change.old, &change.new),
                changed_by_id: ctx.actor_id,
                justification: ctx.justification.clone(),
                ip_address: ctx.ip_address.clone(),
                user_agent: ctx.user_agent.clone(),
                company_id,
            })
            .collect();

        let written = AuditRepository::insert_history(conn, &rows)?;

        info!(
            user_id = %before.id,
            changed_by = %ctx.actor_id,
            rows = written,
            "audit: changes recorded"
        );

        Ok(written)
    }

    /// Drops excluded, untracked and unchanged fields.
    pub fn select_changes(
        config: &AuditConfiguration,
        changes: Vec<FieldChange>,
    ) -> Vec<FieldChange> {
        changes
            .into_iter()
            .filter(|c| fields::should_track_field(c.field, &config.tracked_fields))
            .filter(|c| c.old != c.new)
            .collect()
    }

    pub fn get_or_create_configuration(
        conn: &mut PgConnection,
        company_id: Uuid,
    ) -> Result<AuditConfiguration, ApiError> {
        if let Some(config) = AuditRepository::find_configuration(conn, company_id)? {
            return Ok(config);
        }

        let tracked_fields = fields::default_tracked_fields();
        let defaults = NewAuditConfiguration {
            company_id,
            tracked_fields: &tracked_fields,
            require_justification: false,
            is_enabled: true,
        };

        // a concurrent request may have created it in the meantime
        if AuditRepository::insert_configuration_if_absent(conn, &defaults)? > 0 {
            info!(company_id = %company_id, "audit: default configuration created");
        }

        AuditRepository::find_configuration(conn, company_id)?.ok_or_else(|| {
            error!(company_id = %company_id, "audit: configuration missing after insert");
            ApiError::Internal("Audit configuration unavailable".into())
        })
    }

    pub async fn get_configuration(
        state: &AppState,
        claims: &Claims,
    ) -> Result<AuditConfiguration, ApiError> {
        claims.require_role(UserRole::AUDIT_ADMINS)?;
        let company_id = claims.company_id()?;

        let mut conn = state.db.get().map_err(|_| {
            error!("audit.config: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        Self::get_or_create_configuration(&mut conn, company_id)
    }

    pub async fn update_configuration(
        state: &AppState,
        claims: &Claims,
        req: UpdateAuditConfigRequest,
    ) -> Result<AuditConfiguration, ApiError> {
        claims.require_role(UserRole::AUDIT_ADMINS)?;
        let company_id = claims.company_id()?;

        let tracked_fields = Self::normalize_tracked_fields(req.tracked_fields)?;

        let mut conn = state.db.get().map_err(|_| {
            error!("audit.config: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let config = AuditRepository::upsert_configuration(
            &mut conn,
            &NewAuditConfiguration {
                company_id,
                tracked_fields: &tracked_fields,
                require_justification: req.require_justification,
                is_enabled: req.is_enabled,
            },
        )?;

        info!(
            company_id = %company_id,
            fields = config.tracked_fields.len(),
            enabled = config.is_enabled,
            "audit: configuration updated"
        );

        Ok(config)
    }

    /// Trims and de-duplicates, keeping first occurrence order.
    pub fn normalize_tracked_fields(requested: Vec<String>) -> Result<Vec<String>, ApiError> {
        let mut out: Vec<String> = Vec::with_capacity(requested.len());

        for name in requested {
            let name = name.trim().to_string();
            if fields::is_excluded(&name) {
                return Err(ApiError::BadRequest(format!(
                    "Field '{}' cannot be audited",
                    name
                )));
            }
            if !fields::is_available(&name) {
                return Err(ApiError::BadRequest(format!("Unknown field '{}'", name)));
            }
            if !out.contains(&name) {
                out.push(name);
            }
        }

        if out.is_empty() {
            return Err(ApiError::BadRequest(
                "At least one field must be tracked".into(),
            ));
        }
        Ok(out)
    }

    pub fn available_fields(claims: &Claims) -> Result<&'static [AvailableField], ApiError> {
        claims.require_role(UserRole::AUDIT_ADMINS)?;
        Ok(fields::AVAILABLE_FIELDS)
    }

    pub async fn history(
        state: &AppState,
        claims: &Claims,
        query: AuditHistoryQuery,
    ) -> Result<AuditHistoryResponse, ApiError> {
        claims.require_role(UserRole::AUDIT_VIEWERS)?;
        let company_id = claims.company_id()?;

        let mut conn = state.db.get().map_err(|_| {
            error!("audit.history: failed to acquire db connection");
            ApiError::DatabaseConnection("Database unavailable".into())
        })?;

        let total = AuditRepository::count_history(&mut conn, company_id, &query)?;
        let rows = AuditRepository::find_history_page(&mut conn, company_id, &query)?;

        let mut ids: Vec<Uuid> = rows
            .iter()
            .flat_map(|r| [r.user_id, r.changed_by_id])
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let people: HashMap<Uuid, UserRefDto> = UserRepository::find_many(&mut conn, &ids)?
            .iter()
            .map(|u| (u.id, UserRefDto::from(u)))
            .collect();

        let data = rows
            .into_iter()
            .map(|row| AuditHistoryEntryDto {
                id: row.id,
                user: people.get(&row.user_id).cloned(),
                changed_by: people.get(&row.changed_by_id).cloned(),
                field_display_name: fields::display_name(&row.field_name).to_string(),
                old_value: parse_json(row.old_value.as_deref()),
                new_value: parse_json(row.new_value.as_deref()),
                field_name: row.field_name,
                diff: row.diff,
                justification: row.justification,
                ip_address: row.ip_address,
                created_at: row.created_at,
            })
            .collect();

        Ok(AuditHistoryResponse {
            data,
            pagination: query.window().pagination(total),
        })
    }
}

fn parse_json(raw: Option<&str>) -> Option<serde_json::Value> {
    raw.map(|s| serde_json::from_str(s).unwrap_or_else(|_| serde_json::Value::String(s.into())))
}
