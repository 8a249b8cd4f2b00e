use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Associations, Identifiable, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::audit_configurations)]
#[diesel(belongs_to(crate::models::entities::company::Company))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AuditConfiguration {
    #[serde(skip_serializing)]
    pub id: Uuid,
    #[serde(skip_serializing)]
    pub company_id: Uuid,
    pub tracked_fields: Vec<String>,
    pub require_justification: bool,
    pub is_enabled: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::audit_configurations)]
pub struct NewAuditConfiguration<'a> {
    pub company_id: Uuid,
    pub tracked_fields: &'a [String],
    pub require_justification: bool,
    pub is_enabled: bool,
}
