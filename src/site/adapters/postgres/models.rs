//! Diesel row models for monitored site persistence.

use super::schema::sites;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for site records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sites)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SiteRow {
    /// Store-assigned identifier.
    pub id: i32,
    /// Unique probe target.
    pub url: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Nullable status column.
    pub status: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for site records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sites)]
pub struct NewSiteRow {
    /// Unique probe target.
    pub url: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Initial status, always `NULL`.
    pub status: Option<i32>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Initial update timestamp, equal to `created_at`.
    pub updated_at: DateTime<Utc>,
}
