//! Request and response bodies for the site API.

use crate::site::{domain::MonitoredSite, ports::SitePage, services::CreateSiteRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Page size applied when `limit` is omitted.
pub const DEFAULT_LIST_LIMIT: u32 = 10;

/// Largest page size a client may request.
pub const MAX_LIST_LIMIT: u32 = 1000;

/// JSON representation of a monitored site.
///
/// `status` carries the raw column value: `null` before the first check, the
/// HTTP status code after a response, or `-1` after a failed probe. `state`
/// names which of those applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteResponse {
    /// Site identifier.
    pub id: i32,
    /// Probe target.
    pub url: String,
    /// Optional description.
    pub description: Option<String>,
    /// Last observed status code, `-1`, or `null`.
    pub status: Option<i32>,
    /// `unchecked`, `responded`, or `unreachable`.
    pub state: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&MonitoredSite> for SiteResponse {
    fn from(site: &MonitoredSite) -> Self {
        Self {
            id: site.id().into_inner(),
            url: site.url().as_str().to_owned(),
            description: site.description().map(str::to_owned),
            status: site.status().to_storage(),
            state: site.status().label().to_owned(),
            created_at: site.created_at(),
            updated_at: site.updated_at(),
        }
    }
}

/// Body of `POST /sites`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSiteBody {
    /// URL to monitor.
    pub url: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl From<CreateSiteBody> for CreateSiteRequest {
    fn from(body: CreateSiteBody) -> Self {
        let request = Self::new(body.url);
        match body.description {
            Some(description) => request.with_description(description),
            None => request,
        }
    }
}

/// Query string of `GET /sites`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ListQuery {
    /// Records to skip.
    #[serde(default)]
    pub skip: u32,
    /// Records to return, capped at [`MAX_LIST_LIMIT`].
    #[serde(default = "default_limit")]
    pub limit: u32,
}

const fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT
}

impl ListQuery {
    /// Converts the query into a repository page.
    #[must_use]
    pub fn page(self) -> SitePage {
        SitePage::new(self.skip, self.limit.min(MAX_LIST_LIMIT))
    }
}

/// Body of `GET /healthcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `OK`.
    pub message: String,
}
