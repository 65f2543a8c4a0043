//! Monitored site aggregate and its creation payload.

use super::{SiteId, SiteStatus, SiteUrl};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// A URL under periodic reachability observation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitoredSite {
    id: SiteId,
    url: SiteUrl,
    description: Option<String>,
    status: SiteStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSiteData {
    /// Store-assigned identifier.
    pub id: SiteId,
    /// Probe target.
    pub url: SiteUrl,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Last observed status.
    pub status: SiteStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of creation or of the latest status write.
    pub updated_at: DateTime<Utc>,
}

impl MonitoredSite {
    /// Reconstructs a site from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSiteData) -> Self {
        Self {
            id: data.id,
            url: data.url,
            description: data.description,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Materialises a freshly inserted site from its creation payload.
    #[must_use]
    pub fn from_new(id: SiteId, new_site: &NewSite) -> Self {
        Self {
            id,
            url: new_site.url.clone(),
            description: new_site.description.clone(),
            status: SiteStatus::Unchecked,
            created_at: new_site.created_at,
            updated_at: new_site.created_at,
        }
    }

    /// Returns the site identifier.
    #[must_use]
    pub const fn id(&self) -> SiteId {
        self.id
    }

    /// Returns the probe target.
    #[must_use]
    pub const fn url(&self) -> &SiteUrl {
        &self.url
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the last observed status.
    #[must_use]
    pub const fn status(&self) -> SiteStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the site was last probed, or `None` if it never was.
    #[must_use]
    pub const fn last_checked_at(&self) -> Option<DateTime<Utc>> {
        if self.status.is_checked() {
            Some(self.updated_at)
        } else {
            None
        }
    }

    /// Records a probe result observed at `checked_at`.
    ///
    /// `updated_at` never moves before `created_at`.
    pub fn record_check(&mut self, status: SiteStatus, checked_at: DateTime<Utc>) {
        self.status = status;
        self.updated_at = checked_at.max(self.created_at);
    }
}

/// Validated payload for inserting a new site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSite {
    url: SiteUrl,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl NewSite {
    /// Creates an insert payload stamped with the current clock time.
    ///
    /// Blank descriptions are normalised to `None`.
    #[must_use]
    pub fn new(url: SiteUrl, description: Option<String>, clock: &impl Clock) -> Self {
        let normalized = description
            .map(|text| text.trim().to_owned())
            .filter(|text| !text.is_empty());
        Self {
            url,
            description: normalized,
            created_at: clock.utc(),
        }
    }

    /// Returns the probe target.
    #[must_use]
    pub const fn url(&self) -> &SiteUrl {
        &self.url
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the creation timestamp applied to both timestamp columns.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// A pending status write produced by a reconciliation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Site to update.
    pub id: SiteId,
    /// Status observed by the probe.
    pub status: SiteStatus,
    /// Pass timestamp written to `updated_at`.
    pub checked_at: DateTime<Utc>,
}

impl StatusUpdate {
    /// Creates a pending status write.
    #[must_use]
    pub const fn new(id: SiteId, status: SiteStatus, checked_at: DateTime<Utc>) -> Self {
        Self {
            id,
            status,
            checked_at,
        }
    }
}
