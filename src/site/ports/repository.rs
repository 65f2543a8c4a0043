//! Repository port for monitored site persistence.

use crate::site::domain::{MonitoredSite, NewSite, SiteId, SiteStatus, SiteUrl, StatusUpdate};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for site repository operations.
pub type SiteRepositoryResult<T> = Result<T, SiteRepositoryError>;

/// Offset/limit window over the id-ordered site listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SitePage {
    /// Number of leading records to skip.
    pub offset: u32,
    /// Maximum number of records to return.
    pub limit: u32,
}

impl SitePage {
    /// Creates a page window.
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }
}

/// Result of committing a batch of status updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchCommit {
    /// Sites as stored after the commit, in update order.
    pub applied: Vec<MonitoredSite>,
    /// Ids that no longer existed and were skipped.
    pub missing: Vec<SiteId>,
}

/// Monitored site persistence contract.
#[async_trait]
pub trait SiteRepository: Send + Sync {
    /// Inserts a new site and returns it with its assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::DuplicateUrl`] when another site already
    /// uses the URL.
    async fn create(&self, new_site: &NewSite) -> SiteRepositoryResult<MonitoredSite>;

    /// Finds a site by identifier.
    ///
    /// Returns `None` when the site does not exist.
    async fn find_by_id(&self, id: SiteId) -> SiteRepositoryResult<Option<MonitoredSite>>;

    /// Returns one page of sites ordered by identifier.
    async fn list(&self, page: SitePage) -> SiteRepositoryResult<Vec<MonitoredSite>>;

    /// Returns a consistent snapshot of every site ordered by identifier.
    async fn list_all(&self) -> SiteRepositoryResult<Vec<MonitoredSite>>;

    /// Overwrites the status and `updated_at` of one site.
    ///
    /// `updated_at` is set to the later of `checked_at` and the site's
    /// `created_at`. Batch updates follow the same rule.
    ///
    /// # Errors
    ///
    /// Returns [`SiteRepositoryError::NotFound`] when the site does not exist.
    async fn update_status(
        &self,
        id: SiteId,
        status: SiteStatus,
        checked_at: DateTime<Utc>,
    ) -> SiteRepositoryResult<MonitoredSite>;

    /// Applies every update as one atomic unit.
    ///
    /// Updates addressing ids that no longer exist are skipped and listed in
    /// [`BatchCommit::missing`]. Any other failure leaves the store unchanged.
    async fn apply_status_batch(&self, updates: &[StatusUpdate])
    -> SiteRepositoryResult<BatchCommit>;
}

/// Errors returned by site repository implementations.
#[derive(Debug, Clone, Error)]
pub enum SiteRepositoryError {
    /// A site with the same URL already exists.
    #[error("duplicate site URL: {0}")]
    DuplicateUrl(SiteUrl),

    /// The site was not found.
    #[error("site not found: {0}")]
    NotFound(SiteId),

    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl SiteRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
