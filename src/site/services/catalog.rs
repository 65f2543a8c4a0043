//! Service layer for registering and reading monitored sites.

use crate::site::{
    domain::{MonitoredSite, NewSite, SiteDomainError, SiteId, SiteUrl},
    ports::{SitePage, SiteRepository, SiteRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for registering a site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateSiteRequest {
    url: String,
    description: Option<String>,
}

impl CreateSiteRequest {
    /// Creates a request for `url` without a description.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    /// Sets the free-text description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Service-level errors for site catalog operations.
#[derive(Debug, Error)]
pub enum SiteCatalogError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SiteDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] SiteRepositoryError),
    /// No site exists with the given identifier.
    #[error("site {0} not found")]
    NotFound(SiteId),
}

/// Result type for site catalog operations.
pub type SiteCatalogResult<T> = Result<T, SiteCatalogError>;

/// Create/read orchestration over the site repository.
pub struct SiteCatalogService<R, C>
where
    R: SiteRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for SiteCatalogService<R, C>
where
    R: SiteRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> SiteCatalogService<R, C>
where
    R: SiteRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new catalog service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new site with status unset and both timestamps set to now.
    ///
    /// # Errors
    ///
    /// Returns [`SiteCatalogError::Domain`] when the URL is invalid, or
    /// [`SiteCatalogError::Repository`] when the URL is already registered or
    /// persistence fails.
    pub async fn create(&self, request: CreateSiteRequest) -> SiteCatalogResult<MonitoredSite> {
        let CreateSiteRequest { url, description } = request;
        let site_url = SiteUrl::new(url)?;
        let new_site = NewSite::new(site_url, description, &*self.clock);
        let created = self.repository.create(&new_site).await?;
        info!(site_id = %created.id(), url = %created.url(), "registered site");
        Ok(created)
    }

    /// Returns the site with the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SiteCatalogError::NotFound`] when no site has the ID, or
    /// [`SiteCatalogError::Repository`] when lookup fails.
    pub async fn get(&self, id: SiteId) -> SiteCatalogResult<MonitoredSite> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(SiteCatalogError::NotFound(id))
    }

    /// Returns one page of sites ordered by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`SiteCatalogError::Repository`] when lookup fails.
    pub async fn list(&self, page: SitePage) -> SiteCatalogResult<Vec<MonitoredSite>> {
        Ok(self.repository.list(page).await?)
    }
}
