//! In-memory site repository for tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use crate::site::{
    domain::{MonitoredSite, NewSite, SiteId, SiteStatus, SiteUrl, StatusUpdate},
    ports::{BatchCommit, SitePage, SiteRepository, SiteRepositoryError, SiteRepositoryResult},
};

/// Thread-safe in-memory site repository.
///
/// Identifiers are allocated sequentially from 1, mirroring a `SERIAL`
/// column. A batch commit holds the write lock for its whole duration, so
/// readers never observe a partially applied batch.
#[derive(Debug, Clone, Default)]
pub struct InMemorySiteRepository {
    state: Arc<RwLock<InMemorySiteState>>,
}

#[derive(Debug, Default)]
struct InMemorySiteState {
    sites: BTreeMap<SiteId, MonitoredSite>,
    url_index: HashMap<SiteUrl, SiteId>,
    last_id: i32,
    batch_commits: usize,
}

impl InMemorySiteRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many non-empty batch commits have been applied.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when lock acquisition fails.
    pub fn batch_commit_count(&self) -> SiteRepositoryResult<usize> {
        let state = self.state.read().map_err(internal_error)?;
        Ok(state.batch_commits)
    }
}

fn internal_error(err: impl std::fmt::Display) -> SiteRepositoryError {
    SiteRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl SiteRepository for InMemorySiteRepository {
    async fn create(&self, new_site: &NewSite) -> SiteRepositoryResult<MonitoredSite> {
        let mut state = self.state.write().map_err(internal_error)?;

        if state.url_index.contains_key(new_site.url()) {
            return Err(SiteRepositoryError::DuplicateUrl(new_site.url().clone()));
        }

        let next = state
            .last_id
            .checked_add(1)
            .ok_or_else(|| internal_error("site identifier space exhausted"))?;
        state.last_id = next;
        let id = SiteId::new(next);
        let site = MonitoredSite::from_new(id, new_site);

        state.url_index.insert(new_site.url().clone(), id);
        state.sites.insert(id, site.clone());
        Ok(site)
    }

    async fn find_by_id(&self, id: SiteId) -> SiteRepositoryResult<Option<MonitoredSite>> {
        let state = self.state.read().map_err(internal_error)?;
        Ok(state.sites.get(&id).cloned())
    }

    async fn list(&self, page: SitePage) -> SiteRepositoryResult<Vec<MonitoredSite>> {
        let state = self.state.read().map_err(internal_error)?;
        let offset = usize::try_from(page.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
        Ok(state
            .sites
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> SiteRepositoryResult<Vec<MonitoredSite>> {
        let state = self.state.read().map_err(internal_error)?;
        Ok(state.sites.values().cloned().collect())
    }

    async fn update_status(
        &self,
        id: SiteId,
        status: SiteStatus,
        checked_at: DateTime<Utc>,
    ) -> SiteRepositoryResult<MonitoredSite> {
        let mut state = self.state.write().map_err(internal_error)?;
        let site = state
            .sites
            .get_mut(&id)
            .ok_or(SiteRepositoryError::NotFound(id))?;
        site.record_check(status, checked_at);
        Ok(site.clone())
    }

    async fn apply_status_batch(
        &self,
        updates: &[StatusUpdate],
    ) -> SiteRepositoryResult<BatchCommit> {
        let mut state = self.state.write().map_err(internal_error)?;
        let mut commit = BatchCommit::default();

        for update in updates {
            match state.sites.get_mut(&update.id) {
                Some(site) => {
                    site.record_check(update.status, update.checked_at);
                    commit.applied.push(site.clone());
                }
                None => commit.missing.push(update.id),
            }
        }

        if !commit.applied.is_empty() {
            state.batch_commits += 1;
        }
        Ok(commit)
    }
}
