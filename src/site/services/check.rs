//! Reconciliation pass: probe every stale site and commit the results.
//!
//! A pass reads one snapshot of all sites, selects the ones the
//! [`StalenessPolicy`] marks as due, probes them concurrently up to a fixed
//! fan-out, and commits every resulting status in a single batch. Probe
//! failures are recorded as [`SiteStatus::Unreachable`] and never abort the
//! pass; a failing commit aborts it without touching the store.

use crate::site::{
    domain::{
        HttpStatusCode, MonitoredSite, SiteId, SiteStatus, StalenessPolicy, StatusUpdate,
    },
    ports::{ProbeOutcome, SiteProber, SiteRepository, SiteRepositoryError},
};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use mockable::Clock;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Default per-probe timeout.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of probes allowed in flight at once.
pub const DEFAULT_MAX_CONCURRENT_PROBES: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(limit) => limit,
    None => NonZeroUsize::MIN,
};

/// Tunables for reconciliation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckSettings {
    /// Timeout applied to each probe.
    pub probe_timeout: Duration,
    /// Upper bound on concurrent probes within one pass.
    pub max_concurrent_probes: NonZeroUsize,
    /// Rule selecting which sites are due.
    pub staleness: StalenessPolicy,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            max_concurrent_probes: DEFAULT_MAX_CONCURRENT_PROBES,
            staleness: StalenessPolicy::default(),
        }
    }
}

/// Counters describing one reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Sites selected for probing.
    pub due: usize,
    /// Sites left untouched because they were checked recently.
    pub fresh: usize,
    /// Probes that received an HTTP response.
    pub responded: usize,
    /// Probes that failed at the transport level.
    pub unreachable: usize,
    /// Status rows written by the batch commit.
    pub persisted: usize,
    /// Due sites that disappeared before the commit.
    pub missing: Vec<SiteId>,
}

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciliationPass {
    /// Full site listing read after the commit.
    pub sites: Vec<MonitoredSite>,
    /// Pass counters.
    pub summary: PassSummary,
}

/// Service-level errors for reconciliation passes.
#[derive(Debug, Error)]
pub enum SiteCheckError {
    /// Reading the snapshot, committing the batch, or re-reading failed.
    #[error(transparent)]
    Repository(#[from] SiteRepositoryError),
}

/// Result type for reconciliation passes.
pub type SiteCheckResult<T> = Result<T, SiteCheckError>;

/// Reconciliation orchestration service.
///
/// Passes issued through the same service (or its clones) run one at a
/// time; a pass triggered while another is running waits and then observes
/// the earlier pass's writes.
pub struct SiteCheckService<R, P, C>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    prober: Arc<P>,
    clock: Arc<C>,
    settings: CheckSettings,
    pass_lock: Arc<Mutex<()>>,
}

impl<R, P, C> Clone for SiteCheckService<R, P, C>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            prober: Arc::clone(&self.prober),
            clock: Arc::clone(&self.clock),
            settings: self.settings,
            pass_lock: Arc::clone(&self.pass_lock),
        }
    }
}

impl<R, P, C> SiteCheckService<R, P, C>
where
    R: SiteRepository,
    P: SiteProber,
    C: Clock + Send + Sync,
{
    /// Creates a new check service.
    #[must_use]
    pub fn new(repository: Arc<R>, prober: Arc<P>, clock: Arc<C>, settings: CheckSettings) -> Self {
        Self {
            repository,
            prober,
            clock,
            settings,
            pass_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Returns the active settings.
    #[must_use]
    pub const fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// Runs one pass using the service clock for "now".
    ///
    /// # Errors
    ///
    /// See [`Self::reconcile`].
    pub async fn run_pass(&self) -> SiteCheckResult<ReconciliationPass> {
        self.reconcile(self.clock.utc()).await
    }

    /// Runs one reconciliation pass as of `now`.
    ///
    /// # Errors
    ///
    /// Returns [`SiteCheckError::Repository`] when the snapshot read, the
    /// batch commit, or the final listing fails. Probe failures are not
    /// errors.
    pub async fn reconcile(&self, now: DateTime<Utc>) -> SiteCheckResult<ReconciliationPass> {
        let _pass_guard = self.pass_lock.lock().await;

        let snapshot = self.repository.list_all().await?;
        let staleness = self.settings.staleness;
        let (due, fresh): (Vec<MonitoredSite>, Vec<MonitoredSite>) = snapshot
            .into_iter()
            .partition(|site| staleness.is_due(site.last_checked_at(), now));
        debug!(due = due.len(), fresh = fresh.len(), "selected sites for probing");

        let due_count = due.len();
        let updates = self.probe_due_sites(due, now).await;

        let mut summary = PassSummary {
            due: due_count,
            fresh: fresh.len(),
            ..PassSummary::default()
        };
        for update in &updates {
            match update.status {
                SiteStatus::Responded(_) => summary.responded += 1,
                SiteStatus::Unreachable => summary.unreachable += 1,
                SiteStatus::Unchecked => {}
            }
        }

        if !updates.is_empty() {
            let commit = self.repository.apply_status_batch(&updates).await?;
            if !commit.missing.is_empty() {
                warn!(missing = ?commit.missing, "sites vanished before commit; skipped");
            }
            summary.persisted = commit.applied.len();
            summary.missing = commit.missing;
        }

        let sites = self.repository.list_all().await?;
        info!(
            due = summary.due,
            fresh = summary.fresh,
            responded = summary.responded,
            unreachable = summary.unreachable,
            persisted = summary.persisted,
            "reconciliation pass finished"
        );
        Ok(ReconciliationPass { sites, summary })
    }

    async fn probe_due_sites(
        &self,
        due: Vec<MonitoredSite>,
        now: DateTime<Utc>,
    ) -> Vec<StatusUpdate> {
        let timeout = self.settings.probe_timeout;

        stream::iter(due)
            .map(|site| {
                let prober = Arc::clone(&self.prober);
                async move {
                    let outcome = prober.probe(site.url(), timeout).await;
                    let status = status_from_outcome(&site, &outcome);
                    StatusUpdate::new(site.id(), status, now.max(site.created_at()))
                }
            })
            .buffer_unordered(self.settings.max_concurrent_probes.get())
            .collect()
            .await
    }
}

/// Maps a probe outcome to the status recorded for `site`.
fn status_from_outcome(site: &MonitoredSite, outcome: &ProbeOutcome) -> SiteStatus {
    match outcome {
        ProbeOutcome::Reached {
            status_code,
            elapsed,
        } => match HttpStatusCode::new(*status_code) {
            Ok(code) => {
                info!(
                    site_id = %site.id(),
                    url = %site.url(),
                    status = *status_code,
                    elapsed_ms = elapsed.as_millis(),
                    "site responded"
                );
                SiteStatus::Responded(code)
            }
            Err(err) => {
                warn!(site_id = %site.id(), url = %site.url(), error = %err, "site returned an unusable status");
                SiteStatus::Unreachable
            }
        },
        ProbeOutcome::Failed { reason } => {
            warn!(site_id = %site.id(), url = %site.url(), %reason, "probe failed; recording site as unreachable");
            SiteStatus::Unreachable
        }
    }
}
