//! Due-for-recheck decision.

use chrono::{DateTime, TimeDelta, Utc};

/// Default minimum interval between two probes of the same site.
pub const DEFAULT_STALENESS_THRESHOLD: TimeDelta = TimeDelta::minutes(5);

/// Decides whether a site is due for re-probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    threshold: TimeDelta,
}

impl StalenessPolicy {
    /// Creates a policy with the given threshold.
    #[must_use]
    pub const fn new(threshold: TimeDelta) -> Self {
        Self { threshold }
    }

    /// Returns the configured threshold.
    #[must_use]
    pub const fn threshold(&self) -> TimeDelta {
        self.threshold
    }

    /// Returns `true` when a site checked at `last_checked_at` must be probed
    /// again at `now`.
    ///
    /// A site that was never checked is always due. The boundary is
    /// inclusive: exactly `threshold` after the last check is due.
    #[must_use]
    pub fn is_due(&self, last_checked_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        last_checked_at
            .is_none_or(|checked_at| now.signed_duration_since(checked_at) >= self.threshold)
    }
}

impl Default for StalenessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_STALENESS_THRESHOLD)
    }
}
