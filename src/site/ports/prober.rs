//! Probe port for outbound reachability checks.

use crate::site::domain::SiteUrl;
use async_trait::async_trait;
use std::time::Duration;

/// Result of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// An HTTP response was received, whatever its status class.
    Reached {
        /// Status code of the final response.
        status_code: u16,
        /// Time until the response headers arrived.
        elapsed: Duration,
    },
    /// No usable response: connection, DNS, TLS, timeout, or protocol error.
    Failed {
        /// Human-readable diagnostic.
        reason: String,
    },
}

impl ProbeOutcome {
    /// Creates a `Reached` outcome.
    #[must_use]
    pub const fn reached(status_code: u16, elapsed: Duration) -> Self {
        Self::Reached {
            status_code,
            elapsed,
        }
    }

    /// Creates a `Failed` outcome.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }
}

/// Issues one outbound HTTP GET per call.
///
/// Implementations never retry and never return an error: every transport
/// failure is folded into [`ProbeOutcome::Failed`].
#[async_trait]
pub trait SiteProber: Send + Sync {
    /// Probes `url`, giving up after `timeout`.
    async fn probe(&self, url: &SiteUrl, timeout: Duration) -> ProbeOutcome;
}
