//! Scripted in-memory prober for deterministic check passes.

use crate::site::{
    domain::SiteUrl,
    ports::{ProbeOutcome, SiteProber},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Prober that answers from a URL-keyed script instead of the network.
///
/// Unscripted URLs fail as if the host could not be resolved. A scripted
/// latency longer than the caller's timeout fails the probe as timed out.
/// Every call and the timeout it carried are recorded, and the peak number
/// of concurrent calls is tracked so tests can observe fan-out limits.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProber {
    state: Arc<RwLock<ScriptState>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

#[derive(Debug, Default)]
struct ScriptState {
    outcomes: HashMap<String, ProbeOutcome>,
    calls: Vec<SiteUrl>,
    timeouts: Vec<Duration>,
    latency: Duration,
}

impl ScriptedProber {
    /// Creates a prober with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts a response with the given status code for `url`.
    #[must_use]
    pub fn responding(self, url: &str, status_code: u16) -> Self {
        self.script(url, ProbeOutcome::reached(status_code, Duration::ZERO))
    }

    /// Scripts a transport failure for `url`.
    #[must_use]
    pub fn failing(self, url: &str, reason: &str) -> Self {
        self.script(url, ProbeOutcome::failed(reason))
    }

    /// Delays every probe by `latency` before answering.
    #[must_use]
    pub fn with_latency(self, latency: Duration) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.latency = latency;
        }
        self
    }

    /// Replaces the scripted outcome for `url`.
    #[must_use]
    pub fn script(self, url: &str, outcome: ProbeOutcome) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.outcomes.insert(url.to_owned(), outcome);
        }
        self
    }

    /// Returns every URL probed so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<SiteUrl> {
        self.state
            .read()
            .map(|state| state.calls.clone())
            .unwrap_or_default()
    }

    /// Returns the timeout passed with each call, in call order.
    #[must_use]
    pub fn timeouts(&self) -> Vec<Duration> {
        self.state
            .read()
            .map(|state| state.timeouts.clone())
            .unwrap_or_default()
    }

    /// Returns the highest number of probes that were in flight at once.
    #[must_use]
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SiteProber for ScriptedProber {
    async fn probe(&self, url: &SiteUrl, timeout: Duration) -> ProbeOutcome {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        let (outcome, latency) = match self.state.write() {
            Ok(mut state) => {
                state.calls.push(url.clone());
                state.timeouts.push(timeout);
                let scripted = state
                    .outcomes
                    .get(url.as_str())
                    .cloned()
                    .unwrap_or_else(|| {
                        ProbeOutcome::failed(format!("dns error: no scripted host for {url}"))
                    });
                (scripted, state.latency)
            }
            Err(err) => (ProbeOutcome::failed(err.to_string()), Duration::ZERO),
        };

        let answered = if latency > timeout {
            tokio::time::sleep(timeout).await;
            ProbeOutcome::failed(format!("timed out after {timeout:?}"))
        } else {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            outcome
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        answered
    }
}
