//! `reqwest`-backed HTTP prober.

use crate::site::{
    domain::SiteUrl,
    ports::{ProbeOutcome, SiteProber},
};
use async_trait::async_trait;
use std::error::Error as _;
use std::time::{Duration, Instant};
use tracing::debug;

/// `User-Agent` sent with every probe.
pub const PROBE_USER_AGENT: &str = concat!("sitewatch/", env!("CARGO_PKG_VERSION"));

/// HTTP GET prober sharing one connection pool across probes.
///
/// Redirects follow the client's default policy (up to ten hops) and the
/// final response's status is reported.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Creates a prober with a fresh client.
    ///
    /// # Errors
    ///
    /// Returns the client builder error when the TLS backend cannot be
    /// initialised.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(PROBE_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a prober around an existing client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SiteProber for HttpProber {
    async fn probe(&self, url: &SiteUrl, timeout: Duration) -> ProbeOutcome {
        let started = Instant::now();
        let result = self
            .client
            .get(url.as_str())
            .timeout(timeout)
            .send()
            .await;

        match result {
            Ok(response) => {
                let elapsed = started.elapsed();
                let status_code = response.status().as_u16();
                if !(100..=599).contains(&status_code) {
                    return ProbeOutcome::failed(format!(
                        "non-standard HTTP status {status_code} from {url}"
                    ));
                }
                debug!(%url, status_code, elapsed_ms = elapsed.as_millis(), "probe reached site");
                ProbeOutcome::reached(status_code, elapsed)
            }
            Err(err) => ProbeOutcome::failed(describe_failure(&err)),
        }
    }
}

/// Renders a transport error with its cause chain.
fn describe_failure(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "connection failed"
    } else if err.is_redirect() {
        "redirect loop"
    } else {
        "request failed"
    };

    let mut message = format!("{kind}: {err}");
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
