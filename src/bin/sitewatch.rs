//! Site monitoring HTTP service.
//!
//! Usage:
//!
//! ```text
//! sitewatch [--listen 0.0.0.0:8000] [--database-url postgres://...]
//! ```
//!
//! Every flag also reads from the environment; see `sitewatch --help`.

use clap::Parser;
use mockable::DefaultClock;
use sitewatch::config::AppConfig;
use sitewatch::site::{
    adapters::{http::HttpProber, postgres::PostgresSiteRepository},
    services::{SiteCatalogService, SiteCheckService},
};
use sitewatch::telemetry::init_logging;
use sitewatch::web::{AppState, router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::parse();
    init_logging()?;

    if let Err(err) = config.validate() {
        error!(error = %err, "invalid configuration");
        return Err(err.into());
    }
    let settings = config.check_settings()?;

    let database_url = config.database_url().map_err(|err| {
        error!(error = %err, "could not resolve database connection string");
        err
    })?;
    let repository = Arc::new(PostgresSiteRepository::connect(
        &database_url,
        config.db_pool_size,
    )?);
    repository.ensure_schema().await?;

    let prober = Arc::new(HttpProber::new()?);
    let clock = Arc::new(DefaultClock);
    let state = AppState::new(
        SiteCatalogService::new(Arc::clone(&repository), Arc::clone(&clock)),
        SiteCheckService::new(repository, prober, clock, settings),
    );

    let listener = TcpListener::bind(config.listen).await?;
    info!(
        listen = %config.listen,
        threshold_secs = config.check_threshold_secs,
        probe_timeout_secs = config.probe_timeout_secs,
        max_concurrent_probes = config.max_concurrent_probes,
        "sitewatch listening"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("sitewatch stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to listen for shutdown signal");
    }
}
