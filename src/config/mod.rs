//! Process configuration resolved once at startup.
//!
//! Every setting can be given as a flag or through the environment. The
//! database connection string comes from `DATABASE_URL` when present, and is
//! otherwise assembled from host, port, database name, and credentials taken
//! from a [`SecretProvider`].

mod secrets;

pub use secrets::{
    DB_PASSWORD_ENV, DB_USER_ENV, DatabaseCredentials, EnvSecretProvider, FileSecretProvider,
    SecretProvider,
};

use crate::site::{domain::StalenessPolicy, services::CheckSettings};
use chrono::TimeDelta;
use clap::Parser;
use std::net::SocketAddr;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A numeric setting that must be positive was zero.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// A numeric setting does not fit the range the service can represent.
    #[error("{name} is out of range: {value}")]
    OutOfRange {
        /// Setting name.
        name: &'static str,
        /// Rejected value.
        value: u64,
    },

    /// A required secret is absent.
    #[error("missing secret: {0}")]
    MissingSecret(&'static str),

    /// The secret file could not be read.
    #[error("failed to read secret file {}: {source}", path.display())]
    SecretFile {
        /// Secret file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The secret file is not a valid credential document.
    #[error("malformed secret file {}: {source}", path.display())]
    MalformedSecret {
        /// Secret file path.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The connection string could not be assembled.
    #[error("invalid database URL: {0}")]
    DatabaseUrl(String),
}

/// Site monitoring service settings.
#[derive(Debug, Clone, Parser)]
#[command(name = "sitewatch", version, about = "Monitors HTTP reachability of registered sites")]
pub struct AppConfig {
    /// Address the HTTP API listens on.
    #[arg(long, env = "SITEWATCH_LISTEN", default_value = "0.0.0.0:8000")]
    pub listen: SocketAddr,

    /// Full `PostgreSQL` connection string; overrides the discrete settings.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Database host.
    #[arg(long, env = "DB_HOST", default_value = "127.0.0.1")]
    pub db_host: String,

    /// Database port.
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name.
    #[arg(long, env = "DB_NAME", default_value = "sitewatch")]
    pub db_name: String,

    /// JSON credential file; `DB_USER`/`DB_PASSWORD` are used when absent.
    #[arg(long, env = "SITEWATCH_DB_SECRET_FILE")]
    pub db_secret_file: Option<PathBuf>,

    /// Maximum pooled database connections.
    #[arg(long, env = "SITEWATCH_DB_POOL_SIZE", default_value_t = 10)]
    pub db_pool_size: u32,

    /// Seconds after which a checked site is probed again.
    #[arg(long, env = "SITEWATCH_CHECK_THRESHOLD_SECS", default_value_t = 300)]
    pub check_threshold_secs: u64,

    /// Per-probe timeout in seconds.
    #[arg(long, env = "SITEWATCH_PROBE_TIMEOUT_SECS", default_value_t = 10)]
    pub probe_timeout_secs: u64,

    /// Maximum probes in flight during one pass.
    #[arg(long, env = "SITEWATCH_MAX_CONCURRENT_PROBES", default_value_t = 8)]
    pub max_concurrent_probes: usize,
}

impl AppConfig {
    /// Rejects settings the service cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Zero`] or [`ConfigError::OutOfRange`] for the
    /// first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.db_pool_size == 0 {
            return Err(ConfigError::Zero("db_pool_size"));
        }
        self.check_settings().map(|_| ())
    }

    /// Builds the reconciliation settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value is zero or out of range.
    pub fn check_settings(&self) -> Result<CheckSettings, ConfigError> {
        if self.probe_timeout_secs == 0 {
            return Err(ConfigError::Zero("probe_timeout_secs"));
        }
        if self.check_threshold_secs == 0 {
            return Err(ConfigError::Zero("check_threshold_secs"));
        }
        let max_concurrent_probes = NonZeroUsize::new(self.max_concurrent_probes)
            .ok_or(ConfigError::Zero("max_concurrent_probes"))?;
        let threshold = i64::try_from(self.check_threshold_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or(ConfigError::OutOfRange {
                name: "check_threshold_secs",
                value: self.check_threshold_secs,
            })?;

        Ok(CheckSettings {
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            max_concurrent_probes,
            staleness: StalenessPolicy::new(threshold),
        })
    }

    /// Resolves the connection string using the configured secret source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when credentials cannot be resolved or the URL
    /// cannot be assembled.
    pub fn database_url(&self) -> Result<String, ConfigError> {
        match &self.db_secret_file {
            Some(path) => self.database_url_with(&FileSecretProvider::new(path)),
            None => self.database_url_with(&EnvSecretProvider),
        }
    }

    /// Resolves the connection string, consulting `provider` only when no
    /// explicit URL is configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when credentials cannot be resolved or the URL
    /// cannot be assembled.
    pub fn database_url_with(&self, provider: &impl SecretProvider) -> Result<String, ConfigError> {
        if let Some(url) = self.database_url.as_deref().filter(|url| !url.trim().is_empty()) {
            return Ok(url.to_owned());
        }
        let credentials = provider.credentials()?;
        build_database_url(&self.db_host, self.db_port, &self.db_name, &credentials)
    }
}

/// Assembles a `postgres://` URL with percent-encoded credentials.
///
/// # Errors
///
/// Returns [`ConfigError::DatabaseUrl`] when a component is rejected.
pub fn build_database_url(
    host: &str,
    port: u16,
    database: &str,
    credentials: &DatabaseCredentials,
) -> Result<String, ConfigError> {
    let mut url = Url::parse(&format!("postgres://{host}"))
        .map_err(|err| ConfigError::DatabaseUrl(format!("host '{host}': {err}")))?;
    url.set_port(Some(port))
        .map_err(|()| ConfigError::DatabaseUrl(format!("port {port}")))?;
    url.set_username(credentials.username())
        .map_err(|()| ConfigError::DatabaseUrl("username".to_owned()))?;
    url.set_password(Some(credentials.password()))
        .map_err(|()| ConfigError::DatabaseUrl("password".to_owned()))?;
    url.set_path(&format!("/{database}"));
    Ok(url.into())
}
