//! Database credential sources.

use super::ConfigError;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the database user.
pub const DB_USER_ENV: &str = "DB_USER";

/// Environment variable holding the database password.
pub const DB_PASSWORD_ENV: &str = "DB_PASSWORD";

/// Username and password for the site store.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DatabaseCredentials {
    username: String,
    password: String,
}

impl DatabaseCredentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Returns the database user.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the database password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for DatabaseCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Source of database credentials, consulted once at startup.
pub trait SecretProvider {
    /// Resolves the credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the secret is missing or malformed.
    fn credentials(&self) -> Result<DatabaseCredentials, ConfigError>;
}

/// Reads credentials from `DB_USER` and `DB_PASSWORD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretProvider;

impl SecretProvider for EnvSecretProvider {
    fn credentials(&self) -> Result<DatabaseCredentials, ConfigError> {
        let username = env::var(DB_USER_ENV).map_err(|_| ConfigError::MissingSecret(DB_USER_ENV))?;
        let password =
            env::var(DB_PASSWORD_ENV).map_err(|_| ConfigError::MissingSecret(DB_PASSWORD_ENV))?;
        Ok(DatabaseCredentials::new(username, password))
    }
}

/// Reads credentials from a JSON document `{"username": .., "password": ..}`.
///
/// This is the payload shape of managed secret stores that mount secrets as
/// files.
#[derive(Debug, Clone)]
pub struct FileSecretProvider {
    path: PathBuf,
}

impl FileSecretProvider {
    /// Creates a provider reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the secret file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SecretProvider for FileSecretProvider {
    fn credentials(&self) -> Result<DatabaseCredentials, ConfigError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| ConfigError::SecretFile {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::MalformedSecret {
            path: self.path.clone(),
            source,
        })
    }
}
