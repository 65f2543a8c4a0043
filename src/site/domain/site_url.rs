//! Validated probe target URL.

use super::SiteDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Maximum URL length, matching the `VARCHAR(2048)` column.
const MAX_URL_LENGTH: usize = 2048;

/// Absolute `http` or `https` URL of a monitored site.
///
/// The trimmed input is kept verbatim so clients read back exactly what they
/// registered; parsing is only used for validation. Deserialisation goes
/// through [`SiteUrl::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SiteUrl(String);

impl SiteUrl {
    /// Creates a validated site URL.
    ///
    /// # Errors
    ///
    /// Returns [`SiteDomainError::EmptyUrl`] for blank input,
    /// [`SiteDomainError::UrlTooLong`] past 2048 characters,
    /// [`SiteDomainError::InvalidUrl`] when parsing fails, or
    /// [`SiteDomainError::UnsupportedScheme`] for schemes other than `http`
    /// and `https`.
    pub fn new(value: impl Into<String>) -> Result<Self, SiteDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(SiteDomainError::EmptyUrl);
        }

        if trimmed.chars().count() > MAX_URL_LENGTH {
            return Err(SiteDomainError::UrlTooLong(raw));
        }

        let parsed = Url::parse(trimmed).map_err(|err| SiteDomainError::InvalidUrl {
            url: raw.clone(),
            reason: err.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SiteDomainError::UnsupportedScheme(raw));
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SiteUrl {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for SiteUrl {
    type Error = SiteDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SiteUrl> for String {
    fn from(url: SiteUrl) -> Self {
        url.0
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
