//! Last observed reachability status of a monitored site.

use super::{ParseSiteStatusError, SiteDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved storage value recorded when a probe fails at the transport level.
///
/// Real HTTP status codes are always positive, so the sentinel can never be
/// mistaken for a response.
pub const UNREACHABLE_SENTINEL: i32 = -1;

/// HTTP status code in the 100-599 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct HttpStatusCode(u16);

impl HttpStatusCode {
    /// Creates a validated status code.
    ///
    /// # Errors
    ///
    /// Returns [`SiteDomainError::InvalidStatusCode`] outside 100-599.
    pub const fn new(code: u16) -> Result<Self, SiteDomainError> {
        if code < 100 || code > 599 {
            return Err(SiteDomainError::InvalidStatusCode(code));
        }
        Ok(Self(code))
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for HttpStatusCode {
    type Error = SiteDomainError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<HttpStatusCode> for u16 {
    fn from(value: HttpStatusCode) -> Self {
        value.0
    }
}

impl fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of the most recent check of a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteStatus {
    /// The site has never been probed.
    #[default]
    Unchecked,
    /// The last probe received an HTTP response.
    Responded(HttpStatusCode),
    /// The last probe failed before any response arrived.
    Unreachable,
}

impl SiteStatus {
    /// Returns whether at least one probe has completed.
    #[must_use]
    pub const fn is_checked(self) -> bool {
        !matches!(self, Self::Unchecked)
    }

    /// Returns the canonical lowercase state label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unchecked => "unchecked",
            Self::Responded(_) => "responded",
            Self::Unreachable => "unreachable",
        }
    }

    /// Returns the nullable integer column representation.
    #[must_use]
    pub fn to_storage(self) -> Option<i32> {
        match self {
            Self::Unchecked => None,
            Self::Responded(code) => Some(i32::from(code.as_u16())),
            Self::Unreachable => Some(UNREACHABLE_SENTINEL),
        }
    }

    /// Parses the nullable integer column representation.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSiteStatusError`] for values that are neither the
    /// sentinel nor a valid HTTP status code.
    pub fn from_storage(value: Option<i32>) -> Result<Self, ParseSiteStatusError> {
        match value {
            None => Ok(Self::Unchecked),
            Some(UNREACHABLE_SENTINEL) => Ok(Self::Unreachable),
            Some(raw) => u16::try_from(raw)
                .ok()
                .and_then(|code| HttpStatusCode::new(code).ok())
                .map(Self::Responded)
                .ok_or(ParseSiteStatusError(raw)),
        }
    }
}

impl fmt::Display for SiteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Responded(code) => write!(f, "{code}"),
            other => f.write_str(other.label()),
        }
    }
}
