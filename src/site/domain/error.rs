//! Error types for monitored site domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing monitored site domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SiteDomainError {
    /// The site URL is empty after trimming.
    #[error("site URL must not be empty")]
    EmptyUrl,

    /// The site URL could not be parsed as an absolute URL.
    #[error("site URL '{url}' is not a valid absolute URL: {reason}")]
    InvalidUrl {
        /// The rejected input.
        url: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The site URL uses a scheme other than `http` or `https`.
    #[error("site URL '{0}' must use the http or https scheme")]
    UnsupportedScheme(String),

    /// The site URL exceeds the 2048-character storage limit.
    #[error("site URL exceeds 2048 character limit: {0}")]
    UrlTooLong(String),

    /// A status code outside the 100-599 range was supplied.
    #[error("HTTP status code {0} is outside the 100-599 range")]
    InvalidStatusCode(u16),
}

/// Error returned while parsing a persisted status column.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown persisted site status: {0}")]
pub struct ParseSiteStatusError(pub i32);
