//! Identifier types for the monitored site domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier of a monitored site.
///
/// Identifiers are allocated by the persistence layer on insert and never
/// change afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteId(i32);

impl SiteId {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl From<i32> for SiteId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
