//! Domain model for monitored sites.
//!
//! A monitored site is a URL whose HTTP reachability is re-checked once it
//! becomes stale. The domain owns validation of URLs and status codes, the
//! status representation including the unreachable sentinel, and the
//! staleness rule. Infrastructure concerns stay outside this boundary.

mod error;
mod ids;
mod site;
mod site_url;
mod staleness;
mod status;

pub use error::{ParseSiteStatusError, SiteDomainError};
pub use ids::SiteId;
pub use site::{MonitoredSite, NewSite, PersistedSiteData, StatusUpdate};
pub use site_url::SiteUrl;
pub use staleness::{DEFAULT_STALENESS_THRESHOLD, StalenessPolicy};
pub use status::{HttpStatusCode, SiteStatus, UNREACHABLE_SENTINEL};
