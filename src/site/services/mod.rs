//! Application services for monitored sites.

mod catalog;
mod check;

pub use catalog::{CreateSiteRequest, SiteCatalogError, SiteCatalogResult, SiteCatalogService};
pub use check::{
    CheckSettings, DEFAULT_MAX_CONCURRENT_PROBES, DEFAULT_PROBE_TIMEOUT, PassSummary,
    ReconciliationPass, SiteCheckError, SiteCheckResult, SiteCheckService,
};
