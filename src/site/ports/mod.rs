//! Port contracts for monitored site persistence and probing.
//!
//! Ports define infrastructure-agnostic interfaces used by the catalog and
//! check services.

mod prober;
mod repository;

pub use prober::{ProbeOutcome, SiteProber};
pub use repository::{
    BatchCommit, SitePage, SiteRepository, SiteRepositoryError, SiteRepositoryResult,
};
