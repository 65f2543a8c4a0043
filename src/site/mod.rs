//! Monitored site registry and reachability reconciliation.
//!
//! Sites are registered with a URL, listed and fetched through the catalog
//! service, and periodically re-probed by the check service once their last
//! observation is older than the staleness threshold. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
