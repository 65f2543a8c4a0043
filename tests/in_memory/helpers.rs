//! Shared test helpers for in-memory integration tests.

use crate::test_helpers::{ManualClock, reference_time};
use chrono::TimeDelta;
use rstest::fixture;
use sitewatch::site::{
    adapters::memory::InMemorySiteRepository,
    domain::{MonitoredSite, NewSite, SiteUrl},
    ports::SiteRepository,
};

/// Provides a fresh in-memory repository for each test.
#[fixture]
pub fn repo() -> InMemorySiteRepository {
    InMemorySiteRepository::new()
}

/// Provides a clock ten minutes before the reference time, so seeded sites
/// are older than the default staleness threshold.
#[fixture]
pub fn clock() -> ManualClock {
    ManualClock::at(reference_time() - TimeDelta::minutes(10))
}

/// Parses a known-good URL.
pub fn site_url(raw: &str) -> SiteUrl {
    SiteUrl::new(raw).expect("valid site url")
}

/// Inserts an unchecked site stamped with the clock's current time.
pub async fn seed_site(
    repo: &InMemorySiteRepository,
    clock: &ManualClock,
    raw_url: &str,
) -> MonitoredSite {
    let new_site = NewSite::new(site_url(raw_url), None, clock);
    repo.create(&new_site).await.expect("seed site")
}
