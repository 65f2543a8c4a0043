//! Catalog and check services over the in-memory store.

use super::helpers::{clock, repo, seed_site, site_url};
use crate::test_helpers::{ManualClock, reference_time};
use chrono::TimeDelta;
use rstest::rstest;
use sitewatch::site::{
    adapters::{ScriptedProber, memory::InMemorySiteRepository},
    domain::{HttpStatusCode, SiteStatus},
    ports::{SitePage, SiteRepository},
    services::{CheckSettings, CreateSiteRequest, SiteCatalogService, SiteCheckService},
};
use std::sync::Arc;

fn services(
    repo: InMemorySiteRepository,
    prober: ScriptedProber,
    clock: ManualClock,
) -> (
    SiteCatalogService<InMemorySiteRepository, ManualClock>,
    SiteCheckService<InMemorySiteRepository, ScriptedProber, ManualClock>,
) {
    let repository = Arc::new(repo);
    let clock = Arc::new(clock);
    (
        SiteCatalogService::new(Arc::clone(&repository), Arc::clone(&clock)),
        SiteCheckService::new(
            repository,
            Arc::new(prober),
            clock,
            CheckSettings::default(),
        ),
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_site_round_trips_with_equal_timestamps(
    repo: InMemorySiteRepository,
    clock: ManualClock,
) {
    let (catalog, _) = services(repo, ScriptedProber::new(), clock);

    let created = catalog
        .create(CreateSiteRequest::new("https://example.com").with_description("landing page"))
        .await
        .expect("create");
    let fetched = catalog.get(created.id()).await.expect("get");

    assert_eq!(fetched, created);
    assert_eq!(fetched.created_at(), fetched.updated_at());
    assert_eq!(fetched.status(), SiteStatus::Unchecked);
    assert_eq!(fetched.description(), Some("landing page"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stale_and_fresh_sites_are_reconciled_separately(
    repo: InMemorySiteRepository,
    clock: ManualClock,
) {
    let stale = seed_site(&repo, &clock, "https://stale.example.com").await;
    let fresh = seed_site(&repo, &clock, "https://fresh.example.com").await;
    let ok = SiteStatus::Responded(HttpStatusCode::new(200).expect("valid status code"));
    repo.update_status(fresh.id(), ok, reference_time() - TimeDelta::minutes(1))
        .await
        .expect("seed fresh status");
    let prober = ScriptedProber::new()
        .responding("https://stale.example.com", 200)
        .responding("https://fresh.example.com", 500);
    clock.set(reference_time());
    let (_, checks) = services(repo, prober.clone(), clock);

    let pass = checks.run_pass().await.expect("pass");

    let stale_after = pass
        .sites
        .iter()
        .find(|site| site.id() == stale.id())
        .expect("stale site listed");
    let fresh_after = pass
        .sites
        .iter()
        .find(|site| site.id() == fresh.id())
        .expect("fresh site listed");
    assert_eq!(stale_after.status(), ok);
    assert_eq!(stale_after.updated_at(), reference_time());
    assert_eq!(fresh_after.status(), ok);
    assert_eq!(
        fresh_after.updated_at(),
        reference_time() - TimeDelta::minutes(1)
    );
    assert_eq!(prober.calls(), vec![site_url("https://stale.example.com")]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn back_to_back_passes_leave_the_store_unchanged(
    repo: InMemorySiteRepository,
    clock: ManualClock,
) {
    seed_site(&repo, &clock, "https://a.example.com").await;
    seed_site(&repo, &clock, "https://b.example.com").await;
    let prober = ScriptedProber::new()
        .responding("https://a.example.com", 200)
        .failing("https://b.example.com", "connection refused");
    clock.set(reference_time());
    let store = repo.clone();
    let (catalog, checks) = services(repo, prober.clone(), clock);

    checks.run_pass().await.expect("first pass");
    let after_first = catalog.list(SitePage::new(0, 10)).await.expect("list");
    checks.run_pass().await.expect("second pass");
    let after_second = catalog.list(SitePage::new(0, 10)).await.expect("list");

    assert_eq!(after_first, after_second);
    assert_eq!(prober.calls().len(), 2);
    assert_eq!(store.batch_commit_count().expect("count"), 1);
    let unreachable = after_second
        .iter()
        .find(|site| site.url().as_str() == "https://b.example.com")
        .expect("site b listed");
    assert_eq!(unreachable.status().to_storage(), Some(-1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sites_become_due_again_after_threshold(
    repo: InMemorySiteRepository,
    clock: ManualClock,
) {
    seed_site(&repo, &clock, "https://a.example.com").await;
    let prober = ScriptedProber::new().responding("https://a.example.com", 200);
    clock.set(reference_time());
    let timer = clock.clone();
    let (_, checks) = services(repo, prober.clone(), clock);

    checks.run_pass().await.expect("first pass");
    timer.advance(TimeDelta::minutes(5));
    let pass = checks.run_pass().await.expect("second pass");

    assert_eq!(prober.calls().len(), 2);
    let site = pass.sites.first().expect("site listed");
    assert_eq!(site.updated_at(), reference_time() + TimeDelta::minutes(5));
}
