//! Contract tests for the in-memory site repository.

use super::helpers::{clock, repo, seed_site, site_url};
use crate::test_helpers::{ManualClock, reference_time};
use chrono::TimeDelta;
use rstest::rstest;
use sitewatch::site::{
    adapters::memory::InMemorySiteRepository,
    domain::{HttpStatusCode, NewSite, SiteId, SiteStatus, StatusUpdate},
    ports::{SitePage, SiteRepository, SiteRepositoryError},
};

fn ok() -> SiteStatus {
    SiteStatus::Responded(HttpStatusCode::new(200).expect("valid status code"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ids_are_allocated_sequentially(repo: InMemorySiteRepository, clock: ManualClock) {
    let first = seed_site(&repo, &clock, "https://a.example.com").await;
    let second = seed_site(&repo, &clock, "https://b.example.com").await;

    assert_eq!(first.id(), SiteId::new(1));
    assert_eq!(second.id(), SiteId::new(2));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_url_is_rejected(repo: InMemorySiteRepository, clock: ManualClock) {
    seed_site(&repo, &clock, "https://a.example.com").await;

    let duplicate = NewSite::new(site_url("https://a.example.com"), None, &clock);
    let result = repo.create(&duplicate).await;

    assert!(matches!(result, Err(SiteRepositoryError::DuplicateUrl(url)) if url.as_str() == "https://a.example.com"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn find_by_id_returns_none_for_unknown_id(repo: InMemorySiteRepository) {
    let found = repo.find_by_id(SiteId::new(42)).await.expect("lookup");
    assert!(found.is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_applies_offset_and_limit(repo: InMemorySiteRepository, clock: ManualClock) {
    for index in 0..5 {
        seed_site(&repo, &clock, &format!("https://host{index}.example.com")).await;
    }

    let page = repo.list(SitePage::new(1, 2)).await.expect("list");
    let ids: Vec<i32> = page.iter().map(|site| site.id().into_inner()).collect();

    assert_eq!(ids, vec![2, 3]);
    assert_eq!(repo.list_all().await.expect("list all").len(), 5);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_overwrites_status_and_timestamp(
    repo: InMemorySiteRepository,
    clock: ManualClock,
) {
    let site = seed_site(&repo, &clock, "https://a.example.com").await;

    let updated = repo
        .update_status(site.id(), SiteStatus::Unreachable, reference_time())
        .await
        .expect("update");

    assert_eq!(updated.status(), SiteStatus::Unreachable);
    assert_eq!(updated.updated_at(), reference_time());
    assert_eq!(updated.created_at(), site.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_status_reports_missing_site(repo: InMemorySiteRepository) {
    let result = repo
        .update_status(SiteId::new(9), ok(), reference_time())
        .await;

    assert!(matches!(result, Err(SiteRepositoryError::NotFound(id)) if id == SiteId::new(9)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_applies_updates_and_skips_missing_ids(
    repo: InMemorySiteRepository,
    clock: ManualClock,
) {
    let first = seed_site(&repo, &clock, "https://a.example.com").await;
    let second = seed_site(&repo, &clock, "https://b.example.com").await;
    let updates = [
        StatusUpdate::new(first.id(), ok(), reference_time()),
        StatusUpdate::new(SiteId::new(99), ok(), reference_time()),
        StatusUpdate::new(second.id(), SiteStatus::Unreachable, reference_time()),
    ];

    let commit = repo.apply_status_batch(&updates).await.expect("batch");

    assert_eq!(commit.missing, vec![SiteId::new(99)]);
    assert_eq!(commit.applied.len(), 2);
    let stored = repo.list_all().await.expect("list all");
    let statuses: Vec<SiteStatus> = stored.iter().map(|site| site.status()).collect();
    assert_eq!(statuses, vec![ok(), SiteStatus::Unreachable]);
    assert_eq!(repo.batch_commit_count().expect("count"), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_batch_is_not_a_commit(repo: InMemorySiteRepository) {
    let commit = repo.apply_status_batch(&[]).await.expect("batch");

    assert!(commit.applied.is_empty());
    assert_eq!(repo.batch_commit_count().expect("count"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_clamps_checked_at_to_creation(repo: InMemorySiteRepository, clock: ManualClock) {
    let site = seed_site(&repo, &clock, "https://a.example.com").await;
    let early = site.created_at() - TimeDelta::hours(2);

    let commit = repo
        .apply_status_batch(&[StatusUpdate::new(site.id(), ok(), early)])
        .await
        .expect("batch");

    let stored = commit.applied.first().expect("applied site");
    assert_eq!(stored.updated_at(), site.created_at());
}
