//! Then steps for site reconciliation BDD scenarios.

use super::world::SiteCheckWorld;
use crate::test_helpers::reference_time;
use chrono::TimeDelta;
use rstest_bdd_macros::then;
use sitewatch::site::domain::UNREACHABLE_SENTINEL;

#[then(r#"site "{url}" has status {code:u16} recorded at the pass time"#)]
fn status_recorded_now(world: &SiteCheckWorld, url: String, code: u16) -> Result<(), eyre::Report> {
    let site = world.site(&url)?;
    if site.status().to_storage() != Some(i32::from(code)) {
        return Err(eyre::eyre!("expected status {code}, found {}", site.status()));
    }
    if site.updated_at() != reference_time() {
        return Err(eyre::eyre!(
            "expected update at pass time, found {}",
            site.updated_at()
        ));
    }
    Ok(())
}

#[then(r#"site "{url}" still shows the check from {minutes:u32} minutes ago"#)]
fn status_untouched(world: &SiteCheckWorld, url: String, minutes: u32) -> Result<(), eyre::Report> {
    let site = world.site(&url)?;
    let expected = reference_time() - TimeDelta::minutes(i64::from(minutes));
    if site.updated_at() != expected {
        return Err(eyre::eyre!(
            "expected updated_at {expected}, found {}",
            site.updated_at()
        ));
    }
    Ok(())
}

#[then(r#"only "{url}" was probed"#)]
fn only_probed(world: &SiteCheckWorld, url: String) -> Result<(), eyre::Report> {
    let calls: Vec<String> = world
        .prober
        .calls()
        .iter()
        .map(|call| call.as_str().to_owned())
        .collect();
    if calls != vec![url.clone()] {
        return Err(eyre::eyre!("expected only '{url}' to be probed, got {calls:?}"));
    }
    Ok(())
}

#[then(r#"site "{url}" is stored with the unreachable sentinel"#)]
fn stored_as_unreachable(world: &SiteCheckWorld, url: String) -> Result<(), eyre::Report> {
    let site = world.site(&url)?;
    if site.status().to_storage() != Some(UNREACHABLE_SENTINEL) {
        return Err(eyre::eyre!("expected sentinel, found {}", site.status()));
    }
    Ok(())
}

#[then("no status batch was committed")]
fn no_batch(world: &SiteCheckWorld) -> Result<(), eyre::Report> {
    let commits = world
        .repository
        .batch_commit_count()
        .map_err(|err| eyre::eyre!("commit count unavailable: {err}"))?;
    let summary = world
        .last_pass
        .as_ref()
        .map(|pass| pass.summary.clone())
        .ok_or_else(|| eyre::eyre!("no pass recorded"))?;
    if commits != 0 || summary.persisted != 0 {
        return Err(eyre::eyre!(
            "expected no writes, found {commits} commits and {} rows",
            summary.persisted
        ));
    }
    Ok(())
}

#[then("no site was probed")]
fn nothing_probed(world: &SiteCheckWorld) -> Result<(), eyre::Report> {
    let calls = world.prober.calls();
    if !calls.is_empty() {
        return Err(eyre::eyre!("expected no probes, got {calls:?}"));
    }
    Ok(())
}
