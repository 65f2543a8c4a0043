//! Given steps for site reconciliation BDD scenarios.

use super::world::{SiteCheckWorld, run_async};
use crate::test_helpers::reference_time;
use chrono::TimeDelta;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use sitewatch::site::{
    domain::{HttpStatusCode, MonitoredSite, NewSite, SiteStatus, SiteUrl},
    ports::SiteRepository,
};

fn seed(world: &SiteCheckWorld, url: &str) -> Result<MonitoredSite, eyre::Report> {
    let site_url = SiteUrl::new(url).wrap_err("parse scenario url")?;
    let new_site = NewSite::new(site_url, None, &world.clock);
    run_async(world.repository.create(&new_site)).wrap_err("seed scenario site")
}

#[given(r#"a site "{url}" that has never been checked"#)]
fn unchecked_site(world: &mut SiteCheckWorld, url: String) -> Result<(), eyre::Report> {
    seed(world, &url)?;
    Ok(())
}

#[given(r#"a site "{url}" last checked {minutes:u32} minutes ago with status {code:u16}"#)]
fn checked_site(
    world: &mut SiteCheckWorld,
    url: String,
    minutes: u32,
    code: u16,
) -> Result<(), eyre::Report> {
    let site = seed(world, &url)?;
    let status = SiteStatus::Responded(HttpStatusCode::new(code).wrap_err("scenario status")?);
    let checked_at = reference_time() - TimeDelta::minutes(i64::from(minutes));
    run_async(world.repository.update_status(site.id(), status, checked_at))
        .wrap_err("seed scenario status")?;
    Ok(())
}

#[given(r#"the prober answers "{url}" with status {code:u16}"#)]
fn prober_answers(world: &mut SiteCheckWorld, url: String, code: u16) {
    world.prober = world.prober.clone().responding(&url, code);
}

#[given(r#"the prober fails for "{url}" with "{reason}""#)]
fn prober_fails(world: &mut SiteCheckWorld, url: String, reason: String) {
    world.prober = world.prober.clone().failing(&url, &reason);
}
