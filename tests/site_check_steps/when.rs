//! When steps for site reconciliation BDD scenarios.

use super::world::{SiteCheckWorld, run_async};
use crate::test_helpers::reference_time;
use rstest_bdd_macros::when;

#[when("a reconciliation pass runs")]
fn run_pass(world: &mut SiteCheckWorld) -> Result<(), eyre::Report> {
    let service = world.service();
    let pass = run_async(service.reconcile(reference_time()))
        .map_err(|err| eyre::eyre!("reconciliation failed: {err}"))?;
    world.last_pass = Some(pass);
    Ok(())
}
