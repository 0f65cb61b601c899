//! When steps for CSV import scenarios.

use super::world::{ImportWorld, run_async};
use rstest_bdd_macros::when;
use sprintboard::import::run_import;

#[when("the import runs")]
fn import_runs(world: &mut ImportWorld) {
    let text = world.text();
    let result = run_async(run_import(&world.tracker, &text, &world.existing_sprints));
    world.result = Some(result);
}
