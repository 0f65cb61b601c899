//! Given steps for CSV import scenarios.

use super::world::{ImportWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use sprintboard::{import::EXPECTED_HEADER, tracker::domain::CreateSprintOptions};

#[given(r#"an existing sprint named "{name}""#)]
fn existing_sprint(world: &mut ImportWorld, name: String) -> Result<(), eyre::Report> {
    run_async(
        world
            .tracker
            .create_sprint(&name, CreateSprintOptions::default()),
    )
    .wrap_err("create existing sprint")?;
    world.existing_sprints =
        run_async(world.tracker.list_sprints()).wrap_err("list existing sprints")?;
    Ok(())
}

#[given("the standard import header")]
fn standard_header(world: &mut ImportWorld) {
    world.lines.push(EXPECTED_HEADER.to_owned());
}

#[given(r#"the import header "{header}""#)]
fn custom_header(world: &mut ImportWorld, header: String) {
    world.lines.push(header);
}

#[given(r#"the import line "{line}""#)]
fn import_line(world: &mut ImportWorld, line: String) {
    world.lines.push(line);
}
