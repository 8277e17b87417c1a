//! When steps for board position BDD scenarios.

use super::world::{BoardWorld, run_async};
use eyre::WrapErr;
use kanban_board::board::services::MoveTaskRequest;
use rstest_bdd_macros::when;

#[when(r#"task "{task}" is moved from "{from}" to "{to}""#)]
fn task_is_moved(
    world: &mut BoardWorld,
    task: String,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let request = MoveTaskRequest::new(world.task(&task)?, world.column(&from)?, world.column(&to)?);
    world.last_move = Some(run_async(world.service.move_task(request)));
    Ok(())
}

#[when(r#"task "{task}" is deleted"#)]
fn task_is_deleted(world: &mut BoardWorld, task: String) -> Result<(), eyre::Report> {
    let task_id = world.task(&task)?;
    run_async(world.service.delete_task(task_id)).wrap_err_with(|| format!("delete '{task}'"))
}

#[when(r#"column "{column}" is deleted"#)]
fn column_is_deleted(world: &mut BoardWorld, column: String) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    run_async(world.service.delete_column(column_id))
        .wrap_err_with(|| format!("delete column '{column}'"))
}
