//! Given steps for board position BDD scenarios.

use super::world::{BoardWorld, run_async, title_list};
use eyre::WrapErr;
use kanban_board::board::services::{CreateTaskRequest, MoveTaskRequest};
use rstest_bdd_macros::given;

fn create_column(world: &mut BoardWorld, title: &str) -> Result<(), eyre::Report> {
    let column = run_async(world.service.create_column(title))
        .wrap_err_with(|| format!("create column '{title}'"))?;
    world.columns.insert(title.to_owned(), column.id());
    Ok(())
}

#[given(r#"an empty column "{title}""#)]
fn an_empty_column(world: &mut BoardWorld, title: String) -> Result<(), eyre::Report> {
    create_column(world, &title)
}

#[given(r#"a column "{title}" with tasks "{tasks}""#)]
fn a_column_with_tasks(
    world: &mut BoardWorld,
    title: String,
    tasks: String,
) -> Result<(), eyre::Report> {
    create_column(world, &title)?;
    let column_id = world.column(&title)?;
    for task_title in title_list(&tasks) {
        let task = run_async(
            world
                .service
                .create_task(CreateTaskRequest::new(column_id, task_title.clone())),
        )
        .wrap_err_with(|| format!("create task '{task_title}'"))?;
        world.tasks.insert(task_title, task.id());
    }
    Ok(())
}

#[given(r#"task "{task}" has already been moved from "{from}" to "{to}""#)]
fn task_already_moved(
    world: &mut BoardWorld,
    task: String,
    from: String,
    to: String,
) -> Result<(), eyre::Report> {
    let request = MoveTaskRequest::new(world.task(&task)?, world.column(&from)?, world.column(&to)?);
    run_async(world.service.move_task(request)).wrap_err("move task before scenario")?;
    Ok(())
}
