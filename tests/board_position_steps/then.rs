//! Then steps for board position BDD scenarios.

use super::world::{BoardWorld, title_list};
use kanban_board::board::{
    domain::{Task, sequence::is_dense},
    services::ErrorKind,
};
use rstest_bdd_macros::then;

fn column_titles(world: &BoardWorld, column: &str) -> Result<Vec<String>, eyre::Report> {
    let column_id = world.column(column)?;
    let board = world.board()?;
    let listed = board
        .iter()
        .find(|candidate| candidate.id() == column_id)
        .ok_or_else(|| eyre::eyre!("column '{column}' is not on the board"))?;
    Ok(listed
        .tasks()
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect())
}

#[then("the move lands at position {position:u32}")]
fn move_lands_at(world: &BoardWorld, position: u32) -> Result<(), eyre::Report> {
    let placement = world
        .last_move
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no move attempted in scenario"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("move failed: {err}"))?;
    eyre::ensure!(
        placement.position.value() == position,
        "expected position {position}, got {}",
        placement.position
    );
    Ok(())
}

#[then("the move is rejected as a conflict")]
fn move_is_conflict(world: &BoardWorld) -> Result<(), eyre::Report> {
    match world.last_move.as_ref() {
        Some(Err(err)) if err.kind() == ErrorKind::Conflict => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected a conflict, got {err}")),
        Some(Ok(placement)) => Err(eyre::eyre!("move unexpectedly succeeded: {placement:?}")),
        None => Err(eyre::eyre!("no move attempted in scenario")),
    }
}

#[then(r#"column "{column}" lists "{tasks}""#)]
fn column_lists(world: &BoardWorld, column: String, tasks: String) -> Result<(), eyre::Report> {
    let actual = column_titles(world, &column)?;
    let expected = title_list(&tasks);
    eyre::ensure!(
        actual == expected,
        "column '{column}' lists {actual:?}, expected {expected:?}"
    );
    Ok(())
}

#[then(r#"column "{column}" is empty"#)]
fn column_is_empty(world: &BoardWorld, column: String) -> Result<(), eyre::Report> {
    let actual = column_titles(world, &column)?;
    eyre::ensure!(actual.is_empty(), "column '{column}' lists {actual:?}");
    Ok(())
}

#[then(r#"the board columns are "{columns}""#)]
fn board_columns_are(world: &BoardWorld, columns: String) -> Result<(), eyre::Report> {
    let actual: Vec<String> = world
        .board()?
        .iter()
        .map(|column| column.column().title().as_str().to_owned())
        .collect();
    let expected = title_list(&columns);
    eyre::ensure!(
        actual == expected,
        "board lists {actual:?}, expected {expected:?}"
    );
    Ok(())
}

#[then("every scope is densely numbered")]
fn every_scope_is_dense(world: &BoardWorld) -> Result<(), eyre::Report> {
    let board = world.board()?;
    eyre::ensure!(
        is_dense(board.iter().map(|column| column.column().position())),
        "column positions are not dense"
    );
    for column in &board {
        eyre::ensure!(
            is_dense(column.tasks().iter().map(Task::position)),
            "tasks in column '{}' are not dense",
            column.column().title()
        );
    }
    Ok(())
}
