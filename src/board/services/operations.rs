//! Transactional units of work behind each board mutation.
//!
//! Each function is the body of one transaction. Validation of caller input
//! happens before the transaction opens; everything here re-reads state
//! under lock.

use super::positions::{
    next_column_position, next_task_position, resequence_columns, resequence_tasks,
};
use crate::board::{
    domain::{BoardColumn, Column, ColumnDraft, ColumnId, Task, TaskDraft, TaskId, Title},
    ports::{BoardRepositoryError, BoardRepositoryResult, BoardTransaction},
};
use std::collections::HashMap;

/// Appends a column to the board under the board lock.
///
/// # Errors
///
/// Propagates datastore failures from the transaction.
pub fn create_column<T>(tx: &mut T, draft: ColumnDraft) -> BoardRepositoryResult<Column>
where
    T: BoardTransaction + ?Sized,
{
    tx.lock_board()?;
    let column = draft.place(next_column_position(tx)?);
    tx.insert_column(&column)?;
    Ok(column)
}

/// Appends a task to its column under the column lock.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::ColumnNotFound`] when the draft's column
/// does not exist.
pub fn create_task<T>(tx: &mut T, draft: TaskDraft) -> BoardRepositoryResult<Task>
where
    T: BoardTransaction + ?Sized,
{
    let column_id = draft.column_id();
    let locked = tx.lock_columns(&[column_id])?;
    if !locked.contains(&column_id) {
        return Err(BoardRepositoryError::ColumnNotFound(column_id));
    }
    let task = draft.place(next_task_position(tx, column_id)?);
    tx.insert_task(&task)?;
    Ok(task)
}

/// Renames a column without touching its position.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does not
/// exist.
pub fn rename_column<T>(tx: &mut T, id: ColumnId, title: &Title) -> BoardRepositoryResult<Column>
where
    T: BoardTransaction + ?Sized,
{
    if !tx.update_column_title(id, title)? {
        return Err(BoardRepositoryError::ColumnNotFound(id));
    }
    tx.find_column(id)?
        .ok_or(BoardRepositoryError::ColumnNotFound(id))
}

/// Rewrites task content without touching position or ownership.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::TaskNotFound`] when the task does not
/// exist.
pub fn edit_task<T>(
    tx: &mut T,
    id: TaskId,
    title: &Title,
    description: &str,
) -> BoardRepositoryResult<Task>
where
    T: BoardTransaction + ?Sized,
{
    if !tx.update_task_content(id, title, description)? {
        return Err(BoardRepositoryError::TaskNotFound(id));
    }
    tx.find_task(id)?
        .ok_or(BoardRepositoryError::TaskNotFound(id))
}

/// Number of times [`delete_task`] follows a task that keeps changing
/// column before giving up.
const DELETE_ATTEMPTS: usize = 3;

/// Deletes a task and resequences the surviving tasks of its column.
///
/// The owning column is read without a lock, locked, and read again. If a
/// concurrent move changed the owner in between, the delete follows the task
/// to its new column. The task row itself is never locked ahead of a column
/// row.
///
/// # Errors
///
/// - [`BoardRepositoryError::TaskNotFound`] when the task does not exist
/// - [`BoardRepositoryError::ColumnMismatch`] when the task changed column on
///   every attempt
pub fn delete_task<T>(tx: &mut T, id: TaskId) -> BoardRepositoryResult<ColumnId>
where
    T: BoardTransaction + ?Sized,
{
    let mut observed = owning_column(tx, id)?;
    for _ in 0..DELETE_ATTEMPTS {
        tx.lock_columns(&[observed])?;
        let owner = owning_column(tx, id)?;
        if owner == observed {
            tx.delete_task(id)?;
            resequence_tasks(tx, owner)?;
            return Ok(owner);
        }
        observed = owner;
    }
    let actual = owning_column(tx, id)?;
    Err(BoardRepositoryError::ColumnMismatch {
        task_id: id,
        expected: observed,
        actual,
    })
}

fn owning_column<T>(tx: &mut T, id: TaskId) -> BoardRepositoryResult<ColumnId>
where
    T: BoardTransaction + ?Sized,
{
    tx.find_task(id)?
        .map(|task| task.column_id())
        .ok_or(BoardRepositoryError::TaskNotFound(id))
}

/// Deletes a column with all of its tasks, then resequences the surviving
/// columns. Returns the number of tasks removed.
///
/// Every column row is locked in ascending id order before anything is
/// written, since the renumbering pass may touch any of them.
///
/// # Errors
///
/// Returns [`BoardRepositoryError::ColumnNotFound`] when the column does not
/// exist.
pub fn delete_column<T>(tx: &mut T, id: ColumnId) -> BoardRepositoryResult<u32>
where
    T: BoardTransaction + ?Sized,
{
    tx.lock_board()?;
    let board: Vec<ColumnId> = tx.columns()?.iter().map(Column::id).collect();
    let locked = tx.lock_columns(&board)?;
    if !locked.contains(&id) {
        return Err(BoardRepositoryError::ColumnNotFound(id));
    }
    let removed = tx.delete_tasks_in_column(id)?;
    tx.delete_column(id)?;
    resequence_columns(tx)?;
    Ok(removed)
}

/// Reads every column with its tasks, both position-ordered.
///
/// # Errors
///
/// Propagates datastore failures from the transaction.
pub fn load_board<T>(tx: &mut T) -> BoardRepositoryResult<Vec<BoardColumn>>
where
    T: BoardTransaction + ?Sized,
{
    let columns = tx.columns()?;
    let mut grouped: HashMap<ColumnId, Vec<Task>> = HashMap::new();
    for task in tx.all_tasks()? {
        grouped.entry(task.column_id()).or_default().push(task);
    }
    Ok(columns
        .into_iter()
        .map(|column| {
            let tasks = grouped.remove(&column.id()).unwrap_or_default();
            BoardColumn::new(column, tasks)
        })
        .collect())
}
