//! Position allocation, resequencing and cross-column moves.
//!
//! These functions run inside a caller-provided [`BoardTransaction`]; the
//! transaction supplies the mutual exclusion they rely on. Allocation reads
//! the member count of a scope, so the scope must be locked before calling
//! [`next_task_position`] or [`next_column_position`].

use crate::board::{
    domain::{
        ColumnId, Position, TaskId, TaskPlacement,
        sequence::{column_plan, task_plan},
    },
    ports::{BoardRepositoryError, BoardRepositoryResult, BoardTransaction},
};
use tracing::debug;

/// Returns the position a new task appended to `column_id` receives.
///
/// # Errors
///
/// Propagates datastore failures from the transaction.
pub fn next_task_position<T>(tx: &mut T, column_id: ColumnId) -> BoardRepositoryResult<Position>
where
    T: BoardTransaction + ?Sized,
{
    tx.count_tasks(column_id).map(Position::new)
}

/// Returns the position a new column appended to the board receives.
///
/// # Errors
///
/// Propagates datastore failures from the transaction.
pub fn next_column_position<T>(tx: &mut T) -> BoardRepositoryResult<Position>
where
    T: BoardTransaction + ?Sized,
{
    tx.count_columns().map(Position::new)
}

/// Rewrites the tasks of `column_id` to the dense sequence `0..n`.
///
/// Returns the number of rows whose position changed; a second call with
/// no intervening write returns zero.
///
/// # Errors
///
/// Propagates datastore failures from the transaction.
pub fn resequence_tasks<T>(tx: &mut T, column_id: ColumnId) -> BoardRepositoryResult<usize>
where
    T: BoardTransaction + ?Sized,
{
    let tasks = tx.tasks_in_column(column_id)?;
    let changes = task_plan(&tasks);
    for change in &changes {
        tx.set_task_position(change.key, change.to)?;
    }
    debug!(
        column_id = %column_id,
        members = tasks.len(),
        rewritten = changes.len(),
        "resequenced column tasks"
    );
    Ok(changes.len())
}

/// Rewrites the columns of the board to the dense sequence `0..n`.
///
/// # Errors
///
/// Propagates datastore failures from the transaction.
pub fn resequence_columns<T>(tx: &mut T) -> BoardRepositoryResult<usize>
where
    T: BoardTransaction + ?Sized,
{
    let columns = tx.columns()?;
    let changes = column_plan(&columns);
    for change in &changes {
        tx.set_column_position(change.key, change.to)?;
    }
    debug!(
        members = columns.len(),
        rewritten = changes.len(),
        "resequenced board columns"
    );
    Ok(changes.len())
}

/// Moves a task to the end of another column.
///
/// The source and destination column rows are locked in ascending id order
/// before the task row, and the task's current column is re-checked against
/// `from`. The task is appended to `to`, then only the source column is
/// resequenced: appending keeps the destination dense.
///
/// Moving within the same column writes nothing and returns the current
/// placement; intra-column reordering is not supported.
///
/// # Errors
///
/// - [`BoardRepositoryError::TaskNotFound`] when the task does not exist
/// - [`BoardRepositoryError::ColumnMismatch`] when `from` no longer owns it
/// - [`BoardRepositoryError::ColumnNotFound`] when `to` does not exist
pub fn move_task<T>(
    tx: &mut T,
    task_id: TaskId,
    from: ColumnId,
    to: ColumnId,
) -> BoardRepositoryResult<TaskPlacement>
where
    T: BoardTransaction + ?Sized,
{
    let existing = tx.lock_columns(&lock_order(from, to))?;
    let task = tx
        .find_task_for_update(task_id)?
        .ok_or(BoardRepositoryError::TaskNotFound(task_id))?;

    if task.column_id() != from {
        return Err(BoardRepositoryError::ColumnMismatch {
            task_id,
            expected: from,
            actual: task.column_id(),
        });
    }
    if from == to {
        return Ok(task.placement());
    }
    if !existing.contains(&to) {
        return Err(BoardRepositoryError::ColumnNotFound(to));
    }

    let position = next_task_position(tx, to)?;
    tx.relocate_task(task_id, to, position)?;
    resequence_tasks(tx, from)?;

    Ok(TaskPlacement {
        task_id,
        column_id: to,
        position,
    })
}

/// Ascending, de-duplicated lock order for a pair of columns.
fn lock_order(first: ColumnId, second: ColumnId) -> Vec<ColumnId> {
    if first == second {
        vec![first]
    } else if first < second {
        vec![first, second]
    } else {
        vec![second, first]
    }
}
