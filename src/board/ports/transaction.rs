//! Unit-of-work contract executed inside one datastore transaction.
//!
//! Every method runs against the same transaction. Adapters commit only when
//! the enclosing work returns `Ok`; any error rolls back all writes made
//! through the handle.
//!
//! Lock order is fixed: [`BoardTransaction::lock_board`] first, then
//! [`BoardTransaction::lock_columns`] (ascending id), then task rows via
//! [`BoardTransaction::find_task_for_update`].

use super::BoardRepositoryResult;
use crate::board::domain::{Column, ColumnId, Position, Task, TaskId, Title};

/// Transactional access to columns and tasks.
#[cfg_attr(test, mockall::automock)]
pub trait BoardTransaction {
    /// Serializes against other board-scope mutations (column creation and
    /// deletion) until the transaction ends.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn lock_board(&mut self) -> BoardRepositoryResult<()>;

    /// Locks the given column rows in ascending id order and returns the ids
    /// that exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn lock_columns(&mut self, ids: &[ColumnId]) -> BoardRepositoryResult<Vec<ColumnId>>;

    /// Reads a task without locking it.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn find_task(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Reads a task and locks its row.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn find_task_for_update(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>>;

    /// Reads a column without locking it.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn find_column(&mut self, id: ColumnId) -> BoardRepositoryResult<Option<Column>>;

    /// Counts the columns of the board.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn count_columns(&mut self) -> BoardRepositoryResult<u32>;

    /// Counts the tasks owned by a column.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn count_tasks(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32>;

    /// Lists all columns ordered by `(position, id)`.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn columns(&mut self) -> BoardRepositoryResult<Vec<Column>>;

    /// Lists the tasks of a column ordered by `(position, created_at, id)`.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>>;

    /// Lists every task ordered by `(position, created_at, id)`.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn all_tasks(&mut self) -> BoardRepositoryResult<Vec<Task>>;

    /// Inserts a new column.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn insert_column(&mut self, column: &Column) -> BoardRepositoryResult<()>;

    /// Inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn insert_task(&mut self, task: &Task) -> BoardRepositoryResult<()>;

    /// Rewrites a column title. Returns `false` when the column is missing.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn update_column_title(&mut self, id: ColumnId, title: &Title) -> BoardRepositoryResult<bool>;

    /// Rewrites task title and description. Returns `false` when the task is
    /// missing.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn update_task_content(
        &mut self,
        id: TaskId,
        title: &Title,
        description: &str,
    ) -> BoardRepositoryResult<bool>;

    /// Rewrites a column position.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn set_column_position(&mut self, id: ColumnId, position: Position)
    -> BoardRepositoryResult<()>;

    /// Rewrites a task position within its current column.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn set_task_position(&mut self, id: TaskId, position: Position) -> BoardRepositoryResult<()>;

    /// Changes the owning column and position of a task.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn relocate_task(
        &mut self,
        id: TaskId,
        column_id: ColumnId,
        position: Position,
    ) -> BoardRepositoryResult<()>;

    /// Deletes a task row. Returns `false` when the task is missing.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn delete_task(&mut self, id: TaskId) -> BoardRepositoryResult<bool>;

    /// Deletes every task owned by a column and returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn delete_tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32>;

    /// Deletes a column row. Returns `false` when the column is missing.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardRepositoryError::Persistence`] on datastore
    /// failure.
    fn delete_column(&mut self, id: ColumnId) -> BoardRepositoryResult<bool>;
}
