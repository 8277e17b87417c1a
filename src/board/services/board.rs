//! Consistency-preserving CRUD surface over columns and tasks.

use super::{operations, positions};
use crate::board::{
    domain::{
        BoardColumn, BoardDomainError, Column, ColumnDraft, ColumnId, Task, TaskDraft, TaskId,
        TaskPlacement, Title,
    },
    ports::{BoardRepository, BoardRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    column_id: ColumnId,
    title: String,
    description: String,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields and an empty description.
    #[must_use]
    pub fn new(column_id: ColumnId, title: impl Into<String>) -> Self {
        Self {
            column_id,
            title: title.into(),
            description: String::new(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Request payload for moving a task between columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveTaskRequest {
    /// Task to move.
    pub task_id: TaskId,
    /// Column the caller believes owns the task.
    pub from_column_id: ColumnId,
    /// Destination column.
    pub to_column_id: ColumnId,
}

impl MoveTaskRequest {
    /// Creates a move request.
    #[must_use]
    pub const fn new(task_id: TaskId, from_column_id: ColumnId, to_column_id: ColumnId) -> Self {
        Self {
            task_id,
            from_column_id,
            to_column_id,
        }
    }
}

/// Coarse classification used by transports to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller input failed validation.
    Validation,
    /// A referenced entity does not exist.
    NotFound,
    /// State changed between the caller's read and the write.
    Conflict,
    /// The datastore failed; the transaction was rolled back.
    Storage,
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
}

impl BoardServiceError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(_) => ErrorKind::Validation,
            Self::Repository(
                BoardRepositoryError::ColumnNotFound(_) | BoardRepositoryError::TaskNotFound(_),
            ) => ErrorKind::NotFound,
            Self::Repository(BoardRepositoryError::ColumnMismatch { .. }) => ErrorKind::Conflict,
            Self::Repository(BoardRepositoryError::Persistence(_)) => ErrorKind::Storage,
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board orchestration service.
///
/// Validates input before any transaction opens, then runs each mutation as
/// a single unit of work on the repository.
#[derive(Clone)]
pub struct BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> BoardService<R, C>
where
    R: BoardRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Appends a column to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the title is blank, or
    /// [`BoardServiceError::Repository`] when persistence fails.
    pub async fn create_column(&self, title: impl Into<String>) -> BoardServiceResult<BoardColumn> {
        let draft = ColumnDraft::new(Title::new(title)?);
        let column = self
            .repository
            .transaction(move |tx| operations::create_column(tx, draft))
            .await
            .inspect_err(log_failure("create column"))?;
        info!(column_id = %column.id(), position = %column.position(), "column created");
        Ok(BoardColumn::empty(column))
    }

    /// Appends a task to the end of its column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the title is blank, or
    /// [`BoardServiceError::Repository`] when the column does not exist or
    /// persistence fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> BoardServiceResult<Task> {
        let title = Title::new(request.title)?;
        let draft = TaskDraft::new(request.column_id, title, request.description, &*self.clock);
        let task = self
            .repository
            .transaction(move |tx| operations::create_task(tx, draft))
            .await
            .inspect_err(log_failure("create task"))?;
        info!(
            task_id = %task.id(),
            column_id = %task.column_id(),
            position = %task.position(),
            "task created"
        );
        Ok(task)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the title is blank, or
    /// [`BoardServiceError::Repository`] when the column does not exist or
    /// persistence fails.
    pub async fn update_column(
        &self,
        id: ColumnId,
        title: impl Into<String>,
    ) -> BoardServiceResult<Column> {
        let new_title = Title::new(title)?;
        let column = self
            .repository
            .transaction(move |tx| operations::rename_column(tx, id, &new_title))
            .await
            .inspect_err(log_failure("update column"))?;
        info!(column_id = %id, "column renamed");
        Ok(column)
    }

    /// Rewrites the title and description of a task.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Domain`] when the title is blank, or
    /// [`BoardServiceError::Repository`] when the task does not exist or
    /// persistence fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> BoardServiceResult<Task> {
        let new_title = Title::new(title)?;
        let new_description = description.into();
        let task = self
            .repository
            .transaction(move |tx| operations::edit_task(tx, id, &new_title, &new_description))
            .await
            .inspect_err(log_failure("update task"))?;
        info!(task_id = %id, "task edited");
        Ok(task)
    }

    /// Deletes a column and every task it owns, then closes the gap in the
    /// column sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the column does not
    /// exist or persistence fails.
    pub async fn delete_column(&self, id: ColumnId) -> BoardServiceResult<()> {
        let removed = self
            .repository
            .transaction(move |tx| operations::delete_column(tx, id))
            .await
            .inspect_err(log_failure("delete column"))?;
        info!(column_id = %id, tasks_removed = removed, "column deleted");
        Ok(())
    }

    /// Deletes a task and resequences its former column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the task does not exist
    /// or persistence fails.
    pub async fn delete_task(&self, id: TaskId) -> BoardServiceResult<()> {
        let column_id = self
            .repository
            .transaction(move |tx| operations::delete_task(tx, id))
            .await
            .inspect_err(log_failure("delete task"))?;
        info!(task_id = %id, column_id = %column_id, "task deleted");
        Ok(())
    }

    /// Moves a task to the end of another column.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the task or destination
    /// does not exist, the task left the source column, or persistence fails.
    pub async fn move_task(&self, request: MoveTaskRequest) -> BoardServiceResult<TaskPlacement> {
        let MoveTaskRequest {
            task_id,
            from_column_id,
            to_column_id,
        } = request;
        let placement = self
            .repository
            .transaction(move |tx| positions::move_task(tx, task_id, from_column_id, to_column_id))
            .await
            .inspect_err(log_failure("move task"))?;
        info!(
            task_id = %task_id,
            from_column_id = %from_column_id,
            to_column_id = %placement.column_id,
            position = %placement.position,
            "task moved"
        );
        Ok(placement)
    }

    /// Lists columns ordered by position, each with its ordered tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when persistence fails.
    pub async fn list_columns_with_tasks(&self) -> BoardServiceResult<Vec<BoardColumn>> {
        let board = self
            .repository
            .snapshot(|tx| operations::load_board(tx))
            .await
            .inspect_err(log_failure("list columns"))?;
        Ok(board)
    }

    /// Lists every task ordered by position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when persistence fails.
    pub async fn list_tasks(&self) -> BoardServiceResult<Vec<Task>> {
        let tasks = self
            .repository
            .snapshot(|tx| tx.all_tasks())
            .await
            .inspect_err(log_failure("list tasks"))?;
        Ok(tasks)
    }

    /// Checks that the datastore is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the datastore cannot be
    /// reached.
    pub async fn health(&self) -> BoardServiceResult<()> {
        self.repository
            .ping()
            .await
            .inspect_err(log_failure("health check"))?;
        Ok(())
    }
}

/// Logs a failed operation at a level matching its cause.
fn log_failure(operation: &'static str) -> impl Fn(&BoardRepositoryError) {
    move |err| match err {
        BoardRepositoryError::Persistence(_) => error!(operation, error = %err, "storage failure"),
        BoardRepositoryError::ColumnMismatch { .. } => {
            warn!(operation, error = %err, "stale source column");
        }
        BoardRepositoryError::ColumnNotFound(_) | BoardRepositoryError::TaskNotFound(_) => {
            warn!(operation, error = %err, "entity not found");
        }
    }
}
