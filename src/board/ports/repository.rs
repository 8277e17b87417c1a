//! Repository port: opens board transactions against a datastore.

use super::BoardTransaction;
use crate::board::domain::{BoardDomainError, ColumnId, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Transactional board persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Runs `work` inside one read-write transaction.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back every
    /// write otherwise; partial effects are never visible to other
    /// transactions.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or
    /// [`BoardRepositoryError::Persistence`] when the transaction cannot be
    /// opened or committed.
    async fn transaction<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static;

    /// Runs `work` against a consistent read-only snapshot.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or
    /// [`BoardRepositoryError::Persistence`] on datastore failure.
    async fn snapshot<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static;

    /// Verifies that the datastore is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when no connection can be
    /// obtained or the probe query fails.
    async fn ping(&self) -> BoardRepositoryResult<()>;
}

/// Errors returned by board repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// The column was not found.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The task was not found.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task is no longer owned by the column the caller expected.
    #[error("task {task_id} belongs to column {actual}, not {expected}")]
    ColumnMismatch {
        /// Task being moved.
        task_id: TaskId,
        /// Column named by the caller.
        expected: ColumnId,
        /// Column that owns the task at transaction time.
        actual: ColumnId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<BoardDomainError> for BoardRepositoryError {
    fn from(err: BoardDomainError) -> Self {
        Self::persistence(err)
    }
}
