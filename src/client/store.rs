//! Optimistic client-side board store.
//!
//! Each mutation applies its local effect first, then issues the matching
//! request. On success a create replaces its provisional entity with the
//! server's; a move adopts the server placement; other operations keep the
//! optimistic state. On failure the whole board is refetched and the error
//! message is recorded in the state.

use super::{BoardAction, BoardApi, BoardState, ClientError, ClientResult};
use crate::board::domain::{
    BoardColumn, ColumnDraft, ColumnId, Position, Task, TaskDraft, TaskId, TaskPlacement, Title,
};
use mockable::{Clock, DefaultClock};
use tokio::sync::watch;
use tracing::{debug, warn};

/// State container shared by the view layer.
///
/// Subscribers are notified through a [`watch`] channel after every
/// transition.
pub struct BoardStore<A, C = DefaultClock> {
    api: A,
    clock: C,
    state: watch::Sender<BoardState>,
}

impl<A: BoardApi> BoardStore<A> {
    /// Creates a store stamping provisional tasks with the system clock.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::with_clock(api, DefaultClock)
    }
}

impl<A, C> BoardStore<A, C>
where
    A: BoardApi,
    C: Clock + Send + Sync,
{
    /// Creates a store with an explicit clock.
    #[must_use]
    pub fn with_clock(api: A, clock: C) -> Self {
        let (state, _) = watch::channel(BoardState::default());
        Self { api, clock, state }
    }

    /// Returns a receiver notified after every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BoardState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> BoardState {
        self.state.borrow().clone()
    }

    fn dispatch(&self, action: BoardAction) {
        self.state.send_modify(|state| {
            let current = std::mem::take(state);
            *state = current.reduce(action);
        });
    }

    /// Loads the authoritative board, raising `is_loading` meanwhile.
    ///
    /// # Errors
    ///
    /// Returns the API error; the state records it as well.
    pub async fn fetch_board(&self) -> ClientResult<()> {
        self.dispatch(BoardAction::FetchStarted);
        match self.api.list_columns().await {
            Ok(columns) => {
                self.dispatch(BoardAction::Loaded(columns));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "board fetch failed");
                self.dispatch(BoardAction::from(&err));
                Err(err)
            }
        }
    }

    /// Acknowledges the current error so the caller can retry.
    pub fn clear_error(&self) {
        self.dispatch(BoardAction::ClearError);
    }

    /// Appends a column and confirms it against the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] for a blank title without issuing
    /// a request, or the API error after resynchronising.
    pub async fn add_column(&self, title: &str) -> ClientResult<BoardColumn> {
        let checked = Title::new(title)?;
        let position = Position::new(count(self.state.borrow().columns().len()));
        let provisional = ColumnDraft::new(checked.clone()).place(position);
        let provisional_id = provisional.id();
        self.dispatch(BoardAction::ColumnAdded(provisional));

        let column = self
            .settle("add column", self.api.create_column(checked.as_str()).await)
            .await?;
        self.dispatch(BoardAction::ColumnConfirmed {
            provisional: provisional_id,
            column: column.clone(),
        });
        Ok(column)
    }

    /// Renames a column.
    ///
    /// # Errors
    ///
    /// See [`BoardStore::add_column`].
    pub async fn edit_column(&self, column_id: ColumnId, title: &str) -> ClientResult<()> {
        let checked = Title::new(title)?;
        self.dispatch(BoardAction::ColumnRenamed {
            column_id,
            title: checked.clone(),
        });
        self.settle(
            "edit column",
            self.api.update_column(column_id, checked.as_str()).await,
        )
        .await
        .map(drop)
    }

    /// Removes a column together with its tasks.
    ///
    /// # Errors
    ///
    /// Returns the API error after resynchronising.
    pub async fn delete_column(&self, column_id: ColumnId) -> ClientResult<()> {
        self.dispatch(BoardAction::ColumnRemoved(column_id));
        self.settle("delete column", self.api.delete_column(column_id).await)
            .await
    }

    /// Appends a task to a column and confirms it against the server.
    ///
    /// # Errors
    ///
    /// See [`BoardStore::add_column`].
    pub async fn add_task(
        &self,
        column_id: ColumnId,
        title: &str,
        description: &str,
    ) -> ClientResult<Task> {
        let checked = Title::new(title)?;
        let appended = self
            .state
            .borrow()
            .column(column_id)
            .map_or(0, |column| count(column.tasks().len()));
        let provisional = TaskDraft::new(column_id, checked.clone(), description, &self.clock)
            .place(Position::new(appended));
        let provisional_id = provisional.id();
        self.dispatch(BoardAction::TaskAdded(provisional));

        let response = self
            .api
            .create_task(column_id, checked.as_str(), description)
            .await;
        let task = self.settle("add task", response).await?;
        self.dispatch(BoardAction::TaskConfirmed {
            provisional: provisional_id,
            task: task.clone(),
        });
        Ok(task)
    }

    /// Rewrites a task's title and description.
    ///
    /// # Errors
    ///
    /// See [`BoardStore::add_column`].
    pub async fn edit_task(
        &self,
        task_id: TaskId,
        title: &str,
        description: &str,
    ) -> ClientResult<()> {
        let checked = Title::new(title)?;
        self.dispatch(BoardAction::TaskEdited {
            task_id,
            title: checked.clone(),
            description: description.to_owned(),
        });
        let response = self
            .api
            .update_task(task_id, checked.as_str(), description)
            .await;
        self.settle("edit task", response).await.map(drop)
    }

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns the API error after resynchronising.
    pub async fn delete_task(&self, task_id: TaskId) -> ClientResult<()> {
        self.dispatch(BoardAction::TaskRemoved(task_id));
        self.settle("delete task", self.api.delete_task(task_id).await)
            .await
    }

    /// Moves a task to the end of another column.
    ///
    /// # Errors
    ///
    /// Returns the API error after resynchronising; a stale source column
    /// arrives as a `409` [`ClientError::Status`].
    pub async fn move_task(
        &self,
        task_id: TaskId,
        from: ColumnId,
        to: ColumnId,
    ) -> ClientResult<TaskPlacement> {
        self.dispatch(BoardAction::TaskMoved { task_id, from, to });
        let placement = self
            .settle("move task", self.api.move_task(task_id, from, to).await)
            .await?;
        self.dispatch(BoardAction::TaskPlaced(placement));
        Ok(placement)
    }

    async fn settle<T>(
        &self,
        operation: &'static str,
        outcome: ClientResult<T>,
    ) -> ClientResult<T> {
        match outcome {
            Ok(value) => {
                debug!(operation, "request confirmed");
                Ok(value)
            }
            Err(err) => {
                warn!(operation, error = %err, "request failed; refetching board");
                self.resync().await;
                self.dispatch(BoardAction::from(&err));
                Err(err)
            }
        }
    }

    async fn resync(&self) {
        match self.api.list_columns().await {
            Ok(columns) => self.dispatch(BoardAction::Loaded(columns)),
            Err(err) => warn!(error = %err, "board refetch failed"),
        }
    }
}

impl<A, C> std::fmt::Debug for BoardStore<A, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoardStore")
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl From<&ClientError> for BoardAction {
    fn from(err: &ClientError) -> Self {
        Self::Failed(err.to_string())
    }
}
