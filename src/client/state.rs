//! Client-side board snapshot and its reducer.
//!
//! [`BoardState::reduce`] is a pure transition: the store applies an
//! optimistic action before the request is sent and a reconciling action
//! once the server answers. Positions are never recomputed here; after a
//! refetch the server's order is authoritative.

use crate::board::domain::{BoardColumn, Column, ColumnId, Task, TaskId, TaskPlacement, Title};

/// Latest known board plus request flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    columns: Vec<BoardColumn>,
    is_loading: bool,
    error: Option<String>,
}

/// State transitions applied by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    /// A full board fetch began.
    FetchStarted,
    /// A full board fetch returned the authoritative board.
    Loaded(Vec<BoardColumn>),
    /// An operation failed with a human-readable message.
    Failed(String),
    /// The caller acknowledged the last error.
    ClearError,
    /// A column was appended optimistically.
    ColumnAdded(Column),
    /// The server confirmed a provisional column.
    ColumnConfirmed {
        /// Identifier used while the request was in flight.
        provisional: ColumnId,
        /// Authoritative column.
        column: BoardColumn,
    },
    /// A column title changed.
    ColumnRenamed {
        /// Renamed column.
        column_id: ColumnId,
        /// New title.
        title: Title,
    },
    /// A column and its tasks were removed.
    ColumnRemoved(ColumnId),
    /// A task was appended to its column optimistically.
    TaskAdded(Task),
    /// The server confirmed a provisional task.
    TaskConfirmed {
        /// Identifier used while the request was in flight.
        provisional: TaskId,
        /// Authoritative task.
        task: Task,
    },
    /// A task's content changed.
    TaskEdited {
        /// Edited task.
        task_id: TaskId,
        /// New title.
        title: Title,
        /// New description.
        description: String,
    },
    /// A task was removed.
    TaskRemoved(TaskId),
    /// A task was moved to the end of another column.
    TaskMoved {
        /// Moved task.
        task_id: TaskId,
        /// Column the task is taken from.
        from: ColumnId,
        /// Column the task is appended to.
        to: ColumnId,
    },
    /// The server reported where a moved task ended up.
    TaskPlaced(TaskPlacement),
}

impl BoardState {
    /// Returns the columns in board order.
    #[must_use]
    pub fn columns(&self) -> &[BoardColumn] {
        &self.columns
    }

    /// Returns `true` while a full board fetch is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Returns the last unacknowledged error.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Finds a column by identifier.
    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&BoardColumn> {
        self.columns.iter().find(|column| column.id() == id)
    }

    /// Finds a task by identifier in any column.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.columns
            .iter()
            .flat_map(BoardColumn::tasks)
            .find(|task| task.id() == id)
    }

    /// Returns the column currently holding `task_id`.
    #[must_use]
    pub fn column_of(&self, task_id: TaskId) -> Option<ColumnId> {
        self.task(task_id).map(Task::column_id)
    }

    /// Applies one transition and returns the resulting state.
    #[must_use]
    pub fn reduce(mut self, action: BoardAction) -> Self {
        match action {
            BoardAction::FetchStarted => {
                self.is_loading = true;
                self.error = None;
            }
            BoardAction::Loaded(columns) => {
                self.columns = columns;
                self.is_loading = false;
            }
            BoardAction::Failed(message) => {
                self.is_loading = false;
                self.error = Some(message);
            }
            BoardAction::ClearError => self.error = None,
            BoardAction::ColumnAdded(column) => self.columns.push(BoardColumn::empty(column)),
            BoardAction::ColumnConfirmed {
                provisional,
                column,
            } => self.confirm_column(provisional, column),
            BoardAction::ColumnRenamed { column_id, title } => {
                if let Some(column) = self.column_mut(column_id) {
                    column.column_mut().rename(title);
                }
            }
            BoardAction::ColumnRemoved(column_id) => {
                self.columns.retain(|column| column.id() != column_id);
            }
            BoardAction::TaskAdded(task) => {
                if let Some(column) = self.column_mut(task.column_id()) {
                    column.tasks_mut().push(task);
                }
            }
            BoardAction::TaskConfirmed { provisional, task } => {
                self.confirm_task(provisional, task);
            }
            BoardAction::TaskEdited {
                task_id,
                title,
                description,
            } => {
                if let Some(task) = self.task_mut(task_id) {
                    task.edit(title, description);
                }
            }
            BoardAction::TaskRemoved(task_id) => {
                for column in &mut self.columns {
                    column.tasks_mut().retain(|task| task.id() != task_id);
                }
            }
            BoardAction::TaskMoved { task_id, from, to } => self.move_task(task_id, from, to),
            BoardAction::TaskPlaced(placement) => self.place_task(placement),
        }
        self
    }

    fn column_mut(&mut self, id: ColumnId) -> Option<&mut BoardColumn> {
        self.columns.iter_mut().find(|column| column.id() == id)
    }

    fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.columns
            .iter_mut()
            .flat_map(|column| column.tasks_mut().iter_mut())
            .find(|task| task.id() == id)
    }

    fn confirm_column(&mut self, provisional: ColumnId, confirmed: BoardColumn) {
        if let Some(slot) = self.column_mut(provisional) {
            *slot = confirmed;
        } else if self.column(confirmed.id()).is_none() {
            self.columns.push(confirmed);
        }
    }

    fn confirm_task(&mut self, provisional: TaskId, confirmed: Task) {
        if let Some(slot) = self.task_mut(provisional) {
            *slot = confirmed;
        } else if self.task(confirmed.id()).is_none()
            && let Some(column) = self.column_mut(confirmed.column_id())
        {
            column.tasks_mut().push(confirmed);
        }
    }

    fn move_task(&mut self, task_id: TaskId, from: ColumnId, to: ColumnId) {
        if from == to || self.column(to).is_none() {
            return;
        }
        let Some(source) = self.column_mut(from) else {
            return;
        };
        let Some(index) = source.tasks().iter().position(|task| task.id() == task_id) else {
            return;
        };
        let mut task = source.tasks_mut().remove(index);
        if let Some(destination) = self.column_mut(to) {
            let appended = u32::try_from(destination.tasks().len()).unwrap_or(u32::MAX);
            task.relocate(to, appended.into());
            destination.tasks_mut().push(task);
        }
    }

    fn place_task(&mut self, placement: TaskPlacement) {
        let Some(current) = self.column_of(placement.task_id) else {
            return;
        };
        if current != placement.column_id {
            self.move_task(placement.task_id, current, placement.column_id);
        }
        if let Some(task) = self.task_mut(placement.task_id) {
            task.set_position(placement.position);
        }
    }
}
