//! Task entity and related placement types.

use super::{ColumnId, Position, TaskId, Title};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task owned by exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: Title,
    description: String,
    column_id: ColumnId,
    position: Position,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: Title,
    /// Persisted description, possibly empty.
    pub description: String,
    /// Owning column.
    pub column_id: ColumnId,
    /// Position within the owning column.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            column_id: data.column_id,
            position: data.position,
            created_at: data.created_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the owning column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Returns the position within the owning column.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns where the task currently sits.
    #[must_use]
    pub const fn placement(&self) -> TaskPlacement {
        TaskPlacement {
            task_id: self.id,
            column_id: self.column_id,
            position: self.position,
        }
    }

    pub(crate) fn edit(&mut self, title: Title, description: String) {
        self.title = title;
        self.description = description;
    }

    pub(crate) const fn relocate(&mut self, column_id: ColumnId, position: Position) {
        self.column_id = column_id;
        self.position = position;
    }

    pub(crate) const fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

/// A task that has not been assigned a position yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    id: TaskId,
    column_id: ColumnId,
    title: Title,
    description: String,
    created_at: DateTime<Utc>,
}

impl TaskDraft {
    /// Creates a draft stamped with the current clock time.
    #[must_use]
    pub fn new(
        column_id: ColumnId,
        title: Title,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: TaskId::new(),
            column_id,
            title,
            description: description.into(),
            created_at: clock.utc(),
        }
    }

    /// Returns the identifier the task will be stored under.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the target column.
    #[must_use]
    pub const fn column_id(&self) -> ColumnId {
        self.column_id
    }

    /// Finalises the draft at the allocated position.
    #[must_use]
    pub fn place(self, position: Position) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            column_id: self.column_id,
            position,
            created_at: self.created_at,
        }
    }
}

/// Authoritative location of a task after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPlacement {
    /// Moved task.
    #[serde(rename = "id")]
    pub task_id: TaskId,
    /// Column now owning the task.
    pub column_id: ColumnId,
    /// Position within that column.
    pub position: Position,
}
