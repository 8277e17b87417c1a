//! Column entity and the nested board view of a column with its tasks.

use super::{ColumnId, Position, Task, Title};
use serde::{Deserialize, Serialize};

/// Board column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    id: ColumnId,
    title: Title,
    position: Position,
}

impl Column {
    /// Reconstructs a column from persisted values.
    #[must_use]
    pub const fn from_persisted(id: ColumnId, title: Title, position: Position) -> Self {
        Self {
            id,
            title,
            position,
        }
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the column title.
    #[must_use]
    pub const fn title(&self) -> &Title {
        &self.title
    }

    /// Returns the column position within the board.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn rename(&mut self, title: Title) {
        self.title = title;
    }

    pub(crate) const fn set_position(&mut self, position: Position) {
        self.position = position;
    }
}

/// A column that has not been assigned a board position yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDraft {
    id: ColumnId,
    title: Title,
}

impl ColumnDraft {
    /// Creates a draft with a fresh identifier.
    #[must_use]
    pub fn new(title: Title) -> Self {
        Self {
            id: ColumnId::new(),
            title,
        }
    }

    /// Returns the identifier the column will be stored under.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Finalises the draft at the allocated position.
    #[must_use]
    pub fn place(self, position: Position) -> Column {
        Column {
            id: self.id,
            title: self.title,
            position,
        }
    }
}

/// Column together with its position-ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumn {
    #[serde(flatten)]
    column: Column,
    tasks: Vec<Task>,
}

impl BoardColumn {
    /// Creates a board column; `tasks` must already be position-ordered.
    #[must_use]
    pub const fn new(column: Column, tasks: Vec<Task>) -> Self {
        Self { column, tasks }
    }

    /// Creates a board column without tasks.
    #[must_use]
    pub const fn empty(column: Column) -> Self {
        Self::new(column, Vec::new())
    }

    /// Returns the column.
    #[must_use]
    pub const fn column(&self) -> &Column {
        &self.column
    }

    /// Returns the column identifier.
    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.column.id
    }

    /// Returns the ordered tasks.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub(crate) const fn column_mut(&mut self) -> &mut Column {
        &mut self.column
    }

    pub(crate) const fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }
}
