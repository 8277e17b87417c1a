//! Diesel row models for board persistence.

use super::schema::{columns, tasks};
use crate::board::{
    domain::{Column, ColumnId, PersistedTaskData, Position, Task, TaskId, Title},
    ports::BoardRepositoryResult,
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for column records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Column title.
    pub title: String,
    /// Board position.
    pub position: i32,
}

/// Insert model for column records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = columns)]
pub struct NewColumnRow {
    /// Column identifier.
    pub id: uuid::Uuid,
    /// Column title.
    pub title: String,
    /// Board position.
    pub position: i32,
}

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Owning column.
    pub column_id: uuid::Uuid,
    /// Position within the column.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Task description.
    pub description: String,
    /// Owning column.
    pub column_id: uuid::Uuid,
    /// Position within the column.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl NewColumnRow {
    pub(super) fn from_domain(column: &Column) -> BoardRepositoryResult<Self> {
        Ok(Self {
            id: column.id().into_inner(),
            title: column.title().as_str().to_owned(),
            position: column.position().to_persisted()?,
        })
    }
}

impl NewTaskRow {
    pub(super) fn from_domain(task: &Task) -> BoardRepositoryResult<Self> {
        Ok(Self {
            id: task.id().into_inner(),
            title: task.title().as_str().to_owned(),
            description: task.description().to_owned(),
            column_id: task.column_id().into_inner(),
            position: task.position().to_persisted()?,
            created_at: task.created_at(),
        })
    }
}

impl ColumnRow {
    pub(super) fn into_domain(self) -> BoardRepositoryResult<Column> {
        Ok(Column::from_persisted(
            ColumnId::from_uuid(self.id),
            Title::new(self.title)?,
            Position::from_persisted(self.position)?,
        ))
    }
}

impl TaskRow {
    pub(super) fn into_domain(self) -> BoardRepositoryResult<Task> {
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(self.id),
            title: Title::new(self.title)?,
            description: self.description,
            column_id: ColumnId::from_uuid(self.column_id),
            position: Position::from_persisted(self.position)?,
            created_at: self.created_at,
        }))
    }
}
