//! In-memory repository for tests and single-process use.
//!
//! A transaction works on a private copy of the board taken under the write
//! lock. The copy replaces the shared state only when the work returns `Ok`,
//! so a failed unit of work leaves no trace. Holding the write lock for the
//! whole transaction serializes all writers, which makes the row-lock
//! methods no-ops.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Column, ColumnId, Position, Task, TaskId, Title},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult, BoardTransaction},
};

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    state: Arc<RwLock<BoardData>>,
}

#[derive(Debug, Clone, Default)]
struct BoardData {
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn transaction<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut state = self.state.write().map_err(poisoned)?;
        let mut working = state.clone();
        let output = work(&mut InMemoryTransaction { data: &mut working })?;
        *state = working;
        Ok(output)
    }

    async fn snapshot<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let mut copy = self.state.read().map_err(poisoned)?.clone();
        work(&mut InMemoryTransaction { data: &mut copy })
    }

    async fn ping(&self) -> BoardRepositoryResult<()> {
        self.state.read().map(|_| ()).map_err(poisoned)
    }
}

struct InMemoryTransaction<'a> {
    data: &'a mut BoardData,
}

fn compare_tasks(left: &Task, right: &Task) -> Ordering {
    left.position()
        .cmp(&right.position())
        .then_with(|| left.created_at().cmp(&right.created_at()))
        .then_with(|| left.id().cmp(&right.id()))
}

fn count(len: usize) -> BoardRepositoryResult<u32> {
    u32::try_from(len).map_err(BoardRepositoryError::persistence)
}

impl InMemoryTransaction<'_> {
    fn task_mut(&mut self, id: TaskId) -> BoardRepositoryResult<&mut Task> {
        self.data
            .tasks
            .get_mut(&id)
            .ok_or(BoardRepositoryError::TaskNotFound(id))
    }
}

impl BoardTransaction for InMemoryTransaction<'_> {
    fn lock_board(&mut self) -> BoardRepositoryResult<()> {
        Ok(())
    }

    fn lock_columns(&mut self, ids: &[ColumnId]) -> BoardRepositoryResult<Vec<ColumnId>> {
        let mut existing: Vec<ColumnId> = ids
            .iter()
            .copied()
            .filter(|id| self.data.columns.contains_key(id))
            .collect();
        existing.sort_unstable();
        existing.dedup();
        Ok(existing)
    }

    fn find_task(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        Ok(self.data.tasks.get(&id).cloned())
    }

    fn find_task_for_update(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.find_task(id)
    }

    fn find_column(&mut self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        Ok(self.data.columns.get(&id).cloned())
    }

    fn count_columns(&mut self) -> BoardRepositoryResult<u32> {
        count(self.data.columns.len())
    }

    fn count_tasks(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32> {
        count(
            self.data
                .tasks
                .values()
                .filter(|task| task.column_id() == column_id)
                .count(),
        )
    }

    fn columns(&mut self) -> BoardRepositoryResult<Vec<Column>> {
        let mut columns: Vec<Column> = self.data.columns.values().cloned().collect();
        columns.sort_by(|left, right| {
            left.position()
                .cmp(&right.position())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(columns)
    }

    fn tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .data
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .cloned()
            .collect();
        tasks.sort_by(compare_tasks);
        Ok(tasks)
    }

    fn all_tasks(&mut self) -> BoardRepositoryResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self.data.tasks.values().cloned().collect();
        tasks.sort_by(compare_tasks);
        Ok(tasks)
    }

    fn insert_column(&mut self, column: &Column) -> BoardRepositoryResult<()> {
        if self.data.columns.contains_key(&column.id()) {
            return Err(BoardRepositoryError::persistence(std::io::Error::other(
                format!("duplicate column identifier: {}", column.id()),
            )));
        }
        self.data.columns.insert(column.id(), column.clone());
        Ok(())
    }

    fn insert_task(&mut self, task: &Task) -> BoardRepositoryResult<()> {
        if !self.data.columns.contains_key(&task.column_id()) {
            return Err(BoardRepositoryError::ColumnNotFound(task.column_id()));
        }
        if self.data.tasks.contains_key(&task.id()) {
            return Err(BoardRepositoryError::persistence(std::io::Error::other(
                format!("duplicate task identifier: {}", task.id()),
            )));
        }
        self.data.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    fn update_column_title(&mut self, id: ColumnId, title: &Title) -> BoardRepositoryResult<bool> {
        let Some(column) = self.data.columns.get_mut(&id) else {
            return Ok(false);
        };
        column.rename(title.clone());
        Ok(true)
    }

    fn update_task_content(
        &mut self,
        id: TaskId,
        title: &Title,
        description: &str,
    ) -> BoardRepositoryResult<bool> {
        let Some(task) = self.data.tasks.get_mut(&id) else {
            return Ok(false);
        };
        task.edit(title.clone(), description.to_owned());
        Ok(true)
    }

    fn set_column_position(
        &mut self,
        id: ColumnId,
        position: Position,
    ) -> BoardRepositoryResult<()> {
        let column = self
            .data
            .columns
            .get_mut(&id)
            .ok_or(BoardRepositoryError::ColumnNotFound(id))?;
        column.set_position(position);
        Ok(())
    }

    fn set_task_position(&mut self, id: TaskId, position: Position) -> BoardRepositoryResult<()> {
        self.task_mut(id)?.set_position(position);
        Ok(())
    }

    fn relocate_task(
        &mut self,
        id: TaskId,
        column_id: ColumnId,
        position: Position,
    ) -> BoardRepositoryResult<()> {
        if !self.data.columns.contains_key(&column_id) {
            return Err(BoardRepositoryError::ColumnNotFound(column_id));
        }
        self.task_mut(id)?.relocate(column_id, position);
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> BoardRepositoryResult<bool> {
        Ok(self.data.tasks.remove(&id).is_some())
    }

    fn delete_tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32> {
        let before = self.data.tasks.len();
        self.data
            .tasks
            .retain(|_, task| task.column_id() != column_id);
        count(before - self.data.tasks.len())
    }

    fn delete_column(&mut self, id: ColumnId) -> BoardRepositoryResult<bool> {
        Ok(self.data.columns.remove(&id).is_some())
    }
}
