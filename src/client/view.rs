//! Board view interface.
//!
//! Rendering itself is left to a [`BoardRenderer`]. This module turns
//! drag gestures into store calls and drives re-rendering from the store's
//! change notifications.

use super::{BoardApi, BoardState, BoardStore, ClientResult};
use crate::board::domain::{ColumnId, Task, TaskId, TaskPlacement};
use mockable::Clock;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// A drag gesture picked up a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragStart {
    /// Dragged task.
    pub task_id: TaskId,
}

/// Element under the pointer when a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// A column body.
    Column(ColumnId),
    /// Another task card; its column receives the drop.
    Task(TaskId),
}

/// A drag gesture released a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragEnd {
    /// Dragged task.
    pub task_id: TaskId,
    /// Drop target, absent when released outside any column.
    pub target: Option<DropTarget>,
}

/// Move derived from a completed drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveIntent {
    /// Task to move.
    pub task_id: TaskId,
    /// Column currently holding it.
    pub from: ColumnId,
    /// Column receiving it.
    pub to: ColumnId,
}

/// Resolves a drop into a cross-column move.
///
/// Returns `None` for drops with no target, onto an unknown element, or
/// onto the task's own column.
#[must_use]
pub fn resolve_drop(state: &BoardState, end: &DragEnd) -> Option<MoveIntent> {
    let from = state.column_of(end.task_id)?;
    let to = match end.target? {
        DropTarget::Column(column_id) => state.column(column_id).map(|column| column.id())?,
        DropTarget::Task(task_id) => state.column_of(task_id)?,
    };
    (from != to).then_some(MoveIntent {
        task_id: end.task_id,
        from,
        to,
    })
}

/// Draws the board.
pub trait BoardRenderer {
    /// Renders the given state.
    fn render(&mut self, state: &BoardState);
}

/// Task being dragged, kept for the drag overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveDrag {
    /// Dragged task as it was when picked up.
    pub task: Task,
    /// Column the task was picked up from.
    pub column_id: ColumnId,
}

/// Translates gestures into store calls.
#[derive(Debug)]
pub struct BoardController<A, C> {
    store: Arc<BoardStore<A, C>>,
    active: Option<ActiveDrag>,
}

impl<A, C> BoardController<A, C>
where
    A: BoardApi,
    C: Clock + Send + Sync,
{
    /// Creates a controller over a shared store.
    #[must_use]
    pub const fn new(store: Arc<BoardStore<A, C>>) -> Self {
        Self {
            store,
            active: None,
        }
    }

    /// Returns the store.
    #[must_use]
    pub const fn store(&self) -> &Arc<BoardStore<A, C>> {
        &self.store
    }

    /// Returns the task currently being dragged.
    #[must_use]
    pub const fn active(&self) -> Option<&ActiveDrag> {
        self.active.as_ref()
    }

    /// Records the dragged task; unknown tasks are ignored.
    pub fn drag_start(&mut self, start: DragStart) -> Option<&ActiveDrag> {
        let state = self.store.snapshot();
        self.active = state.task(start.task_id).map(|task| ActiveDrag {
            task: task.clone(),
            column_id: task.column_id(),
        });
        self.active.as_ref()
    }

    /// Ends the drag, issuing a move when the drop resolves to another
    /// column. Returns `None` when the drop was ignored.
    pub async fn drag_end(&mut self, end: DragEnd) -> Option<ClientResult<TaskPlacement>> {
        self.active = None;
        let Some(intent) = resolve_drop(&self.store.snapshot(), &end) else {
            debug!(task_id = %end.task_id, "drop ignored");
            return None;
        };
        Some(
            self.store
                .move_task(intent.task_id, intent.from, intent.to)
                .await,
        )
    }
}

/// Renders the current state, then again after every change, until the
/// store is dropped.
pub async fn render_loop<R>(mut states: watch::Receiver<BoardState>, renderer: &mut R)
where
    R: BoardRenderer + ?Sized,
{
    renderer.render(&states.borrow_and_update());
    while states.changed().await.is_ok() {
        renderer.render(&states.borrow_and_update());
    }
}
