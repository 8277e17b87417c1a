//! Domain model for the kanban board.
//!
//! Columns and tasks are plain value types. Their ordering rules live in
//! [`sequence`], which computes renumbering plans without touching storage.

mod column;
mod error;
mod ids;
mod position;
pub mod sequence;
mod task;
mod title;

pub use column::{BoardColumn, Column, ColumnDraft};
pub use error::BoardDomainError;
pub use ids::{ColumnId, TaskId};
pub use position::Position;
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPlacement};
pub use title::Title;
