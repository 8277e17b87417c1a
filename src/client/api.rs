//! Port to the board's REST surface.

use super::ClientResult;
use crate::{
    board::domain::{BoardColumn, ColumnId, Task, TaskId, TaskPlacement},
    http::schema::{ColumnTitleResponse, TaskContentResponse},
};
use async_trait::async_trait;

/// Remote board operations, one per `/api` endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// `GET /columns`.
    async fn list_columns(&self) -> ClientResult<Vec<BoardColumn>>;

    /// `POST /columns`.
    async fn create_column(&self, title: &str) -> ClientResult<BoardColumn>;

    /// `PUT /columns/:id`.
    async fn update_column(&self, id: ColumnId, title: &str) -> ClientResult<ColumnTitleResponse>;

    /// `DELETE /columns/:id`.
    async fn delete_column(&self, id: ColumnId) -> ClientResult<()>;

    /// `POST /tasks`.
    async fn create_task(
        &self,
        column_id: ColumnId,
        title: &str,
        description: &str,
    ) -> ClientResult<Task>;

    /// `PUT /tasks/:id`.
    async fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
    ) -> ClientResult<TaskContentResponse>;

    /// `PUT /tasks/:id/move`.
    async fn move_task(
        &self,
        id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
    ) -> ClientResult<TaskPlacement>;

    /// `DELETE /tasks/:id`.
    async fn delete_task(&self, id: TaskId) -> ClientResult<()>;
}
