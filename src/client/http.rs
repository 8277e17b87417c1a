//! `reqwest` implementation of [`BoardApi`].

use super::{BoardApi, ClientError, ClientResult};
use crate::{
    board::domain::{BoardColumn, ColumnId, Task, TaskId, TaskPlacement},
    http::schema::{
        ColumnTitleRequest, ColumnTitleResponse, CreateTaskBody, ErrorResponse, MoveTaskBody,
        TaskContentResponse, UpdateTaskBody,
    },
};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// HTTP client for a board server.
#[derive(Debug, Clone)]
pub struct HttpBoardApi {
    client: Client,
    base_url: String,
}

impl HttpBoardApi {
    /// Creates a client for the API rooted at `base_url`, for example
    /// `http://localhost:3001/api`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a client reusing an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let root: String = base_url.into();
        Self {
            client,
            base_url: root.trim_end_matches('/').to_owned(),
        }
    }

    /// Returns the API root.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn checked(request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> ClientResult<T> {
        Self::checked(request)
            .await?
            .json::<T>()
            .await
            .map_err(ClientError::Decode)
    }

    async fn execute(request: RequestBuilder) -> ClientResult<()> {
        Self::checked(request).await.map(drop)
    }
}

fn title_body(title: &str) -> ColumnTitleRequest {
    ColumnTitleRequest {
        title: Some(title.to_owned()),
    }
}

#[async_trait]
impl BoardApi for HttpBoardApi {
    async fn list_columns(&self) -> ClientResult<Vec<BoardColumn>> {
        Self::fetch(self.client.get(self.url("/columns"))).await
    }

    async fn create_column(&self, title: &str) -> ClientResult<BoardColumn> {
        let request = self.client.post(self.url("/columns")).json(&title_body(title));
        Self::fetch(request).await
    }

    async fn update_column(&self, id: ColumnId, title: &str) -> ClientResult<ColumnTitleResponse> {
        let request = self
            .client
            .put(self.url(&format!("/columns/{id}")))
            .json(&title_body(title));
        Self::fetch(request).await
    }

    async fn delete_column(&self, id: ColumnId) -> ClientResult<()> {
        Self::execute(self.client.delete(self.url(&format!("/columns/{id}")))).await
    }

    async fn create_task(
        &self,
        column_id: ColumnId,
        title: &str,
        description: &str,
    ) -> ClientResult<Task> {
        let body = CreateTaskBody {
            title: Some(title.to_owned()),
            description: Some(description.to_owned()),
            column_id: Some(column_id.to_string()),
        };
        Self::fetch(self.client.post(self.url("/tasks")).json(&body)).await
    }

    async fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
    ) -> ClientResult<TaskContentResponse> {
        let body = UpdateTaskBody {
            title: Some(title.to_owned()),
            description: Some(description.to_owned()),
        };
        let request = self.client.put(self.url(&format!("/tasks/{id}"))).json(&body);
        Self::fetch(request).await
    }

    async fn move_task(
        &self,
        id: TaskId,
        from_column_id: ColumnId,
        to_column_id: ColumnId,
    ) -> ClientResult<TaskPlacement> {
        let body = MoveTaskBody {
            from_column_id: Some(from_column_id.to_string()),
            to_column_id: Some(to_column_id.to_string()),
        };
        let request = self
            .client
            .put(self.url(&format!("/tasks/{id}/move")))
            .json(&body);
        Self::fetch(request).await
    }

    async fn delete_task(&self, id: TaskId) -> ClientResult<()> {
        Self::execute(self.client.delete(self.url(&format!("/tasks/{id}")))).await
    }
}
