//! Mapping of service failures to HTTP responses.

use super::schema::ErrorResponse;
use crate::board::{
    ports::BoardRepositoryError,
    services::{BoardServiceError, ErrorKind},
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Endpoint identity, used to pick client-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// `GET /health`.
    Health,
    /// `GET /columns`.
    ListColumns,
    /// `POST /columns`.
    CreateColumn,
    /// `PUT /columns/:id`.
    UpdateColumn,
    /// `DELETE /columns/:id`.
    DeleteColumn,
    /// `GET /tasks`.
    ListTasks,
    /// `POST /tasks`.
    CreateTask,
    /// `PUT /tasks/:id`.
    UpdateTask,
    /// `PUT /tasks/:id/move`.
    MoveTask,
    /// `DELETE /tasks/:id`.
    DeleteTask,
}

impl Endpoint {
    /// Message returned when required fields are missing.
    #[must_use]
    pub const fn validation_message(self) -> &'static str {
        match self {
            Self::CreateColumn | Self::UpdateColumn | Self::UpdateTask => "Title is required",
            Self::CreateTask => "Title and column_id are required",
            Self::MoveTask => "From and to column IDs are required",
            Self::Health
            | Self::ListColumns
            | Self::DeleteColumn
            | Self::ListTasks
            | Self::DeleteTask => "Invalid request",
        }
    }

    /// Message returned for storage failures; internals are never exposed.
    #[must_use]
    pub const fn storage_message(self) -> &'static str {
        match self {
            Self::Health => "Database connection failed",
            Self::ListColumns => "Failed to fetch columns",
            Self::CreateColumn => "Failed to create column",
            Self::UpdateColumn => "Failed to update column",
            Self::DeleteColumn => "Failed to delete column",
            Self::ListTasks => "Failed to fetch tasks",
            Self::CreateTask => "Failed to create task",
            Self::UpdateTask => "Failed to update task",
            Self::MoveTask => "Failed to move task",
            Self::DeleteTask => "Failed to delete task",
        }
    }
}

/// Message for an unknown column.
pub const COLUMN_NOT_FOUND: &str = "Column not found";
/// Message for an unknown task.
pub const TASK_NOT_FOUND: &str = "Task not found";
/// Message for a move whose source column is stale.
pub const STALE_SOURCE_COLUMN: &str = "Task is no longer in the source column";

/// Error response with a JSON `{error}` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit status and message.
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Missing or blank required field.
    #[must_use]
    pub fn validation(endpoint: Endpoint) -> Self {
        Self::new(StatusCode::BAD_REQUEST, endpoint.validation_message())
    }

    /// Unknown column.
    #[must_use]
    pub fn column_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, COLUMN_NOT_FOUND)
    }

    /// Unknown task.
    #[must_use]
    pub fn task_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, TASK_NOT_FOUND)
    }

    /// Maps a service failure for the given endpoint.
    #[must_use]
    pub fn from_service(endpoint: Endpoint, err: &BoardServiceError) -> Self {
        match (err.kind(), err) {
            (ErrorKind::Validation, _) => Self::validation(endpoint),
            (
                ErrorKind::NotFound,
                BoardServiceError::Repository(BoardRepositoryError::ColumnNotFound(_)),
            ) => Self::column_not_found(),
            (ErrorKind::NotFound, _) => Self::task_not_found(),
            (ErrorKind::Conflict, _) => Self::new(StatusCode::CONFLICT, STALE_SOURCE_COLUMN),
            (ErrorKind::Storage, _) => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                endpoint.storage_message(),
            ),
        }
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the client-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}
