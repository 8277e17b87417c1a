//! Request and response bodies for the `/api` surface.
//!
//! Request fields are optional at the serde level so that presence can be
//! checked explicitly, with an endpoint-specific message, before any
//! mutation begins. The same types are used by the client to encode its
//! requests.

use crate::board::domain::{ColumnId, TaskId, Title};
use serde::{Deserialize, Serialize};

/// Body of `POST /columns` and `PUT /columns/:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTitleRequest {
    /// Column title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Body of `POST /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskBody {
    /// Task title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Task description; empty when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Column receiving the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_id: Option<String>,
}

/// Body of `PUT /tasks/:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskBody {
    /// Task title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Task description; empty when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `PUT /tasks/:id/move`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveTaskBody {
    /// Column the caller believes owns the task.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_column_id: Option<String>,
    /// Destination column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_column_id: Option<String>,
}

/// Body of `GET /health` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Human-readable status.
    pub status: String,
}

/// Body of every failure response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Body of `PUT /columns/:id` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTitleResponse {
    /// Renamed column.
    pub id: ColumnId,
    /// New title.
    pub title: Title,
}

/// Body of `PUT /tasks/:id` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskContentResponse {
    /// Edited task.
    pub id: TaskId,
    /// New title.
    pub title: Title,
    /// New description.
    pub description: String,
}

/// Returns the value when present and not blank.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
