//! Axum handlers for the `/api` routes.
//!
//! Every handler validates presence of required fields first, parses
//! identifiers second, and only then calls into the service. Identifiers
//! that are not UUIDs cannot name an existing entity and are answered with
//! `404`.

use super::{
    error::{ApiError, Endpoint},
    schema::{
        ColumnTitleRequest, ColumnTitleResponse, CreateTaskBody, HealthResponse, MoveTaskBody,
        TaskContentResponse, UpdateTaskBody, present,
    },
};
use crate::board::{
    domain::{BoardColumn, ColumnId, Task, TaskId, TaskPlacement},
    ports::BoardRepository,
    services::{BoardService, CreateTaskRequest, MoveTaskRequest},
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::debug;

/// Shared handler state.
pub type SharedService<R, C> = Arc<BoardService<R, C>>;

/// Text returned by a healthy `GET /health`.
pub const HEALTHY: &str = "Database connection successful";

fn body<T>(endpoint: Endpoint, payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        debug!(error = %rejection, "rejected request body");
        ApiError::validation(endpoint)
    })
}

fn column_id(raw: &str) -> Result<ColumnId, ApiError> {
    raw.parse().map_err(|_| ApiError::column_not_found())
}

fn task_id(raw: &str) -> Result<TaskId, ApiError> {
    raw.parse().map_err(|_| ApiError::task_not_found())
}

/// `GET /api/health`.
pub async fn health<R, C>(State(service): State<SharedService<R, C>>) -> Response
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    match service.health().await {
        Ok(()) => Json(HealthResponse {
            status: HEALTHY.to_owned(),
        })
        .into_response(),
        Err(err) => ApiError::from_service(Endpoint::Health, &err).into_response(),
    }
}

/// `GET /api/columns`.
///
/// # Errors
///
/// Returns `500` when the board cannot be read.
pub async fn list_columns<R, C>(
    State(service): State<SharedService<R, C>>,
) -> Result<Json<Vec<BoardColumn>>, ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .list_columns_with_tasks()
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(Endpoint::ListColumns, &err))
}

/// `POST /api/columns`.
///
/// # Errors
///
/// Returns `400` when the title is missing or blank.
pub async fn create_column<R, C>(
    State(service): State<SharedService<R, C>>,
    payload: Result<Json<ColumnTitleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BoardColumn>), ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let endpoint = Endpoint::CreateColumn;
    let title = present(body(endpoint, payload)?.title)
        .ok_or_else(|| ApiError::validation(endpoint))?;
    let column = service
        .create_column(title)
        .await
        .map_err(|err| ApiError::from_service(endpoint, &err))?;
    Ok((StatusCode::CREATED, Json(column)))
}

/// `PUT /api/columns/:id`.
///
/// # Errors
///
/// Returns `400` when the title is missing and `404` when the column does
/// not exist.
pub async fn update_column<R, C>(
    State(service): State<SharedService<R, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ColumnTitleRequest>, JsonRejection>,
) -> Result<Json<ColumnTitleResponse>, ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let endpoint = Endpoint::UpdateColumn;
    let title = present(body(endpoint, payload)?.title)
        .ok_or_else(|| ApiError::validation(endpoint))?;
    let id = column_id(&raw_id)?;
    let column = service
        .update_column(id, title)
        .await
        .map_err(|err| ApiError::from_service(endpoint, &err))?;
    Ok(Json(ColumnTitleResponse {
        id: column.id(),
        title: column.title().clone(),
    }))
}

/// `DELETE /api/columns/:id`.
///
/// # Errors
///
/// Returns `404` when the column does not exist.
pub async fn delete_column<R, C>(
    State(service): State<SharedService<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = column_id(&raw_id)?;
    service
        .delete_column(id)
        .await
        .map_err(|err| ApiError::from_service(Endpoint::DeleteColumn, &err))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/tasks`.
///
/// # Errors
///
/// Returns `500` when the tasks cannot be read.
pub async fn list_tasks<R, C>(
    State(service): State<SharedService<R, C>>,
) -> Result<Json<Vec<Task>>, ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service
        .list_tasks()
        .await
        .map(Json)
        .map_err(|err| ApiError::from_service(Endpoint::ListTasks, &err))
}

/// `POST /api/tasks`.
///
/// # Errors
///
/// Returns `400` when the title or column is missing and `404` when the
/// column does not exist.
pub async fn create_task<R, C>(
    State(service): State<SharedService<R, C>>,
    payload: Result<Json<CreateTaskBody>, JsonRejection>,
) -> Result<(StatusCode, Json<Task>), ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let endpoint = Endpoint::CreateTask;
    let CreateTaskBody {
        title,
        description,
        column_id: column,
    } = body(endpoint, payload)?;
    let (Some(required_title), Some(required_column)) = (present(title), present(column)) else {
        return Err(ApiError::validation(endpoint));
    };
    let request = CreateTaskRequest::new(column_id(&required_column)?, required_title)
        .with_description(description.unwrap_or_default());
    let task = service
        .create_task(request)
        .await
        .map_err(|err| ApiError::from_service(endpoint, &err))?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PUT /api/tasks/:id`.
///
/// # Errors
///
/// Returns `400` when the title is missing and `404` when the task does not
/// exist.
pub async fn update_task<R, C>(
    State(service): State<SharedService<R, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateTaskBody>, JsonRejection>,
) -> Result<Json<TaskContentResponse>, ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let endpoint = Endpoint::UpdateTask;
    let UpdateTaskBody { title, description } = body(endpoint, payload)?;
    let required_title = present(title).ok_or_else(|| ApiError::validation(endpoint))?;
    let id = task_id(&raw_id)?;
    let task = service
        .update_task(id, required_title, description.unwrap_or_default())
        .await
        .map_err(|err| ApiError::from_service(endpoint, &err))?;
    Ok(Json(TaskContentResponse {
        id: task.id(),
        title: task.title().clone(),
        description: task.description().to_owned(),
    }))
}

/// `PUT /api/tasks/:id/move`.
///
/// # Errors
///
/// Returns `400` when either column is missing, `404` when the task or
/// destination does not exist, and `409` when the task has left the source
/// column.
pub async fn move_task<R, C>(
    State(service): State<SharedService<R, C>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<MoveTaskBody>, JsonRejection>,
) -> Result<Json<TaskPlacement>, ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let endpoint = Endpoint::MoveTask;
    let MoveTaskBody {
        from_column_id,
        to_column_id,
    } = body(endpoint, payload)?;
    let (Some(from), Some(to)) = (present(from_column_id), present(to_column_id)) else {
        return Err(ApiError::validation(endpoint));
    };
    let request = MoveTaskRequest::new(task_id(&raw_id)?, column_id(&from)?, column_id(&to)?);
    let placement = service
        .move_task(request)
        .await
        .map_err(|err| ApiError::from_service(endpoint, &err))?;
    Ok(Json(placement))
}

/// `DELETE /api/tasks/:id`.
///
/// # Errors
///
/// Returns `404` when the task does not exist.
pub async fn delete_task<R, C>(
    State(service): State<SharedService<R, C>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = task_id(&raw_id)?;
    service
        .delete_task(id)
        .await
        .map_err(|err| ApiError::from_service(Endpoint::DeleteTask, &err))?;
    Ok(StatusCode::NO_CONTENT)
}
