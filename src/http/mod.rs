//! REST surface for the board, mounted under `/api`.
//!
//! Bodies are JSON. Failures always carry an `{"error": "..."}` body with a
//! message chosen per endpoint; storage details stay in the logs.

mod error;
pub mod handlers;
pub mod schema;

pub use error::{ApiError, COLUMN_NOT_FOUND, Endpoint, STALE_SOURCE_COLUMN, TASK_NOT_FOUND};

use crate::board::{ports::BoardRepository, services::BoardService};
use axum::{
    Router,
    routing::{get, put},
};
use handlers::SharedService;
use mockable::Clock;
use std::{sync::Arc, time::Duration};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

/// Builds the application router.
///
/// Requests that run longer than `request_timeout` are answered with
/// `408 Request Timeout`.
pub fn router<R, C>(service: Arc<BoardService<R, C>>, request_timeout: Duration) -> Router
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .nest("/api", api_routes::<R, C>())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

fn api_routes<R, C>() -> Router<SharedService<R, C>>
where
    R: BoardRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(handlers::health::<R, C>))
        .route(
            "/columns",
            get(handlers::list_columns::<R, C>).post(handlers::create_column::<R, C>),
        )
        .route(
            "/columns/:id",
            put(handlers::update_column::<R, C>).delete(handlers::delete_column::<R, C>),
        )
        .route(
            "/tasks",
            get(handlers::list_tasks::<R, C>).post(handlers::create_task::<R, C>),
        )
        .route(
            "/tasks/:id",
            put(handlers::update_task::<R, C>).delete(handlers::delete_task::<R, C>),
        )
        .route("/tasks/:id/move", put(handlers::move_task::<R, C>))
}
