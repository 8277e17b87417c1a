//! Shared helpers for in-memory board integration tests.

use kanban_board::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{BoardColumn, ColumnId, Task, TaskId, sequence::is_dense},
    ports::BoardRepository,
    services::{BoardService, CreateTaskRequest},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::sync::Arc;

/// Service type used across in-memory tests.
pub type TestService<R = InMemoryBoardRepository> = BoardService<R, DefaultClock>;

/// Provides a service over a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    service_over(InMemoryBoardRepository::new())
}

/// Builds a service over an arbitrary repository.
pub fn service_over<R: BoardRepository>(repository: R) -> TestService<R> {
    BoardService::new(Arc::new(repository), Arc::new(DefaultClock))
}

/// Creates a column and returns its id.
pub async fn add_column<R: BoardRepository>(service: &TestService<R>, title: &str) -> ColumnId {
    service
        .create_column(title)
        .await
        .expect("column creation should succeed")
        .id()
}

/// Creates a task and returns its id.
pub async fn add_task<R: BoardRepository>(
    service: &TestService<R>,
    column_id: ColumnId,
    title: &str,
) -> TaskId {
    service
        .create_task(CreateTaskRequest::new(column_id, title))
        .await
        .expect("task creation should succeed")
        .id()
}

/// Reads the whole board.
pub async fn board<R: BoardRepository>(service: &TestService<R>) -> Vec<BoardColumn> {
    service
        .list_columns_with_tasks()
        .await
        .expect("listing should succeed")
}

/// Returns the task titles of one column in board order.
pub fn titles(board: &[BoardColumn], column_id: ColumnId) -> Vec<String> {
    board
        .iter()
        .find(|column| column.id() == column_id)
        .map(|column| {
            column
                .tasks()
                .iter()
                .map(|task| task.title().as_str().to_owned())
                .collect()
        })
        .unwrap_or_default()
}

/// Asserts that column positions and every column's task positions are
/// `0..n` with no gaps or duplicates.
pub fn assert_dense(board: &[BoardColumn]) {
    assert!(
        is_dense(board.iter().map(|column| column.column().position())),
        "column positions are not dense"
    );
    for column in board {
        assert!(
            is_dense(column.tasks().iter().map(Task::position)),
            "task positions in column {} are not dense",
            column.id()
        );
    }
}
