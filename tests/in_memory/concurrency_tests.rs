//! Parallel request tests for the in-memory repository.

use crate::in_memory::helpers::{
    TestService, add_column, add_task, assert_dense, board, service, titles,
};
use kanban_board::board::{
    domain::{Position, TaskPlacement},
    services::{BoardServiceResult, CreateTaskRequest, ErrorKind, MoveTaskRequest},
};
use rstest::rstest;
use std::sync::Arc;
use tokio::task::JoinSet;

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn parallel_creates_receive_distinct_positions(service: TestService) {
    let column = add_column(&service, "Inbox").await;
    let handle = Arc::new(service);
    let mut creates = JoinSet::new();
    for index in 0..16 {
        let shared = Arc::clone(&handle);
        creates.spawn(async move {
            shared
                .create_task(CreateTaskRequest::new(column, format!("card {index}")))
                .await
        });
    }

    let mut positions = Vec::new();
    while let Some(joined) = creates.join_next().await {
        let task = joined
            .expect("create task should not panic")
            .expect("create should succeed");
        positions.push(task.position());
    }

    positions.sort_unstable();
    assert_eq!(positions, (0..16).map(Position::new).collect::<Vec<_>>());
    assert_dense(&board(handle.as_ref()).await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn racing_moves_of_one_task_let_exactly_one_win(service: TestService) {
    let source = add_column(&service, "Source").await;
    let left = add_column(&service, "Left").await;
    let right = add_column(&service, "Right").await;
    add_task(&service, source, "stays").await;
    let contested = add_task(&service, source, "contested").await;
    let handle = Arc::new(service);

    let mut moves: JoinSet<BoardServiceResult<TaskPlacement>> = JoinSet::new();
    for destination in [left, right, left, right] {
        let shared = Arc::clone(&handle);
        moves.spawn(async move {
            shared
                .move_task(MoveTaskRequest::new(contested, source, destination))
                .await
        });
    }

    let mut winners = Vec::new();
    let mut conflicts = 0_usize;
    while let Some(joined) = moves.join_next().await {
        match joined.expect("move task should not panic") {
            Ok(placement) => winners.push(placement),
            Err(err) => {
                assert_eq!(err.kind(), ErrorKind::Conflict);
                conflicts += 1;
            }
        }
    }

    assert_eq!(winners.len(), 1);
    assert_eq!(conflicts, 3);
    let listed = board(handle.as_ref()).await;
    assert_eq!(titles(&listed, source), vec!["stays"]);
    let landed: usize = [left, right]
        .iter()
        .map(|column| titles(&listed, *column).len())
        .sum();
    assert_eq!(landed, 1);
    assert_dense(&listed);
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn crossing_moves_between_two_columns_stay_dense(service: TestService) {
    let east = add_column(&service, "East").await;
    let west = add_column(&service, "West").await;
    let mut eastbound = Vec::new();
    let mut westbound = Vec::new();
    for index in 0..6 {
        westbound.push(add_task(&service, east, &format!("e{index}")).await);
        eastbound.push(add_task(&service, west, &format!("w{index}")).await);
    }
    let handle = Arc::new(service);

    let mut moves = JoinSet::new();
    for task_id in westbound {
        let shared = Arc::clone(&handle);
        moves.spawn(async move {
            shared
                .move_task(MoveTaskRequest::new(task_id, east, west))
                .await
        });
    }
    for task_id in eastbound {
        let shared = Arc::clone(&handle);
        moves.spawn(async move {
            shared
                .move_task(MoveTaskRequest::new(task_id, west, east))
                .await
        });
    }
    while let Some(joined) = moves.join_next().await {
        joined
            .expect("move task should not panic")
            .expect("move should succeed");
    }

    let listed = board(handle.as_ref()).await;
    assert_dense(&listed);
    assert_eq!(titles(&listed, east).len(), 6);
    assert_eq!(titles(&listed, west).len(), 6);
    assert!(
        titles(&listed, east)
            .iter()
            .all(|title| title.starts_with('w'))
    );
}
