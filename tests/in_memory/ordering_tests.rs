//! Position density tests for [`InMemoryBoardRepository`].
//!
//! Runs long chains of mixed operations and checks the dense-position
//! invariant after every step.
//!
//! [`InMemoryBoardRepository`]: kanban_board::board::adapters::memory::InMemoryBoardRepository

use crate::in_memory::helpers::{
    TestService, add_column, add_task, assert_dense, board, service, titles,
};
use kanban_board::board::{
    domain::{BoardColumn, ColumnId, TaskId},
    services::MoveTaskRequest,
};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mixed_operations_keep_every_column_dense(service: TestService) {
    let todo = add_column(&service, "To Do").await;
    let doing = add_column(&service, "Doing").await;
    let done = add_column(&service, "Done").await;
    let mut cards: Vec<(TaskId, ColumnId)> = Vec::new();
    for (index, column) in (0..9).zip([todo, doing, done].into_iter().cycle()) {
        let id = add_task(&service, column, &format!("card {index}")).await;
        cards.push((id, column));
        assert_dense(&board(&service).await);
    }

    for ((task_id, owner), target) in cards.iter_mut().zip([done, todo].into_iter().cycle()) {
        if target == *owner {
            continue;
        }
        service
            .move_task(MoveTaskRequest::new(*task_id, *owner, target))
            .await
            .expect("move should succeed");
        *owner = target;
        assert_dense(&board(&service).await);
    }

    for (task_id, _) in cards.iter().step_by(3) {
        service
            .delete_task(*task_id)
            .await
            .expect("delete should succeed");
        assert_dense(&board(&service).await);
    }

    service
        .delete_column(doing)
        .await
        .expect("column delete should succeed");
    let listed = board(&service).await;
    assert_dense(&listed);
    assert_eq!(
        listed.iter().map(BoardColumn::id).collect::<Vec<_>>(),
        vec![todo, done]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn moved_task_lands_after_existing_destination_tasks(service: TestService) {
    let source = add_column(&service, "Source").await;
    let target = add_column(&service, "Target").await;
    let first = add_task(&service, source, "first").await;
    let second = add_task(&service, source, "second").await;
    add_task(&service, target, "resident").await;

    service
        .move_task(MoveTaskRequest::new(second, source, target))
        .await
        .expect("move should succeed");
    let placement = service
        .move_task(MoveTaskRequest::new(first, source, target))
        .await
        .expect("move should succeed");

    let listed = board(&service).await;
    assert_eq!(placement.position.value(), 2);
    assert!(titles(&listed, source).is_empty());
    assert_eq!(
        titles(&listed, target),
        vec!["resident", "second", "first"]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn new_column_after_deletion_takes_the_next_dense_position(service: TestService) {
    add_column(&service, "A").await;
    let b = add_column(&service, "B").await;
    add_column(&service, "C").await;

    service
        .delete_column(b)
        .await
        .expect("column delete should succeed");
    let d = service
        .create_column("D")
        .await
        .expect("column creation should succeed");

    assert_eq!(d.column().position().value(), 2);
    assert_dense(&board(&service).await);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn flat_task_listing_orders_by_position(service: TestService) {
    let left = add_column(&service, "Left").await;
    let right = add_column(&service, "Right").await;
    add_task(&service, left, "l0").await;
    add_task(&service, right, "r0").await;
    add_task(&service, left, "l1").await;

    let tasks = service.list_tasks().await.expect("listing should succeed");

    let positions: Vec<u32> = tasks.iter().map(|task| task.position().value()).collect();
    let mut sorted = positions.clone();
    sorted.sort_unstable();
    assert_eq!(positions, sorted);
    assert_eq!(tasks.len(), 3);
}
