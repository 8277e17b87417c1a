//! Move protocol tests against `PostgreSQL`.

use crate::postgres::helpers::{BoardContext, assert_dense, board_context, pairs, placements};
use kanban_board::board::{
    domain::ColumnId,
    services::{ErrorKind, MoveTaskRequest},
};
use rstest::rstest;

#[rstest]
fn move_appends_to_destination_and_resequences_source(board_context: Option<BoardContext>) {
    let Some(ctx) = board_context else {
        return;
    };
    let a = ctx.column("A");
    let b = ctx.column("B");
    ctx.task(a, "x");
    let y = ctx.task(a, "y");
    ctx.task(a, "z");
    ctx.task(b, "w");

    let placement = ctx
        .rt
        .block_on(ctx.service.move_task(MoveTaskRequest::new(y, a, b)))
        .expect("move should succeed");

    assert_eq!(placement.column_id, b);
    assert_eq!(placement.position.value(), 1);
    let board = ctx.board();
    assert_eq!(placements(&board, a), pairs(&[("x", 0), ("z", 1)]));
    assert_eq!(placements(&board, b), pairs(&[("w", 0), ("y", 1)]));
    assert_dense(&board);
}

#[rstest]
fn stale_source_is_a_conflict_and_changes_nothing(board_context: Option<BoardContext>) {
    let Some(ctx) = board_context else {
        return;
    };
    let a = ctx.column("A");
    let b = ctx.column("B");
    let c = ctx.column("C");
    let card = ctx.task(a, "card");
    ctx.rt
        .block_on(ctx.service.move_task(MoveTaskRequest::new(card, a, b)))
        .expect("first move should succeed");
    let before = ctx.board();

    let err = ctx
        .rt
        .block_on(ctx.service.move_task(MoveTaskRequest::new(card, a, c)))
        .expect_err("stale move should fail");

    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(ctx.board(), before);
}

#[rstest]
fn move_to_missing_column_rolls_back(board_context: Option<BoardContext>) {
    let Some(ctx) = board_context else {
        return;
    };
    let a = ctx.column("A");
    let card = ctx.task(a, "card");
    ctx.task(a, "other");
    let before = ctx.board();

    let err = ctx
        .rt
        .block_on(
            ctx.service
                .move_task(MoveTaskRequest::new(card, a, ColumnId::new())),
        )
        .expect_err("move should fail");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(ctx.board(), before);
}

#[rstest]
fn same_column_move_is_a_no_op(board_context: Option<BoardContext>) {
    let Some(ctx) = board_context else {
        return;
    };
    let a = ctx.column("A");
    ctx.task(a, "first");
    let second = ctx.task(a, "second");
    let before = ctx.board();

    let placement = ctx
        .rt
        .block_on(ctx.service.move_task(MoveTaskRequest::new(second, a, a)))
        .expect("no-op move should succeed");

    assert_eq!(placement.position.value(), 1);
    assert_eq!(ctx.board(), before);
}
