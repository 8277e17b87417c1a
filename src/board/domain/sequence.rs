//! Renumbering plans for dense position sequences.
//!
//! A plan is computed in application code from the members of one scope:
//! members are ordered by current position, ties broken by a stable
//! secondary key, and assigned `0, 1, 2, ...` in that order. Only members
//! whose position actually changes appear in the plan, so applying it twice
//! is the same as applying it once.
//!
//! Tie-breaks:
//!
//! - tasks: `(position, created_at, id)`
//! - columns: `(position, id)`

use super::{Column, ColumnId, Position, Task, TaskId};
use chrono::{DateTime, Utc};

/// One pending position rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionChange<K> {
    /// Member to rewrite.
    pub key: K,
    /// Position previously stored for the member.
    pub from: Position,
    /// Dense position the member receives.
    pub to: Position,
}

/// Computes the renumbering for arbitrary keyed members.
///
/// `members` yields `(key, current_position, tie_break)`; the tie-break must
/// be unique per member for the order to be total.
#[must_use]
pub fn plan<K, T, I>(members: I) -> Vec<PositionChange<K>>
where
    I: IntoIterator<Item = (K, Position, T)>,
    T: Ord,
{
    let mut ordered: Vec<(K, Position, T)> = members.into_iter().collect();
    ordered.sort_by(|left, right| left.1.cmp(&right.1).then_with(|| left.2.cmp(&right.2)));

    ordered
        .into_iter()
        .zip((0_u32..).map(Position::new))
        .filter(|((_, current, _), dense)| current != dense)
        .map(|((key, current, _), dense)| PositionChange {
            key,
            from: current,
            to: dense,
        })
        .collect()
}

/// Computes the renumbering for the tasks of one column.
#[must_use]
pub fn task_plan(tasks: &[Task]) -> Vec<PositionChange<TaskId>> {
    plan(tasks.iter().map(|task| {
        let tie_break: (DateTime<Utc>, TaskId) = (task.created_at(), task.id());
        (task.id(), task.position(), tie_break)
    }))
}

/// Computes the renumbering for the columns of the board.
#[must_use]
pub fn column_plan(columns: &[Column]) -> Vec<PositionChange<ColumnId>> {
    plan(
        columns
            .iter()
            .map(|column| (column.id(), column.position(), column.id())),
    )
}

/// Returns whether `positions` is exactly `{0, 1, ..., n-1}`.
#[must_use]
pub fn is_dense(positions: impl IntoIterator<Item = Position>) -> bool {
    let mut values: Vec<u32> = positions.into_iter().map(Position::value).collect();
    values.sort_unstable();
    values.into_iter().zip(0_u32..).all(|(actual, expected)| actual == expected)
}
