//! Rollback tests for multi-row board mutations.
//!
//! A fault-injecting repository lets a fixed number of writes through and
//! fails the next one. Whatever the first writes changed must vanish with
//! the failed transaction.

use crate::in_memory::helpers::{
    TestService, add_column, add_task, assert_dense, board, service_over, titles,
};
use async_trait::async_trait;
use kanban_board::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{Column, ColumnId, Position, Task, TaskId, Title},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult, BoardTransaction},
    services::{CreateTaskRequest, ErrorKind, MoveTaskRequest},
};
use rstest::{fixture, rstest};
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Repository that fails the first write once its write budget is spent.
#[derive(Debug, Clone)]
struct FaultyRepository {
    inner: InMemoryBoardRepository,
    budget: Arc<AtomicUsize>,
}

impl FaultyRepository {
    fn new() -> Self {
        Self {
            inner: InMemoryBoardRepository::new(),
            budget: Arc::new(AtomicUsize::new(usize::MAX)),
        }
    }

    /// Allows `writes` more writes, then fails every further one.
    fn arm(&self, writes: usize) {
        self.budget.store(writes, Ordering::SeqCst);
    }
}

#[async_trait]
impl BoardRepository for FaultyRepository {
    async fn transaction<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let budget = Arc::clone(&self.budget);
        self.inner
            .transaction(move |tx| {
                work(&mut FaultyTransaction {
                    inner: tx,
                    budget: &budget,
                })
            })
            .await
    }

    async fn snapshot<F, T>(&self, work: F) -> BoardRepositoryResult<T>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> BoardRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        self.inner.snapshot(work).await
    }

    async fn ping(&self) -> BoardRepositoryResult<()> {
        self.inner.ping().await
    }
}

struct FaultyTransaction<'a> {
    inner: &'a mut dyn BoardTransaction,
    budget: &'a AtomicUsize,
}

impl FaultyTransaction<'_> {
    fn spend(&self) -> BoardRepositoryResult<()> {
        self.budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .map(drop)
            .map_err(|_| {
                BoardRepositoryError::persistence(std::io::Error::other("injected write failure"))
            })
    }
}

impl BoardTransaction for FaultyTransaction<'_> {
    fn lock_board(&mut self) -> BoardRepositoryResult<()> {
        self.inner.lock_board()
    }

    fn lock_columns(&mut self, ids: &[ColumnId]) -> BoardRepositoryResult<Vec<ColumnId>> {
        self.inner.lock_columns(ids)
    }

    fn find_task(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.inner.find_task(id)
    }

    fn find_task_for_update(&mut self, id: TaskId) -> BoardRepositoryResult<Option<Task>> {
        self.inner.find_task_for_update(id)
    }

    fn find_column(&mut self, id: ColumnId) -> BoardRepositoryResult<Option<Column>> {
        self.inner.find_column(id)
    }

    fn count_columns(&mut self) -> BoardRepositoryResult<u32> {
        self.inner.count_columns()
    }

    fn count_tasks(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32> {
        self.inner.count_tasks(column_id)
    }

    fn columns(&mut self) -> BoardRepositoryResult<Vec<Column>> {
        self.inner.columns()
    }

    fn tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<Vec<Task>> {
        self.inner.tasks_in_column(column_id)
    }

    fn all_tasks(&mut self) -> BoardRepositoryResult<Vec<Task>> {
        self.inner.all_tasks()
    }

    fn insert_column(&mut self, column: &Column) -> BoardRepositoryResult<()> {
        self.spend()?;
        self.inner.insert_column(column)
    }

    fn insert_task(&mut self, task: &Task) -> BoardRepositoryResult<()> {
        self.spend()?;
        self.inner.insert_task(task)
    }

    fn update_column_title(&mut self, id: ColumnId, title: &Title) -> BoardRepositoryResult<bool> {
        self.spend()?;
        self.inner.update_column_title(id, title)
    }

    fn update_task_content(
        &mut self,
        id: TaskId,
        title: &Title,
        description: &str,
    ) -> BoardRepositoryResult<bool> {
        self.spend()?;
        self.inner.update_task_content(id, title, description)
    }

    fn set_column_position(
        &mut self,
        id: ColumnId,
        position: Position,
    ) -> BoardRepositoryResult<()> {
        self.spend()?;
        self.inner.set_column_position(id, position)
    }

    fn set_task_position(&mut self, id: TaskId, position: Position) -> BoardRepositoryResult<()> {
        self.spend()?;
        self.inner.set_task_position(id, position)
    }

    fn relocate_task(
        &mut self,
        id: TaskId,
        column_id: ColumnId,
        position: Position,
    ) -> BoardRepositoryResult<()> {
        self.spend()?;
        self.inner.relocate_task(id, column_id, position)
    }

    fn delete_task(&mut self, id: TaskId) -> BoardRepositoryResult<bool> {
        self.spend()?;
        self.inner.delete_task(id)
    }

    fn delete_tasks_in_column(&mut self, column_id: ColumnId) -> BoardRepositoryResult<u32> {
        self.spend()?;
        self.inner.delete_tasks_in_column(column_id)
    }

    fn delete_column(&mut self, id: ColumnId) -> BoardRepositoryResult<bool> {
        self.spend()?;
        self.inner.delete_column(id)
    }
}

struct Harness {
    repository: FaultyRepository,
    service: TestService<FaultyRepository>,
}

#[fixture]
fn harness() -> Harness {
    let repository = FaultyRepository::new();
    let service = service_over(repository.clone());
    Harness {
        repository,
        service,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn move_rolls_back_when_source_resequencing_fails(harness: Harness) {
    let Harness {
        repository,
        service,
    } = harness;
    let source = add_column(&service, "Source").await;
    let target = add_column(&service, "Target").await;
    let moving = add_task(&service, source, "a").await;
    add_task(&service, source, "b").await;
    add_task(&service, source, "c").await;
    let before = board(&service).await;

    repository.arm(1);
    let err = service
        .move_task(MoveTaskRequest::new(moving, source, target))
        .await
        .expect_err("move should fail");

    assert_eq!(err.kind(), ErrorKind::Storage);
    repository.arm(usize::MAX);
    let after = board(&service).await;
    assert_eq!(after, before);
    assert_eq!(titles(&after, source), vec!["a", "b", "c"]);
    assert!(titles(&after, target).is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_delete_rolls_back_when_resequencing_fails(harness: Harness) {
    let Harness {
        repository,
        service,
    } = harness;
    let column = add_column(&service, "Only").await;
    let doomed = add_task(&service, column, "first").await;
    add_task(&service, column, "second").await;
    let before = board(&service).await;

    repository.arm(1);
    let err = service
        .delete_task(doomed)
        .await
        .expect_err("delete should fail");

    assert_eq!(err.kind(), ErrorKind::Storage);
    repository.arm(usize::MAX);
    assert_eq!(board(&service).await, before);
}

#[rstest]
#[case::before_tasks_removed(0)]
#[case::before_column_removed(1)]
#[case::before_columns_resequenced(2)]
#[tokio::test(flavor = "multi_thread")]
async fn column_delete_is_all_or_nothing(harness: Harness, #[case] writes: usize) {
    let Harness {
        repository,
        service,
    } = harness;
    let first = add_column(&service, "First").await;
    add_column(&service, "Second").await;
    add_column(&service, "Third").await;
    add_task(&service, first, "kept").await;
    let before = board(&service).await;

    repository.arm(writes);
    let err = service
        .delete_column(first)
        .await
        .expect_err("delete should fail");

    assert_eq!(err.kind(), ErrorKind::Storage);
    repository.arm(usize::MAX);
    let after = board(&service).await;
    assert_eq!(after, before);
    assert_dense(&after);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_insert_leaves_no_partial_task(harness: Harness) {
    let Harness {
        repository,
        service,
    } = harness;
    let column = add_column(&service, "Only").await;
    add_task(&service, column, "existing").await;

    repository.arm(0);
    let err = service
        .create_task(CreateTaskRequest::new(column, "lost"))
        .await
        .expect_err("creation should fail");

    assert_eq!(err.kind(), ErrorKind::Storage);
    repository.arm(usize::MAX);
    assert_eq!(titles(&board(&service).await, column), vec!["existing"]);
    let next = add_task(&service, column, "next").await;
    let tasks = service.list_tasks().await.expect("listing should succeed");
    let position = tasks
        .iter()
        .find(|task| task.id() == next)
        .map(Task::position);
    assert_eq!(position, Some(Position::new(1)));
}
