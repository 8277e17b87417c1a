//! Shared world state for board position BDD scenarios.

use std::{collections::HashMap, sync::Arc};

use kanban_board::board::{
    adapters::memory::InMemoryBoardRepository,
    domain::{BoardColumn, ColumnId, TaskId, TaskPlacement},
    services::{BoardService, BoardServiceError},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Service type used by the BDD world.
pub type TestBoardService = BoardService<InMemoryBoardRepository, DefaultClock>;

/// Scenario world for board position behaviour tests.
pub struct BoardWorld {
    /// The board service under test.
    pub service: TestBoardService,
    /// Column ids keyed by title.
    pub columns: HashMap<String, ColumnId>,
    /// Task ids keyed by title.
    pub tasks: HashMap<String, TaskId>,
    /// Result of the last move attempt.
    pub last_move: Option<Result<TaskPlacement, BoardServiceError>>,
}

impl BoardWorld {
    /// Creates a world over an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: BoardService::new(
                Arc::new(InMemoryBoardRepository::new()),
                Arc::new(DefaultClock),
            ),
            columns: HashMap::new(),
            tasks: HashMap::new(),
            last_move: None,
        }
    }

    /// Resolves a column created earlier in the scenario.
    pub fn column(&self, title: &str) -> Result<ColumnId, eyre::Report> {
        self.columns
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no column titled '{title}' in scenario world"))
    }

    /// Resolves a task created earlier in the scenario.
    pub fn task(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled '{title}' in scenario world"))
    }

    /// Reads the current board.
    pub fn board(&self) -> Result<Vec<BoardColumn>, eyre::Report> {
        run_async(self.service.list_columns_with_tasks())
            .map_err(|err| eyre::eyre!("board listing failed: {err}"))
    }
}

impl Default for BoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardWorld {
    BoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated step argument into trimmed titles.
pub fn title_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect()
}
