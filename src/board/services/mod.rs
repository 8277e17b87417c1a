//! Application services for board orchestration.
//!
//! [`positions`] holds the allocator, resequencer and move coordinator;
//! [`operations`] the transactional body of every other mutation; and
//! [`BoardService`] the validated surface used by transports.

mod board;
pub mod operations;
pub mod positions;

pub use board::{
    BoardService, BoardServiceError, BoardServiceResult, CreateTaskRequest, ErrorKind,
    MoveTaskRequest,
};
