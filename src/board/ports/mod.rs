//! Port contracts for board persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;
pub mod transaction;

pub use repository::{BoardRepository, BoardRepositoryError, BoardRepositoryResult};
pub use transaction::BoardTransaction;

#[cfg(test)]
pub use transaction::MockBoardTransaction;
