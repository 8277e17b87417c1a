//! `PostgreSQL` adapters for board persistence.

mod models;
mod repository;
mod schema;

pub use repository::{BOARD_SCHEMA_SQL, BoardPgPool, PostgresBoardRepository};
