//! Kanban board service with a position-consistency model.
//!
//! Columns are ordered left to right and tasks top to bottom within their
//! column. Positions are dense zero-based integers, and every mutation that
//! can disturb them runs inside one datastore transaction that restores the
//! ordering before it commits.
//!
//! # Architecture
//!
//! The board follows hexagonal architecture principles:
//!
//! - **Domain**: identifiers, titles, positions and the resequencing plan
//! - **Ports**: the transactional repository contract
//! - **Adapters**: in-memory and `PostgreSQL` implementations of the ports
//! - **Services**: allocation, resequencing, moves and the CRUD surface
//!
//! # Modules
//!
//! - [`board`]: server-side board model and consistency rules
//! - [`http`]: REST routes under `/api`
//! - [`client`]: optimistic client-side board store and view interface
//! - [`config`]: layered server configuration
//! - [`telemetry`]: tracing subscriber setup

pub mod board;
pub mod client;
pub mod config;
pub mod http;
pub mod telemetry;
