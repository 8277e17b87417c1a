//! Board persistence and position consistency.
//!
//! A board is an ordered set of columns, each owning an ordered set of
//! tasks. Positions within each scope form a dense, zero-based sequence that
//! every mutation preserves. The module follows hexagonal architecture:
//!
//! - Domain types and the pure renumbering plan in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Allocation, resequencing, moves and the CRUD surface in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
