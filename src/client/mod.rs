//! Client board store: an optimistic mirror of the server board.
//!
//! The [`BoardStore`] owns a [`BoardState`] updated through
//! [`BoardState::reduce`] and talks to the server through the [`BoardApi`]
//! port. [`HttpBoardApi`] is the `reqwest` adapter for that port.

mod api;
mod error;
mod http;
mod state;
mod store;
pub mod view;

#[cfg(test)]
mod tests;

#[cfg(test)]
pub use api::MockBoardApi;
pub use api::BoardApi;
pub use error::{ClientError, ClientResult};
pub use http::HttpBoardApi;
pub use state::{BoardAction, BoardState};
pub use store::BoardStore;
