//! Error types for the client board store.

use crate::board::domain::BoardDomainError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors raised by the board API client and store.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Input was rejected before any request was issued.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// The request could not be sent or the connection failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message from the `{error}` body, or the status text.
        message: String,
    },

    /// A success response body could not be decoded.
    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// Returns the HTTP status when the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Validation(_) | Self::Http(_) | Self::Decode(_) => None,
        }
    }
}
