//! Zero-based ordinal of a column within the board or a task within its
//! column.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dense, zero-based position within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// The first position in any scope.
    pub const ZERO: Self = Self(0);

    /// Creates a position from its ordinal value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the ordinal value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Converts the position into the signed integer used by the schema.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::PositionOutOfRange`] when the value exceeds
    /// `i32::MAX`.
    pub fn to_persisted(self) -> Result<i32, BoardDomainError> {
        i32::try_from(self.0).map_err(|_| BoardDomainError::PositionOutOfRange(i64::from(self.0)))
    }

    /// Reads a position from the signed integer used by the schema.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::PositionOutOfRange`] for negative values.
    pub fn from_persisted(value: i32) -> Result<Self, BoardDomainError> {
        u32::try_from(value)
            .map(Self)
            .map_err(|_| BoardDomainError::PositionOutOfRange(i64::from(value)))
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
