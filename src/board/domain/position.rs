//! One-based ordinal positions of board entities among their siblings.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 1-based `index` of a column within its project or a task within its
/// column.
///
/// # Examples
///
/// ```
/// use tasker::board::domain::Position;
///
/// let second = Position::after_count(1).expect("one sibling fits");
/// assert_eq!(second.get(), 2);
/// assert_eq!(second.previous(), Some(Position::FIRST));
/// assert_eq!(Position::FIRST.previous(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Position(u32);

impl Position {
    /// The leading slot of every sibling group.
    pub const FIRST: Self = Self(1);

    /// Creates a validated position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidPosition`] when `value` is zero or
    /// does not fit in `u32`.
    pub fn new(value: u64) -> Result<Self, BoardDomainError> {
        match u32::try_from(value) {
            Ok(raw) if raw >= 1 => Ok(Self(raw)),
            _ => Err(BoardDomainError::InvalidPosition(value)),
        }
    }

    /// Returns the slot that follows `count` existing siblings.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidPosition`] if the sibling group is
    /// already at capacity.
    pub fn after_count(count: usize) -> Result<Self, BoardDomainError> {
        let siblings = u64::try_from(count).unwrap_or(u64::MAX);
        Self::new(siblings.saturating_add(1))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns the slot immediately before this one, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        if self.0 > 1 { Some(Self(self.0 - 1)) } else { None }
    }

    /// Returns the slot immediately after this one, if representable.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }
}

impl TryFrom<u64> for Position {
    type Error = BoardDomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Position> for u64 {
    fn from(position: Position) -> Self {
        Self::from(position.0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
