//! Move directions for columns and tasks.

use super::{ParseDirectionError, Position};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Horizontal move across the columns of a project.
///
/// Used both for reordering columns and for relocating a task into the
/// adjacent column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnDirection {
    /// Towards index 1.
    Left,
    /// Towards the last column.
    Right,
}

impl ColumnDirection {
    /// Returns the neighbouring slot in this direction, or `None` when it
    /// falls before the first slot or past the last representable one.
    #[must_use]
    pub const fn neighbour_of(self, from: Position) -> Option<Position> {
        match self {
            Self::Left => from.previous(),
            Self::Right => from.next(),
        }
    }

    /// Returns the raw index of the slot a move from `from` targets, which
    /// may lie outside the representable range: `0` before the first slot,
    /// or one past `u32::MAX`.
    #[must_use]
    pub fn target_index(self, from: Position) -> u64 {
        let current = u64::from(from.get());
        match self {
            Self::Left => current - 1,
            Self::Right => current + 1,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl TryFrom<&str> for ColumnDirection {
    type Error = ParseDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

impl fmt::Display for ColumnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Vertical move of a task within its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskDirection {
    /// Towards index 1.
    Up,
    /// Towards the bottom of the column.
    Down,
}

impl TaskDirection {
    /// Returns the neighbouring slot in this direction, or `None` when it
    /// falls before the first slot or past the last representable one.
    #[must_use]
    pub const fn neighbour_of(self, from: Position) -> Option<Position> {
        match self {
            Self::Up => from.previous(),
            Self::Down => from.next(),
        }
    }

    /// Returns the raw index of the slot a move from `from` targets, which
    /// may lie outside the representable range: `0` before the first slot,
    /// or one past `u32::MAX`.
    #[must_use]
    pub fn target_index(self, from: Position) -> u64 {
        let current = u64::from(from.get());
        match self {
            Self::Up => current - 1,
            Self::Down => current + 1,
        }
    }

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

impl TryFrom<&str> for TaskDirection {
    type Error = ParseDirectionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(ParseDirectionError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
