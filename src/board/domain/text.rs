//! Length and emptiness rules for free-text fields.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-text fields subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    /// Project display name.
    ProjectName,
    /// Project description.
    ProjectDescription,
    /// Column display name.
    ColumnName,
    /// Task display name.
    TaskName,
    /// Task description.
    TaskDescription,
    /// Comment body.
    CommentText,
}

impl TextField {
    /// Returns the maximum number of characters accepted for the field.
    #[must_use]
    pub const fn max_chars(self) -> usize {
        match self {
            Self::ColumnName => 255,
            Self::ProjectName | Self::TaskName => 500,
            Self::ProjectDescription => 1000,
            Self::TaskDescription | Self::CommentText => 5000,
        }
    }

    /// Returns whether an empty value is rejected.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::ProjectDescription | Self::TaskDescription)
    }

    /// Returns the human-readable field label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProjectName | Self::ColumnName | Self::TaskName => "name",
            Self::ProjectDescription | Self::TaskDescription => "description",
            Self::CommentText => "text",
        }
    }

    /// Checks `value` against the field's rules.
    ///
    /// Length is counted in Unicode scalar values, not bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::Required`] for an empty required value and
    /// [`BoardDomainError::TooLong`] when the limit is exceeded.
    pub fn validate(self, value: &str) -> Result<(), BoardDomainError> {
        if value.is_empty() && self.is_required() {
            return Err(BoardDomainError::Required(self));
        }

        let actual = value.chars().count();
        let max = self.max_chars();
        if actual > max {
            return Err(BoardDomainError::TooLong {
                field: self,
                max,
                actual,
            });
        }
        Ok(())
    }
}

impl fmt::Display for TextField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
