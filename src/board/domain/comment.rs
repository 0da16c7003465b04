//! Comment entity attached to a task.
//!
//! Comments carry no ordering invariant; they are presented newest first.

use super::{BoardDomainError, CommentId, TaskId, TextField};
use chrono::{DateTime, SubsecRound, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Timestamps keep microseconds, the precision `TIMESTAMPTZ` stores.
const STORED_SUBSEC_DIGITS: u16 = 6;

/// Validated input for creating a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    text: String,
    created_at: DateTime<Utc>,
    task_id: TaskId,
}

impl NewComment {
    /// Validates the comment text and stamps it with the clock's current time,
    /// truncated to whole microseconds.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the text is empty or longer than 5000
    /// characters.
    pub fn new(
        text: impl Into<String>,
        task_id: TaskId,
        clock: &impl Clock,
    ) -> Result<Self, BoardDomainError> {
        let raw_text = text.into();
        TextField::CommentText.validate(&raw_text)?;
        Ok(Self {
            text: raw_text,
            created_at: clock.utc().trunc_subsecs(STORED_SUBSEC_DIGITS),
            task_id,
        })
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// A timestamped note on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: CommentId,
    text: String,
    created_at: DateTime<Utc>,
    task_id: TaskId,
}

impl Comment {
    /// Builds a stored comment from creation input and its assigned identity.
    #[must_use]
    pub fn from_new(id: CommentId, new: NewComment) -> Self {
        Self {
            id,
            text: new.text,
            created_at: new.created_at,
            task_id: new.task_id,
        }
    }

    /// Reconstructs a comment from persisted storage without validation.
    #[must_use]
    pub const fn from_persisted(
        id: CommentId,
        text: String,
        created_at: DateTime<Utc>,
        task_id: TaskId,
    ) -> Self {
        Self {
            id,
            text,
            created_at,
            task_id,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> CommentId {
        self.id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the task the comment belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Replaces the comment text, keeping the original timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError`] when the text is empty or longer than 5000
    /// characters.
    pub fn edit_text(&mut self, text: impl Into<String>) -> Result<(), BoardDomainError> {
        let raw_text = text.into();
        TextField::CommentText.validate(&raw_text)?;
        self.text = raw_text;
        Ok(())
    }
}
