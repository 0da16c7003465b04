//! Identifier newtypes for board entities.
//!
//! Each entity gets its own UUID wrapper so a column identifier can never be
//! passed where a task identifier is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! board_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[doc = concat!("Creates a new random ", $label, " identifier.")]
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            #[doc = concat!("Creates a ", $label, " identifier from an existing UUID.")]
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the wrapped UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl AsRef<Uuid> for $name {
            fn as_ref(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

board_id!(
    /// Unique identifier for a project board.
    ///
    /// # Examples
    ///
    /// ```
    /// use tasker::board::domain::ProjectId;
    ///
    /// let id = ProjectId::new();
    /// assert!(!id.as_ref().is_nil());
    /// ```
    ProjectId,
    "project"
);

board_id!(
    /// Unique identifier for a column within a project.
    ColumnId,
    "column"
);

board_id!(
    /// Unique identifier for a task within a column.
    TaskId,
    "task"
);

board_id!(
    /// Unique identifier for a comment attached to a task.
    CommentId,
    "comment"
);
