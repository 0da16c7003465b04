//! Errors shared by the board services.

use crate::board::{
    domain::{BoardDomainError, ProjectId},
    ports::RepositoryError,
};
use thiserror::Error;

/// Service-level errors for board operations.
#[derive(Debug, Clone, Error)]
pub enum BoardServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] BoardDomainError),

    /// A sibling column already carries this name.
    #[error("project {project_id} already has a column named '{name}'")]
    DuplicateName {
        /// Project the name collides in.
        project_id: ProjectId,
        /// Rejected column name.
        name: String,
    },

    /// The column is the only one its project has left.
    #[error("cannot delete the last column of project {0}")]
    LastColumn(ProjectId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl BoardServiceError {
    /// Returns `true` when the error reports a missing record or an empty
    /// neighbour slot.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Repository(RepositoryError::NotFound(_)))
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
