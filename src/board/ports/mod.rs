//! Port contracts for board persistence.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod repository;
pub mod store;

pub use repository::{
    BoardTransaction, ColumnRepository, CommentRepository, EntityRef, ProjectRepository,
    RepositoryError, RepositoryResult, TaskRepository,
};
pub use store::BoardStore;
