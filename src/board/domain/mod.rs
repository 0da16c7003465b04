//! Domain model for project boards.
//!
//! A project owns an ordered sequence of columns and each column owns an
//! ordered sequence of tasks. Positions are 1-based and, for every parent,
//! form the contiguous range `1..=n`. Infrastructure concerns stay outside
//! the domain boundary.

mod column;
mod comment;
mod direction;
mod error;
mod ids;
mod position;
mod project;
mod task;
mod text;

pub use column::{Column, NewColumn};
pub use comment::{Comment, NewComment};
pub use direction::{ColumnDirection, TaskDirection};
pub use error::{BoardDomainError, ParseDirectionError};
pub use ids::{ColumnId, CommentId, ProjectId, TaskId};
pub use position::Position;
pub use project::{DEFAULT_COLUMN_NAME, NewProject, Project};
pub use task::{NewTask, PersistedTaskData, Task};
pub use text::TextField;
