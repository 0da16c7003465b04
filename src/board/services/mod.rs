//! Application services maintaining board ordering.
//!
//! Every service method runs as one unit of work on the injected
//! [`BoardStore`](crate::board::ports::BoardStore): it either fully applies or
//! leaves the store untouched.

pub mod cascade;
mod column;
mod comment;
mod error;
mod project;
mod task;

pub use column::ColumnOrderingService;
pub use comment::CommentService;
pub use error::{BoardServiceError, BoardServiceResult};
pub use project::ProjectService;
pub use task::TaskOrderingService;
