//! Repository contract for board persistence.
//!
//! One trait per entity type. Reads borrow the transaction immutably and
//! writes mutably, so a shared-access unit of work can only read. Every call
//! is individually atomic; grouping calls into an atomic operation is the job
//! of [`BoardStore`](super::BoardStore).

use crate::board::domain::{
    Column, ColumnId, Comment, CommentId, NewColumn, NewComment, NewProject, NewTask, Position,
    Project, ProjectId, Task, TaskId,
};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Project persistence contract.
pub trait ProjectRepository {
    /// Returns every project in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the backing store fails.
    fn list_projects(&self) -> RepositoryResult<Vec<Project>>;

    /// Finds a project by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the project does not exist.
    fn project_by_id(&self, id: ProjectId) -> RepositoryResult<Project>;

    /// Stores a new project and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the backing store fails.
    fn create_project(&mut self, project: NewProject) -> RepositoryResult<Project>;

    /// Overwrites an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the project does not exist.
    fn update_project(&mut self, project: &Project) -> RepositoryResult<Project>;

    /// Deletes a project record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the project does not exist
    /// or [`RepositoryError::ConstraintViolation`] while columns still
    /// reference it.
    fn delete_project(&mut self, id: ProjectId) -> RepositoryResult<()>;
}

/// Column persistence contract.
pub trait ColumnRepository {
    /// Returns the columns of a project.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the project does not exist.
    fn list_columns(&self, project_id: ProjectId) -> RepositoryResult<Vec<Column>>;

    /// Finds a column by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the column does not exist.
    fn column_by_id(&self, id: ColumnId) -> RepositoryResult<Column>;

    /// Finds the column occupying `index` within a project.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the slot is empty.
    fn column_at(&self, index: Position, project_id: ProjectId) -> RepositoryResult<Column>;

    /// Stores a new column and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ConstraintViolation`] when the project does
    /// not exist.
    fn create_column(&mut self, column: NewColumn) -> RepositoryResult<Column>;

    /// Overwrites an existing column.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the column does not exist or
    /// [`RepositoryError::ConstraintViolation`] when its project does not.
    fn update_column(&mut self, column: &Column) -> RepositoryResult<Column>;

    /// Deletes a column record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the column does not exist
    /// or [`RepositoryError::ConstraintViolation`] while tasks still
    /// reference it.
    fn delete_column(&mut self, id: ColumnId) -> RepositoryResult<()>;
}

/// Task persistence contract.
pub trait TaskRepository {
    /// Returns the tasks of a column.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the column does not exist.
    fn list_tasks(&self, column_id: ColumnId) -> RepositoryResult<Vec<Task>>;

    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task does not exist.
    fn task_by_id(&self, id: TaskId) -> RepositoryResult<Task>;

    /// Finds the task occupying `index` within a column.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the slot is empty.
    fn task_at(&self, index: Position, column_id: ColumnId) -> RepositoryResult<Task>;

    /// Stores a new task and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ConstraintViolation`] when the column does
    /// not exist.
    fn create_task(&mut self, task: NewTask) -> RepositoryResult<Task>;

    /// Overwrites an existing task, including its column.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task does not exist or
    /// [`RepositoryError::ConstraintViolation`] when its column does not.
    fn update_task(&mut self, task: &Task) -> RepositoryResult<Task>;

    /// Deletes a task record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task does not exist or
    /// [`RepositoryError::ConstraintViolation`] while comments still
    /// reference it.
    fn delete_task(&mut self, id: TaskId) -> RepositoryResult<()>;
}

/// Comment persistence contract.
pub trait CommentRepository {
    /// Returns the comments of a task in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the task does not exist.
    fn list_comments(&self, task_id: TaskId) -> RepositoryResult<Vec<Comment>>;

    /// Finds a comment by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the comment does not exist.
    fn comment_by_id(&self, id: CommentId) -> RepositoryResult<Comment>;

    /// Stores a new comment and assigns its identity.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::ConstraintViolation`] when the task does not
    /// exist.
    fn create_comment(&mut self, comment: NewComment) -> RepositoryResult<Comment>;

    /// Overwrites an existing comment.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the comment does not exist or
    /// [`RepositoryError::ConstraintViolation`] when its task does not.
    fn update_comment(&mut self, comment: &Comment) -> RepositoryResult<Comment>;

    /// Deletes a comment record.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] when the comment does not exist.
    fn delete_comment(&mut self, id: CommentId) -> RepositoryResult<()>;
}

/// The full repository surface handed to a unit of work.
pub trait BoardTransaction:
    ProjectRepository + ColumnRepository + TaskRepository + CommentRepository
{
}

impl<T> BoardTransaction for T where
    T: ProjectRepository + ColumnRepository + TaskRepository + CommentRepository + ?Sized
{
}

/// Identifies the record a repository error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityRef {
    /// A project by identity.
    Project(ProjectId),
    /// A column by identity.
    Column(ColumnId),
    /// A task by identity.
    Task(TaskId),
    /// A comment by identity.
    Comment(CommentId),
    /// The column slot `index` of a project.
    ColumnSlot {
        /// Project the slot belongs to.
        project_id: ProjectId,
        /// Requested 1-based index; `0` denotes the slot before the first.
        index: u64,
    },
    /// The task slot `index` of a column.
    TaskSlot {
        /// Column the slot belongs to.
        column_id: ColumnId,
        /// Requested 1-based index; `0` denotes the slot before the first.
        index: u64,
    },
}

impl EntityRef {
    /// Refers to a column slot of a project; `None` stands for the slot
    /// before the first column.
    #[must_use]
    pub fn column_slot(project_id: ProjectId, index: Option<Position>) -> Self {
        Self::ColumnSlot {
            project_id,
            index: index.map_or(0, u64::from),
        }
    }

    /// Refers to a task slot of a column; `None` stands for the slot before
    /// the first task.
    #[must_use]
    pub fn task_slot(column_id: ColumnId, index: Option<Position>) -> Self {
        Self::TaskSlot {
            column_id,
            index: index.map_or(0, u64::from),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project(id) => write!(f, "project {id}"),
            Self::Column(id) => write!(f, "column {id}"),
            Self::Task(id) => write!(f, "task {id}"),
            Self::Comment(id) => write!(f, "comment {id}"),
            Self::ColumnSlot { project_id, index } => {
                write!(f, "column at index {index} of project {project_id}")
            }
            Self::TaskSlot { column_id, index } => {
                write!(f, "task at index {index} of column {column_id}")
            }
        }
    }
}

/// Errors returned by repository implementations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// The referenced record, or the neighbour at the expected index, does
    /// not exist.
    #[error("{0} not found")]
    NotFound(EntityRef),

    /// A foreign reference does not resolve, or a record is still
    /// referenced by children when it is deleted.
    #[error("constraint violation on {0}")]
    ConstraintViolation(EntityRef),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
