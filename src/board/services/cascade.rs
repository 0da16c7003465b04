//! Cascading renumbering and removal steps shared by the services.
//!
//! Each function runs against the transaction of the caller's unit of work,
//! so a failure part-way through is discarded together with the rest of the
//! operation. Parents are passed by identity; entities never point back at
//! their children.

use super::BoardServiceResult;
use crate::board::{
    domain::{ColumnId, Position, ProjectId, TaskId},
    ports::{ColumnRepository, CommentRepository, TaskRepository},
};

/// Shifts every column of `project_id` after `removed` one slot left.
///
/// # Errors
///
/// Propagates repository failures.
pub fn close_column_gap<R>(
    repo: &mut R,
    project_id: ProjectId,
    removed: Position,
) -> BoardServiceResult<()>
where
    R: ColumnRepository + ?Sized,
{
    for mut column in repo.list_columns(project_id)? {
        if column.index() <= removed {
            continue;
        }
        if let Some(index) = column.index().previous() {
            column.set_index(index);
            repo.update_column(&column)?;
        }
    }
    Ok(())
}

/// Shifts every task of `column_id` after `removed` one slot up.
///
/// # Errors
///
/// Propagates repository failures.
pub fn close_task_gap<R>(
    repo: &mut R,
    column_id: ColumnId,
    removed: Position,
) -> BoardServiceResult<()>
where
    R: TaskRepository + ?Sized,
{
    for mut task in repo.list_tasks(column_id)? {
        if task.index() <= removed {
            continue;
        }
        if let Some(index) = task.index().previous() {
            task.set_index(index);
            repo.update_task(&task)?;
        }
    }
    Ok(())
}

/// Appends every task of `source` to `destination`, keeping their relative
/// order, and returns how many tasks moved.
///
/// # Errors
///
/// Propagates repository failures, or a validation error when the
/// destination runs out of positions.
pub fn relocate_tasks<R>(
    repo: &mut R,
    source: ColumnId,
    destination: ColumnId,
) -> BoardServiceResult<usize>
where
    R: TaskRepository + ?Sized,
{
    let occupied = repo.list_tasks(destination)?.len();
    let moving = repo.list_tasks(source)?;
    let moved = moving.len();
    for (offset, mut task) in moving.into_iter().enumerate() {
        task.relocate(destination, Position::after_count(occupied + offset)?);
        repo.update_task(&task)?;
    }
    Ok(moved)
}

/// Deletes every comment attached to `task_id`.
///
/// # Errors
///
/// Propagates repository failures.
pub fn purge_task_comments<R>(repo: &mut R, task_id: TaskId) -> BoardServiceResult<usize>
where
    R: CommentRepository + ?Sized,
{
    let comments = repo.list_comments(task_id)?;
    let purged = comments.len();
    for comment in comments {
        repo.delete_comment(comment.id())?;
    }
    Ok(purged)
}

/// Deletes a column together with its tasks and their comments.
///
/// Sibling columns are not renumbered; callers that keep the project alive
/// close the gap themselves.
///
/// # Errors
///
/// Propagates repository failures.
pub fn purge_column<R>(repo: &mut R, column_id: ColumnId) -> BoardServiceResult<()>
where
    R: ColumnRepository + TaskRepository + CommentRepository + ?Sized,
{
    for task in repo.list_tasks(column_id)? {
        purge_task_comments(repo, task.id())?;
        repo.delete_task(task.id())?;
    }
    repo.delete_column(column_id)?;
    Ok(())
}
