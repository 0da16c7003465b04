//! Task ordering within and across columns.

use super::{BoardServiceResult, cascade};
use crate::board::{
    domain::{
        ColumnDirection, ColumnId, NewTask, Position, Task, TaskDirection, TaskId, TextField,
    },
    ports::{BoardStore, EntityRef, RepositoryError},
};
use std::sync::Arc;

/// Keeps task indices of every column contiguous across create, move and
/// delete, including moves into an adjacent column.
#[derive(Clone)]
pub struct TaskOrderingService<S>
where
    S: BoardStore,
{
    store: Arc<S>,
}

impl<S> TaskOrderingService<S>
where
    S: BoardStore,
{
    /// Creates a new task ordering service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Appends a task to the end of the column.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Validation`] for an invalid name
    /// or description, and a not-found repository error when the column is
    /// unknown.
    pub async fn create_task(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        column_id: ColumnId,
    ) -> BoardServiceResult<Task> {
        let task_name = name.into();
        let task_description = description.into();
        TextField::TaskName.validate(&task_name)?;
        TextField::TaskDescription.validate(&task_description)?;
        let task = self
            .store
            .write(move |tx| -> BoardServiceResult<Task> {
                let index = Position::after_count(tx.list_tasks(column_id)?.len())?;
                let new = NewTask::new(task_name, task_description, index, column_id)?;
                Ok(tx.create_task(new)?)
            })
            .await?;
        tracing::debug!(
            task_id = %task.id(),
            %column_id,
            index = task.index().get(),
            "task created"
        );
        Ok(task)
    }

    /// Swaps the task with its neighbour in `direction` inside the same
    /// column.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task is unknown or
    /// already sits at the boundary in `direction`.
    pub async fn move_task_within_column(
        &self,
        task_id: TaskId,
        direction: TaskDirection,
    ) -> BoardServiceResult<()> {
        let (from, to) = self
            .store
            .write(move |tx| -> BoardServiceResult<(Position, Position)> {
                let mut task = tx.task_by_id(task_id)?;
                let column_id = task.column_id();
                let from = task.index();
                let to = direction.neighbour_of(from).ok_or(RepositoryError::NotFound(
                    EntityRef::TaskSlot {
                        column_id,
                        index: direction.target_index(from),
                    },
                ))?;
                let mut neighbour = tx.task_at(to, column_id)?;
                neighbour.set_index(from);
                task.set_index(to);
                tx.update_task(&neighbour)?;
                tx.update_task(&task)?;
                Ok((from, to))
            })
            .await?;
        tracing::debug!(
            %task_id,
            %direction,
            from = from.get(),
            to = to.get(),
            "task moved within column"
        );
        Ok(())
    }

    /// Moves the task to the end of the adjacent column in `direction`.
    ///
    /// Tasks that followed it in the source column move up one slot.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task is unknown or its
    /// column has no neighbour in `direction`.
    pub async fn move_task_across_columns(
        &self,
        task_id: TaskId,
        direction: ColumnDirection,
    ) -> BoardServiceResult<()> {
        let (source, destination, index) = self
            .store
            .write(move |tx| -> BoardServiceResult<(ColumnId, ColumnId, Position)> {
                let mut task = tx.task_by_id(task_id)?;
                let source = tx.column_by_id(task.column_id())?;
                let project_id = source.project_id();
                let target = direction.neighbour_of(source.index()).ok_or(
                    RepositoryError::NotFound(EntityRef::ColumnSlot {
                        project_id,
                        index: direction.target_index(source.index()),
                    }),
                )?;
                let destination = tx.column_at(target, project_id)?;
                let index = Position::after_count(tx.list_tasks(destination.id())?.len())?;
                cascade::close_task_gap(tx, source.id(), task.index())?;
                task.relocate(destination.id(), index);
                tx.update_task(&task)?;
                Ok((source.id(), destination.id(), index))
            })
            .await?;
        tracing::debug!(
            %task_id,
            %direction,
            source_id = %source,
            destination_id = %destination,
            index = index.get(),
            "task moved across columns"
        );
        Ok(())
    }

    /// Deletes the task and its comments, closing the gap it leaves.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task is unknown.
    pub async fn delete_task(&self, task_id: TaskId) -> BoardServiceResult<()> {
        let purged = self
            .store
            .write(move |tx| -> BoardServiceResult<usize> {
                let task = tx.task_by_id(task_id)?;
                cascade::close_task_gap(tx, task.column_id(), task.index())?;
                let purged = cascade::purge_task_comments(tx, task_id)?;
                tx.delete_task(task_id)?;
                Ok(purged)
            })
            .await?;
        tracing::debug!(%task_id, purged_comments = purged, "task deleted");
        Ok(())
    }

    /// Fetches a task.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the task is unknown.
    pub async fn get_task(&self, task_id: TaskId) -> BoardServiceResult<Task> {
        self.store
            .read(move |tx| -> BoardServiceResult<Task> { Ok(tx.task_by_id(task_id)?) })
            .await
    }

    /// Lists the column's tasks in index order.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the column is unknown.
    pub async fn list_tasks(&self, column_id: ColumnId) -> BoardServiceResult<Vec<Task>> {
        self.store
            .read(move |tx| -> BoardServiceResult<Vec<Task>> { Ok(tx.list_tasks(column_id)?) })
            .await
    }

    /// Replaces the task's name and description, leaving its position alone.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Validation`] for invalid fields,
    /// and a not-found repository error when the task is unknown.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> BoardServiceResult<Task> {
        let task_name = name.into();
        let task_description = description.into();
        TextField::TaskName.validate(&task_name)?;
        TextField::TaskDescription.validate(&task_description)?;
        self.store
            .write(move |tx| -> BoardServiceResult<Task> {
                let mut task = tx.task_by_id(task_id)?;
                task.edit(task_name, task_description)?;
                Ok(tx.update_task(&task)?)
            })
            .await
    }
}
