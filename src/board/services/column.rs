//! Column ordering within a project.

use super::{BoardServiceError, BoardServiceResult, cascade};
use crate::board::{
    domain::{Column, ColumnDirection, ColumnId, NewColumn, Position, ProjectId, TextField},
    ports::{BoardStore, EntityRef, RepositoryError},
};
use std::sync::Arc;

/// Keeps column indices of every project contiguous across create, move and
/// delete.
#[derive(Clone)]
pub struct ColumnOrderingService<S>
where
    S: BoardStore,
{
    store: Arc<S>,
}

impl<S> ColumnOrderingService<S>
where
    S: BoardStore,
{
    /// Creates a new column ordering service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Appends a column to the end of the project.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid name,
    /// [`BoardServiceError::DuplicateName`] when a sibling already uses the
    /// name, and a not-found repository error when the project is unknown.
    pub async fn create_column(
        &self,
        name: impl Into<String>,
        project_id: ProjectId,
    ) -> BoardServiceResult<Column> {
        let column_name = name.into();
        TextField::ColumnName.validate(&column_name)?;
        let column = self
            .store
            .write(move |tx| -> BoardServiceResult<Column> {
                let siblings = tx.list_columns(project_id)?;
                let index = Position::after_count(siblings.len())?;
                let new = NewColumn::new(column_name, index, project_id)?;
                if siblings.iter().any(|sibling| sibling.name() == new.name()) {
                    return Err(BoardServiceError::DuplicateName {
                        project_id,
                        name: new.name().to_owned(),
                    });
                }
                Ok(tx.create_column(new)?)
            })
            .await?;
        tracing::debug!(
            column_id = %column.id(),
            %project_id,
            index = column.index().get(),
            "column created"
        );
        Ok(column)
    }

    /// Swaps the column with its neighbour in `direction`.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the column is unknown or
    /// already sits at the boundary in `direction`.
    pub async fn move_column(
        &self,
        column_id: ColumnId,
        direction: ColumnDirection,
    ) -> BoardServiceResult<()> {
        let (from, to) = self
            .store
            .write(move |tx| -> BoardServiceResult<(Position, Position)> {
                let mut column = tx.column_by_id(column_id)?;
                let project_id = column.project_id();
                let from = column.index();
                let to = direction.neighbour_of(from).ok_or(RepositoryError::NotFound(
                    EntityRef::ColumnSlot {
                        project_id,
                        index: direction.target_index(from),
                    },
                ))?;
                let mut neighbour = tx.column_at(to, project_id)?;
                neighbour.set_index(from);
                column.set_index(to);
                tx.update_column(&neighbour)?;
                tx.update_column(&column)?;
                Ok((from, to))
            })
            .await?;
        tracing::debug!(
            %column_id,
            %direction,
            from = from.get(),
            to = to.get(),
            "column moved"
        );
        Ok(())
    }

    /// Deletes the column, moving its tasks into the adjacent column.
    ///
    /// Tasks go to the column on the left; when the first column is deleted
    /// they go to the column at index 2. They keep their relative order and
    /// land after the destination's existing tasks.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::LastColumn`] when the column is the only
    /// one in its project, and a not-found repository error when it is
    /// unknown.
    pub async fn delete_column(&self, column_id: ColumnId) -> BoardServiceResult<()> {
        let (destination, moved) = self
            .store
            .write(move |tx| -> BoardServiceResult<(ColumnId, usize)> {
                let column = tx.column_by_id(column_id)?;
                let project_id = column.project_id();
                if tx.list_columns(project_id)?.len() <= 1 {
                    return Err(BoardServiceError::LastColumn(project_id));
                }
                let destination_index = column
                    .index()
                    .previous()
                    .or_else(|| Position::FIRST.next())
                    .ok_or(RepositoryError::NotFound(EntityRef::column_slot(
                        project_id, None,
                    )))?;
                let destination = tx.column_at(destination_index, project_id)?;
                let moved = cascade::relocate_tasks(tx, column_id, destination.id())?;
                cascade::close_column_gap(tx, project_id, column.index())?;
                tx.delete_column(column_id)?;
                Ok((destination.id(), moved))
            })
            .await?;
        tracing::debug!(
            %column_id,
            destination_id = %destination,
            moved_tasks = moved,
            "column deleted"
        );
        Ok(())
    }

    /// Fetches a column.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the column is unknown.
    pub async fn get_column(&self, column_id: ColumnId) -> BoardServiceResult<Column> {
        self.store
            .read(move |tx| -> BoardServiceResult<Column> { Ok(tx.column_by_id(column_id)?) })
            .await
    }

    /// Lists the project's columns in index order.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the project is unknown.
    pub async fn list_columns(&self, project_id: ProjectId) -> BoardServiceResult<Vec<Column>> {
        self.store
            .read(move |tx| -> BoardServiceResult<Vec<Column>> {
                Ok(tx.list_columns(project_id)?)
            })
            .await
    }

    /// Renames a column without changing its position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Validation`] for an invalid name,
    /// [`BoardServiceError::DuplicateName`] when another column of the
    /// project already uses it, and a not-found repository error when the
    /// column is unknown.
    pub async fn rename_column(
        &self,
        column_id: ColumnId,
        name: impl Into<String>,
    ) -> BoardServiceResult<Column> {
        let column_name = name.into();
        TextField::ColumnName.validate(&column_name)?;
        self.store
            .write(move |tx| -> BoardServiceResult<Column> {
                let mut column = tx.column_by_id(column_id)?;
                column.rename(column_name)?;
                let project_id = column.project_id();
                let taken = tx.list_columns(project_id)?.iter().any(|sibling| {
                    sibling.id() != column_id && sibling.name() == column.name()
                });
                if taken {
                    return Err(BoardServiceError::DuplicateName {
                        project_id,
                        name: column.name().to_owned(),
                    });
                }
                Ok(tx.update_column(&column)?)
            })
            .await
    }
}
