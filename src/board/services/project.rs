//! Project lifecycle, including the mandatory first column.

use super::{BoardServiceResult, cascade};
use crate::board::{
    domain::{DEFAULT_COLUMN_NAME, NewColumn, NewProject, Position, Project, ProjectId},
    ports::BoardStore,
};
use std::sync::Arc;

/// Creates, updates and removes projects.
#[derive(Clone)]
pub struct ProjectService<S>
where
    S: BoardStore,
{
    store: Arc<S>,
}

impl<S> ProjectService<S>
where
    S: BoardStore,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Creates a project together with its `default` column at index 1.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Validation`] for an invalid name
    /// or description, or a repository error when persistence fails.
    pub async fn create_project(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> BoardServiceResult<Project> {
        let new = NewProject::new(name, description)?;
        let project = self
            .store
            .write(move |tx| -> BoardServiceResult<Project> {
                let project = tx.create_project(new)?;
                let column = NewColumn::new(DEFAULT_COLUMN_NAME, Position::FIRST, project.id())?;
                tx.create_column(column)?;
                Ok(project)
            })
            .await?;
        tracing::debug!(project_id = %project.id(), "project created");
        Ok(project)
    }

    /// Fetches a project.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the project is unknown.
    pub async fn get_project(&self, project_id: ProjectId) -> BoardServiceResult<Project> {
        self.store
            .read(move |tx| -> BoardServiceResult<Project> { Ok(tx.project_by_id(project_id)?) })
            .await
    }

    /// Lists every project sorted by name.
    ///
    /// # Errors
    ///
    /// Returns a repository error when persistence fails.
    pub async fn list_projects(&self) -> BoardServiceResult<Vec<Project>> {
        let mut projects = self
            .store
            .read(|tx| -> BoardServiceResult<Vec<Project>> { Ok(tx.list_projects()?) })
            .await?;
        projects.sort_by(|left, right| {
            left.name()
                .cmp(right.name())
                .then_with(|| left.id().cmp(&right.id()))
        });
        Ok(projects)
    }

    /// Replaces the project's name and description.
    ///
    /// # Errors
    ///
    /// Returns [`super::BoardServiceError::Validation`] for invalid fields,
    /// and a not-found repository error when the project is unknown.
    pub async fn update_project(
        &self,
        project_id: ProjectId,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> BoardServiceResult<Project> {
        let update = NewProject::new(name, description)?;
        self.store
            .write(move |tx| -> BoardServiceResult<Project> {
                let mut project = tx.project_by_id(project_id)?;
                project.apply(update);
                Ok(tx.update_project(&project)?)
            })
            .await
    }

    /// Deletes the project with all of its columns, tasks and comments.
    ///
    /// # Errors
    ///
    /// Returns a not-found repository error when the project is unknown.
    pub async fn delete_project(&self, project_id: ProjectId) -> BoardServiceResult<()> {
        let columns = self
            .store
            .write(move |tx| -> BoardServiceResult<usize> {
                let columns = tx.list_columns(project_id)?;
                for column in &columns {
                    cascade::purge_column(tx, column.id())?;
                }
                tx.delete_project(project_id)?;
                Ok(columns.len())
            })
            .await?;
        tracing::debug!(%project_id, purged_columns = columns, "project deleted");
        Ok(())
    }
}
