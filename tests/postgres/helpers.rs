//! Shared helpers for `PostgreSQL` board tests.

use std::sync::Arc;

use super::cluster::{TemporaryDatabase, shared_cluster};
use eyre::{Result, eyre};
use mockable::DefaultClock;
use rstest::fixture;
use tasker::board::{
    adapters::postgres::PostgresBoardStore,
    domain::{Column, ColumnId, Project, ProjectId, Task},
    services::{ColumnOrderingService, CommentService, ProjectService, TaskOrderingService},
};

/// Board services over one scratch database.
///
/// The database field comes last so the pool closes before it is dropped.
pub struct PgBoard {
    pub store: Arc<PostgresBoardStore>,
    pub projects: ProjectService<PostgresBoardStore>,
    pub columns: ColumnOrderingService<PostgresBoardStore>,
    pub tasks: TaskOrderingService<PostgresBoardStore>,
    pub comments: CommentService<PostgresBoardStore, DefaultClock>,
    _database: TemporaryDatabase,
}

impl PgBoard {
    /// Creates a project with `extra` columns after `default`.
    pub async fn project_with_columns(&self, extra: &[&str]) -> Result<(Project, Vec<Column>)> {
        let project = self.projects.create_project("Board", "").await?;
        for name in extra {
            self.columns.create_column(*name, project.id()).await?;
        }
        let columns = self.columns.list_columns(project.id()).await?;
        Ok((project, columns))
    }

    /// Appends tasks named `names` to `column_id`.
    pub async fn tasks_in(&self, column_id: ColumnId, names: &[&str]) -> Result<Vec<Task>> {
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(self.tasks.create_task(*name, "", column_id).await?);
        }
        Ok(created)
    }

    /// Column names with their indices, in index order.
    pub async fn column_layout(&self, project_id: ProjectId) -> Result<Vec<(String, u32)>> {
        Ok(self
            .columns
            .list_columns(project_id)
            .await?
            .iter()
            .map(|column| (column.name().to_owned(), column.index().get()))
            .collect())
    }

    /// Task names with their indices, in index order.
    pub async fn task_layout(&self, column_id: ColumnId) -> Result<Vec<(String, u32)>> {
        Ok(self
            .tasks
            .list_tasks(column_id)
            .await?
            .iter()
            .map(|task| (task.name().to_owned(), task.index().get()))
            .collect())
    }
}

/// Expected `(name, index)` pairs.
pub fn named(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
    pairs
        .iter()
        .map(|(name, index)| ((*name).to_owned(), *index))
        .collect()
}

/// Services over a freshly migrated scratch database, or `None` when no
/// `PostgreSQL` server is available.
#[fixture]
pub async fn pg_board() -> Result<Option<PgBoard>> {
    let Some(cluster) = shared_cluster() else {
        return Ok(None);
    };
    let database = cluster.temporary_database().await?;
    let url = database.url().to_owned();
    let connected = tokio::task::spawn_blocking(move || PostgresBoardStore::connect(&url, 4))
        .await
        .map_err(|err| eyre!("pool setup panicked: {err}"))??;
    connected.apply_schema().await?;

    let store = Arc::new(connected);
    Ok(Some(PgBoard {
        projects: ProjectService::new(Arc::clone(&store)),
        columns: ColumnOrderingService::new(Arc::clone(&store)),
        tasks: TaskOrderingService::new(Arc::clone(&store)),
        comments: CommentService::new(Arc::clone(&store), Arc::new(DefaultClock)),
        store,
        _database: database,
    }))
}
