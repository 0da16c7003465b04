//! Diesel row models and their conversions to domain entities.

use super::schema::{board_columns, comments, projects, tasks};
use crate::board::{
    domain::{
        Column, ColumnId, Comment, CommentId, PersistedTaskData, Position, Project, ProjectId,
        Task, TaskId,
    },
    ports::{RepositoryError, RepositoryResult},
};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Row shape of the `projects` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = projects)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProjectRow {
    /// Project identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
}

/// Row shape of the `board_columns` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = board_columns)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColumnRow {
    /// Column identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// 1-based index.
    pub position: i32,
    /// Owning project.
    pub project_id: Uuid,
}

/// Row shape of the `tasks` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// 1-based index.
    pub position: i32,
    /// Owning column.
    pub column_id: Uuid,
}

/// Row shape of the `comments` table.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable, Insertable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: Uuid,
    /// Comment text.
    pub body: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Task the comment belongs to.
    pub task_id: Uuid,
}

pub(super) fn position_to_sql(position: Position) -> RepositoryResult<i32> {
    i32::try_from(position.get()).map_err(RepositoryError::persistence)
}

fn position_from_sql(raw: i32) -> RepositoryResult<Position> {
    let value = u64::try_from(raw).map_err(RepositoryError::persistence)?;
    Position::new(value).map_err(RepositoryError::persistence)
}

impl From<&Project> for ProjectRow {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id().into_inner(),
            name: project.name().to_owned(),
            description: project.description().to_owned(),
        }
    }
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Self::from_persisted(ProjectId::from_uuid(row.id), row.name, row.description)
    }
}

impl TryFrom<&Column> for ColumnRow {
    type Error = RepositoryError;

    fn try_from(column: &Column) -> RepositoryResult<Self> {
        Ok(Self {
            id: column.id().into_inner(),
            name: column.name().to_owned(),
            position: position_to_sql(column.index())?,
            project_id: column.project_id().into_inner(),
        })
    }
}

impl TryFrom<ColumnRow> for Column {
    type Error = RepositoryError;

    fn try_from(row: ColumnRow) -> RepositoryResult<Self> {
        Ok(Self::from_persisted(
            ColumnId::from_uuid(row.id),
            row.name,
            position_from_sql(row.position)?,
            ProjectId::from_uuid(row.project_id),
        ))
    }
}

impl TryFrom<&Task> for TaskRow {
    type Error = RepositoryError;

    fn try_from(task: &Task) -> RepositoryResult<Self> {
        Ok(Self {
            id: task.id().into_inner(),
            name: task.name().to_owned(),
            description: task.description().to_owned(),
            position: position_to_sql(task.index())?,
            column_id: task.column_id().into_inner(),
        })
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = RepositoryError;

    fn try_from(row: TaskRow) -> RepositoryResult<Self> {
        Ok(Self::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            index: position_from_sql(row.position)?,
            column_id: ColumnId::from_uuid(row.column_id),
        }))
    }
}

impl From<&Comment> for CommentRow {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id().into_inner(),
            body: comment.text().to_owned(),
            created_at: comment.created_at(),
            task_id: comment.task_id().into_inner(),
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self::from_persisted(
            CommentId::from_uuid(row.id),
            row.body,
            row.created_at,
            TaskId::from_uuid(row.task_id),
        )
    }
}
