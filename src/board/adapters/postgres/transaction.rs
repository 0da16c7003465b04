//! Repository contract over one open `PostgreSQL` transaction.

use std::cell::RefCell;

use super::{
    models::{ColumnRow, CommentRow, ProjectRow, TaskRow, position_to_sql},
    schema::{board_columns, comments, projects, tasks},
};
use crate::board::{
    domain::{
        Column, ColumnId, Comment, CommentId, NewColumn, NewComment, NewProject, NewTask,
        Position, Project, ProjectId, Task, TaskId,
    },
    ports::{
        ColumnRepository, CommentRepository, EntityRef, ProjectRepository, RepositoryError,
        RepositoryResult, TaskRepository,
    },
};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

/// Borrowed connection inside a running transaction.
///
/// Reads need a mutable connection too, so the borrow sits behind a
/// `RefCell`; the transaction never leaves the blocking thread that opened it.
pub(super) struct PgBoardTransaction<'conn> {
    connection: RefCell<&'conn mut PgConnection>,
}

impl<'conn> PgBoardTransaction<'conn> {
    pub(super) const fn new(connection: &'conn mut PgConnection) -> Self {
        Self {
            connection: RefCell::new(connection),
        }
    }

    fn with_connection<T>(
        &self,
        f: impl FnOnce(&mut PgConnection) -> RepositoryResult<T>,
    ) -> RepositoryResult<T> {
        let mut connection = self.connection.borrow_mut();
        f(&mut **connection)
    }
}

fn project_exists(connection: &mut PgConnection, id: Uuid) -> RepositoryResult<bool> {
    diesel::select(diesel::dsl::exists(projects::table.find(id)))
        .get_result(connection)
        .map_err(RepositoryError::persistence)
}

fn column_exists(connection: &mut PgConnection, id: Uuid) -> RepositoryResult<bool> {
    diesel::select(diesel::dsl::exists(board_columns::table.find(id)))
        .get_result(connection)
        .map_err(RepositoryError::persistence)
}

fn task_exists(connection: &mut PgConnection, id: Uuid) -> RepositoryResult<bool> {
    diesel::select(diesel::dsl::exists(tasks::table.find(id)))
        .get_result(connection)
        .map_err(RepositoryError::persistence)
}

const fn require(found: bool, entity: EntityRef) -> RepositoryResult<()> {
    if found {
        Ok(())
    } else {
        Err(RepositoryError::NotFound(entity))
    }
}

const fn require_parent(found: bool, entity: EntityRef) -> RepositoryResult<()> {
    if found {
        Ok(())
    } else {
        Err(RepositoryError::ConstraintViolation(entity))
    }
}

/// Maps an `UPDATE`/`DELETE` row count to `NotFound` when nothing matched.
const fn require_affected(affected: usize, entity: EntityRef) -> RepositoryResult<()> {
    require(affected > 0, entity)
}

impl ProjectRepository for PgBoardTransaction<'_> {
    fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        self.with_connection(|connection| {
            let rows = projects::table
                .select(ProjectRow::as_select())
                .order(projects::id.asc())
                .load::<ProjectRow>(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(rows.into_iter().map(Project::from).collect())
        })
    }

    fn project_by_id(&self, id: ProjectId) -> RepositoryResult<Project> {
        self.with_connection(|connection| {
            projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(Project::from)
                .ok_or(RepositoryError::NotFound(EntityRef::Project(id)))
        })
    }

    fn create_project(&mut self, project: NewProject) -> RepositoryResult<Project> {
        let stored = Project::from_new(ProjectId::new(), project);
        let row = ProjectRow::from(&stored);
        self.with_connection(|connection| {
            diesel::insert_into(projects::table)
                .values(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)
        })?;
        Ok(stored)
    }

    fn update_project(&mut self, project: &Project) -> RepositoryResult<Project> {
        let row = ProjectRow::from(project);
        self.with_connection(|connection| {
            let affected = diesel::update(projects::table.find(row.id))
                .set((
                    projects::name.eq(&row.name),
                    projects::description.eq(&row.description),
                ))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            require_affected(affected, EntityRef::Project(project.id()))
        })?;
        Ok(project.clone())
    }

    fn delete_project(&mut self, id: ProjectId) -> RepositoryResult<()> {
        self.with_connection(|connection| {
            require(
                project_exists(connection, id.into_inner())?,
                EntityRef::Project(id),
            )?;
            let child = board_columns::table
                .filter(board_columns::project_id.eq(id.into_inner()))
                .select(board_columns::id)
                .first::<Uuid>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            if let Some(column_id) = child {
                return Err(RepositoryError::ConstraintViolation(EntityRef::Column(
                    ColumnId::from_uuid(column_id),
                )));
            }
            diesel::delete(projects::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(())
        })
    }
}

impl ColumnRepository for PgBoardTransaction<'_> {
    fn list_columns(&self, project_id: ProjectId) -> RepositoryResult<Vec<Column>> {
        self.with_connection(|connection| {
            require(
                project_exists(connection, project_id.into_inner())?,
                EntityRef::Project(project_id),
            )?;
            board_columns::table
                .filter(board_columns::project_id.eq(project_id.into_inner()))
                .select(ColumnRow::as_select())
                .order((board_columns::position.asc(), board_columns::id.asc()))
                .load::<ColumnRow>(connection)
                .map_err(RepositoryError::persistence)?
                .into_iter()
                .map(Column::try_from)
                .collect()
        })
    }

    fn column_by_id(&self, id: ColumnId) -> RepositoryResult<Column> {
        self.with_connection(|connection| {
            board_columns::table
                .find(id.into_inner())
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .ok_or(RepositoryError::NotFound(EntityRef::Column(id)))
                .and_then(Column::try_from)
        })
    }

    fn column_at(&self, index: Position, project_id: ProjectId) -> RepositoryResult<Column> {
        let position = position_to_sql(index)?;
        self.with_connection(|connection| {
            board_columns::table
                .filter(board_columns::project_id.eq(project_id.into_inner()))
                .filter(board_columns::position.eq(position))
                .select(ColumnRow::as_select())
                .first::<ColumnRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .ok_or_else(|| {
                    RepositoryError::NotFound(EntityRef::column_slot(project_id, Some(index)))
                })
                .and_then(Column::try_from)
        })
    }

    fn create_column(&mut self, column: NewColumn) -> RepositoryResult<Column> {
        let stored = Column::from_new(ColumnId::new(), column);
        let row = ColumnRow::try_from(&stored)?;
        self.with_connection(|connection| {
            require_parent(
                project_exists(connection, row.project_id)?,
                EntityRef::Project(stored.project_id()),
            )?;
            diesel::insert_into(board_columns::table)
                .values(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)
        })?;
        Ok(stored)
    }

    fn update_column(&mut self, column: &Column) -> RepositoryResult<Column> {
        let row = ColumnRow::try_from(column)?;
        self.with_connection(|connection| {
            require(
                column_exists(connection, row.id)?,
                EntityRef::Column(column.id()),
            )?;
            require_parent(
                project_exists(connection, row.project_id)?,
                EntityRef::Project(column.project_id()),
            )?;
            diesel::update(board_columns::table.find(row.id))
                .set((
                    board_columns::name.eq(&row.name),
                    board_columns::position.eq(row.position),
                    board_columns::project_id.eq(row.project_id),
                ))
                .execute(connection)
                .map_err(RepositoryError::persistence)
        })?;
        Ok(column.clone())
    }

    fn delete_column(&mut self, id: ColumnId) -> RepositoryResult<()> {
        self.with_connection(|connection| {
            require(
                column_exists(connection, id.into_inner())?,
                EntityRef::Column(id),
            )?;
            let child = tasks::table
                .filter(tasks::column_id.eq(id.into_inner()))
                .select(tasks::id)
                .first::<Uuid>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            if let Some(task_id) = child {
                return Err(RepositoryError::ConstraintViolation(EntityRef::Task(
                    TaskId::from_uuid(task_id),
                )));
            }
            diesel::delete(board_columns::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(())
        })
    }
}

impl TaskRepository for PgBoardTransaction<'_> {
    fn list_tasks(&self, column_id: ColumnId) -> RepositoryResult<Vec<Task>> {
        self.with_connection(|connection| {
            require(
                column_exists(connection, column_id.into_inner())?,
                EntityRef::Column(column_id),
            )?;
            tasks::table
                .filter(tasks::column_id.eq(column_id.into_inner()))
                .select(TaskRow::as_select())
                .order((tasks::position.asc(), tasks::id.asc()))
                .load::<TaskRow>(connection)
                .map_err(RepositoryError::persistence)?
                .into_iter()
                .map(Task::try_from)
                .collect()
        })
    }

    fn task_by_id(&self, id: TaskId) -> RepositoryResult<Task> {
        self.with_connection(|connection| {
            tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .ok_or(RepositoryError::NotFound(EntityRef::Task(id)))
                .and_then(Task::try_from)
        })
    }

    fn task_at(&self, index: Position, column_id: ColumnId) -> RepositoryResult<Task> {
        let position = position_to_sql(index)?;
        self.with_connection(|connection| {
            tasks::table
                .filter(tasks::column_id.eq(column_id.into_inner()))
                .filter(tasks::position.eq(position))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .ok_or_else(|| {
                    RepositoryError::NotFound(EntityRef::task_slot(column_id, Some(index)))
                })
                .and_then(Task::try_from)
        })
    }

    fn create_task(&mut self, task: NewTask) -> RepositoryResult<Task> {
        let stored = Task::from_new(TaskId::new(), task);
        let row = TaskRow::try_from(&stored)?;
        self.with_connection(|connection| {
            require_parent(
                column_exists(connection, row.column_id)?,
                EntityRef::Column(stored.column_id()),
            )?;
            diesel::insert_into(tasks::table)
                .values(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)
        })?;
        Ok(stored)
    }

    fn update_task(&mut self, task: &Task) -> RepositoryResult<Task> {
        let row = TaskRow::try_from(task)?;
        self.with_connection(|connection| {
            require(task_exists(connection, row.id)?, EntityRef::Task(task.id()))?;
            require_parent(
                column_exists(connection, row.column_id)?,
                EntityRef::Column(task.column_id()),
            )?;
            diesel::update(tasks::table.find(row.id))
                .set((
                    tasks::name.eq(&row.name),
                    tasks::description.eq(&row.description),
                    tasks::position.eq(row.position),
                    tasks::column_id.eq(row.column_id),
                ))
                .execute(connection)
                .map_err(RepositoryError::persistence)
        })?;
        Ok(task.clone())
    }

    fn delete_task(&mut self, id: TaskId) -> RepositoryResult<()> {
        self.with_connection(|connection| {
            require(task_exists(connection, id.into_inner())?, EntityRef::Task(id))?;
            let child = comments::table
                .filter(comments::task_id.eq(id.into_inner()))
                .select(comments::id)
                .first::<Uuid>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?;
            if let Some(comment_id) = child {
                return Err(RepositoryError::ConstraintViolation(EntityRef::Comment(
                    CommentId::from_uuid(comment_id),
                )));
            }
            diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(())
        })
    }
}

impl CommentRepository for PgBoardTransaction<'_> {
    fn list_comments(&self, task_id: TaskId) -> RepositoryResult<Vec<Comment>> {
        self.with_connection(|connection| {
            require(
                task_exists(connection, task_id.into_inner())?,
                EntityRef::Task(task_id),
            )?;
            let rows = comments::table
                .filter(comments::task_id.eq(task_id.into_inner()))
                .select(CommentRow::as_select())
                .order((comments::created_at.asc(), comments::id.asc()))
                .load::<CommentRow>(connection)
                .map_err(RepositoryError::persistence)?;
            Ok(rows.into_iter().map(Comment::from).collect())
        })
    }

    fn comment_by_id(&self, id: CommentId) -> RepositoryResult<Comment> {
        self.with_connection(|connection| {
            comments::table
                .find(id.into_inner())
                .select(CommentRow::as_select())
                .first::<CommentRow>(connection)
                .optional()
                .map_err(RepositoryError::persistence)?
                .map(Comment::from)
                .ok_or(RepositoryError::NotFound(EntityRef::Comment(id)))
        })
    }

    fn create_comment(&mut self, comment: NewComment) -> RepositoryResult<Comment> {
        let stored = Comment::from_new(CommentId::new(), comment);
        let row = CommentRow::from(&stored);
        self.with_connection(|connection| {
            require_parent(
                task_exists(connection, row.task_id)?,
                EntityRef::Task(stored.task_id()),
            )?;
            diesel::insert_into(comments::table)
                .values(&row)
                .execute(connection)
                .map_err(RepositoryError::persistence)
        })?;
        Ok(stored)
    }

    fn update_comment(&mut self, comment: &Comment) -> RepositoryResult<Comment> {
        let row = CommentRow::from(comment);
        self.with_connection(|connection| {
            let found = diesel::select(diesel::dsl::exists(comments::table.find(row.id)))
                .get_result::<bool>(connection)
                .map_err(RepositoryError::persistence)?;
            require(found, EntityRef::Comment(comment.id()))?;
            require_parent(
                task_exists(connection, row.task_id)?,
                EntityRef::Task(comment.task_id()),
            )?;
            diesel::update(comments::table.find(row.id))
                .set((
                    comments::body.eq(&row.body),
                    comments::created_at.eq(row.created_at),
                    comments::task_id.eq(row.task_id),
                ))
                .execute(connection)
                .map_err(RepositoryError::persistence)
        })?;
        Ok(comment.clone())
    }

    fn delete_comment(&mut self, id: CommentId) -> RepositoryResult<()> {
        self.with_connection(|connection| {
            let affected = diesel::delete(comments::table.find(id.into_inner()))
                .execute(connection)
                .map_err(RepositoryError::persistence)?;
            require_affected(affected, EntityRef::Comment(id))
        })
    }
}
