//! Entity maps behind the in-memory store, implementing the repository
//! contract directly.

use std::collections::HashMap;
use std::hash::Hash;

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

/// One map per entity type, keyed by identity.
#[derive(Debug, Default)]
pub(super) struct BoardState {
    projects: HashMap<ProjectId, Project>,
    columns: HashMap<ColumnId, Column>,
    tasks: HashMap<TaskId, Task>,
    comments: HashMap<CommentId, Comment>,
}

impl BoardState {
    fn require_project(&self, id: ProjectId) -> RepositoryResult<()> {
        if self.projects.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(EntityRef::Project(id)))
        }
    }

    fn require_column(&self, id: ColumnId) -> RepositoryResult<()> {
        if self.columns.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(EntityRef::Column(id)))
        }
    }

    fn require_task(&self, id: TaskId) -> RepositoryResult<()> {
        if self.tasks.contains_key(&id) {
            Ok(())
        } else {
            Err(RepositoryError::NotFound(EntityRef::Task(id)))
        }
    }
}

/// Contents of one map slot before a write, replayed to undo it.
#[derive(Debug)]
pub(super) enum Prior {
    Project(ProjectId, Option<Project>),
    Column(ColumnId, Option<Column>),
    Task(TaskId, Option<Task>),
    Comment(CommentId, Option<Comment>),
}

impl BoardState {
    pub(super) fn prior_project(&self, id: ProjectId) -> Prior {
        Prior::Project(id, self.projects.get(&id).cloned())
    }

    pub(super) fn prior_column(&self, id: ColumnId) -> Prior {
        Prior::Column(id, self.columns.get(&id).cloned())
    }

    pub(super) fn prior_task(&self, id: TaskId) -> Prior {
        Prior::Task(id, self.tasks.get(&id).cloned())
    }

    pub(super) fn prior_comment(&self, id: CommentId) -> Prior {
        Prior::Comment(id, self.comments.get(&id).cloned())
    }

    /// Puts a slot back the way [`Prior`] captured it.
    pub(super) fn restore(&mut self, prior: Prior) {
        match prior {
            Prior::Project(id, value) => put_back(&mut self.projects, id, value),
            Prior::Column(id, value) => put_back(&mut self.columns, id, value),
            Prior::Task(id, value) => put_back(&mut self.tasks, id, value),
            Prior::Comment(id, value) => put_back(&mut self.comments, id, value),
        }
    }
}

fn put_back<K: Eq + Hash, V>(map: &mut HashMap<K, V>, key: K, value: Option<V>) {
    map.remove(&key);
    if let Some(previous) = value {
        map.insert(key, previous);
    }
}

/// Turns a missing parent into a foreign-key failure.
fn as_constraint(result: RepositoryResult<()>) -> RepositoryResult<()> {
    result.map_err(|err| match err {
        RepositoryError::NotFound(entity) => RepositoryError::ConstraintViolation(entity),
        other => other,
    })
}

impl ProjectRepository for BoardState {
    fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        let mut projects: Vec<Project> = self.projects.values().cloned().collect();
        projects.sort_by_key(Project::id);
        Ok(projects)
    }

    fn project_by_id(&self, id: ProjectId) -> RepositoryResult<Project> {
        self.projects
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(EntityRef::Project(id)))
    }

    fn create_project(&mut self, project: NewProject) -> RepositoryResult<Project> {
        let stored = Project::from_new(ProjectId::new(), project);
        self.projects.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    fn update_project(&mut self, project: &Project) -> RepositoryResult<Project> {
        self.require_project(project.id())?;
        self.projects.insert(project.id(), project.clone());
        Ok(project.clone())
    }

    fn delete_project(&mut self, id: ProjectId) -> RepositoryResult<()> {
        self.require_project(id)?;
        if let Some(column) = self.columns.values().find(|column| column.project_id() == id) {
            return Err(RepositoryError::ConstraintViolation(EntityRef::Column(
                column.id(),
            )));
        }
        self.projects.remove(&id);
        Ok(())
    }
}

impl ColumnRepository for BoardState {
    fn list_columns(&self, project_id: ProjectId) -> RepositoryResult<Vec<Column>> {
        self.require_project(project_id)?;
        let mut columns: Vec<Column> = self
            .columns
            .values()
            .filter(|column| column.project_id() == project_id)
            .cloned()
            .collect();
        columns.sort_by_key(|column| (column.index(), column.id()));
        Ok(columns)
    }

    fn column_by_id(&self, id: ColumnId) -> RepositoryResult<Column> {
        self.columns
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(EntityRef::Column(id)))
    }

    fn column_at(&self, index: Position, project_id: ProjectId) -> RepositoryResult<Column> {
        self.columns
            .values()
            .find(|column| column.project_id() == project_id && column.index() == index)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::NotFound(EntityRef::column_slot(project_id, Some(index)))
            })
    }

    fn create_column(&mut self, column: NewColumn) -> RepositoryResult<Column> {
        as_constraint(self.require_project(column.project_id()))?;
        let stored = Column::from_new(ColumnId::new(), column);
        self.columns.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    fn update_column(&mut self, column: &Column) -> RepositoryResult<Column> {
        self.require_column(column.id())?;
        as_constraint(self.require_project(column.project_id()))?;
        self.columns.insert(column.id(), column.clone());
        Ok(column.clone())
    }

    fn delete_column(&mut self, id: ColumnId) -> RepositoryResult<()> {
        self.require_column(id)?;
        if let Some(task) = self.tasks.values().find(|task| task.column_id() == id) {
            return Err(RepositoryError::ConstraintViolation(EntityRef::Task(
                task.id(),
            )));
        }
        self.columns.remove(&id);
        Ok(())
    }
}

impl TaskRepository for BoardState {
    fn list_tasks(&self, column_id: ColumnId) -> RepositoryResult<Vec<Task>> {
        self.require_column(column_id)?;
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.index(), task.id()));
        Ok(tasks)
    }

    fn task_by_id(&self, id: TaskId) -> RepositoryResult<Task> {
        self.tasks
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(EntityRef::Task(id)))
    }

    fn task_at(&self, index: Position, column_id: ColumnId) -> RepositoryResult<Task> {
        self.tasks
            .values()
            .find(|task| task.column_id() == column_id && task.index() == index)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(EntityRef::task_slot(column_id, Some(index))))
    }

    fn create_task(&mut self, task: NewTask) -> RepositoryResult<Task> {
        as_constraint(self.require_column(task.column_id()))?;
        let stored = Task::from_new(TaskId::new(), task);
        self.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    fn update_task(&mut self, task: &Task) -> RepositoryResult<Task> {
        self.require_task(task.id())?;
        as_constraint(self.require_column(task.column_id()))?;
        self.tasks.insert(task.id(), task.clone());
        Ok(task.clone())
    }

    fn delete_task(&mut self, id: TaskId) -> RepositoryResult<()> {
        self.require_task(id)?;
        if let Some(comment) = self.comments.values().find(|comment| comment.task_id() == id) {
            return Err(RepositoryError::ConstraintViolation(EntityRef::Comment(
                comment.id(),
            )));
        }
        self.tasks.remove(&id);
        Ok(())
    }
}

impl CommentRepository for BoardState {
    fn list_comments(&self, task_id: TaskId) -> RepositoryResult<Vec<Comment>> {
        self.require_task(task_id)?;
        let mut comments: Vec<Comment> = self
            .comments
            .values()
            .filter(|comment| comment.task_id() == task_id)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| (comment.created_at(), comment.id()));
        Ok(comments)
    }

    fn comment_by_id(&self, id: CommentId) -> RepositoryResult<Comment> {
        self.comments
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(EntityRef::Comment(id)))
    }

    fn create_comment(&mut self, comment: NewComment) -> RepositoryResult<Comment> {
        as_constraint(self.require_task(comment.task_id()))?;
        let stored = Comment::from_new(CommentId::new(), comment);
        self.comments.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    fn update_comment(&mut self, comment: &Comment) -> RepositoryResult<Comment> {
        if !self.comments.contains_key(&comment.id()) {
            return Err(RepositoryError::NotFound(EntityRef::Comment(comment.id())));
        }
        as_constraint(self.require_task(comment.task_id()))?;
        self.comments.insert(comment.id(), comment.clone());
        Ok(comment.clone())
    }

    fn delete_comment(&mut self, id: CommentId) -> RepositoryResult<()> {
        self.comments
            .remove(&id)
            .map(drop)
            .ok_or(RepositoryError::NotFound(EntityRef::Comment(id)))
    }
}
