//! Undo log giving in-memory units of work all-or-nothing semantics.

use super::state::{BoardState, Prior};
use crate::board::{
    domain::{
        Column, ColumnId, Comment, CommentId, NewColumn, NewComment, NewProject, NewTask,
        Position, Project, ProjectId, Task, TaskId,
    },
    ports::{
        ColumnRepository, CommentRepository, ProjectRepository, RepositoryResult, TaskRepository,
    },
};

/// Committed state plus the prior contents of every slot a unit of work has
/// written so far.
///
/// Only touched records are copied, so a write costs in proportion to what
/// it changes rather than to the size of the board.
pub(super) struct JournaledState<'state> {
    state: &'state mut BoardState,
    undo: Vec<Prior>,
}

impl<'state> JournaledState<'state> {
    pub(super) const fn new(state: &'state mut BoardState) -> Self {
        Self {
            state,
            undo: Vec::new(),
        }
    }

    /// Reverts every recorded write, newest first, and returns how many were
    /// undone.
    pub(super) fn rollback(self) -> usize {
        let Self { state, undo } = self;
        let undone = undo.len();
        for prior in undo.into_iter().rev() {
            state.restore(prior);
        }
        undone
    }

    fn record<T>(&mut self, prior: Prior, result: RepositoryResult<T>) -> RepositoryResult<T> {
        if result.is_ok() {
            self.undo.push(prior);
        }
        result
    }
}

impl ProjectRepository for JournaledState<'_> {
    fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        self.state.list_projects()
    }

    fn project_by_id(&self, id: ProjectId) -> RepositoryResult<Project> {
        self.state.project_by_id(id)
    }

    fn create_project(&mut self, project: NewProject) -> RepositoryResult<Project> {
        let stored = self.state.create_project(project)?;
        self.undo.push(Prior::Project(stored.id(), None));
        Ok(stored)
    }

    fn update_project(&mut self, project: &Project) -> RepositoryResult<Project> {
        let prior = self.state.prior_project(project.id());
        let result = self.state.update_project(project);
        self.record(prior, result)
    }

    fn delete_project(&mut self, id: ProjectId) -> RepositoryResult<()> {
        let prior = self.state.prior_project(id);
        let result = self.state.delete_project(id);
        self.record(prior, result)
    }
}

impl ColumnRepository for JournaledState<'_> {
    fn list_columns(&self, project_id: ProjectId) -> RepositoryResult<Vec<Column>> {
        self.state.list_columns(project_id)
    }

    fn column_by_id(&self, id: ColumnId) -> RepositoryResult<Column> {
        self.state.column_by_id(id)
    }

    fn column_at(&self, index: Position, project_id: ProjectId) -> RepositoryResult<Column> {
        self.state.column_at(index, project_id)
    }

    fn create_column(&mut self, column: NewColumn) -> RepositoryResult<Column> {
        let stored = self.state.create_column(column)?;
        self.undo.push(Prior::Column(stored.id(), None));
        Ok(stored)
    }

    fn update_column(&mut self, column: &Column) -> RepositoryResult<Column> {
        let prior = self.state.prior_column(column.id());
        let result = self.state.update_column(column);
        self.record(prior, result)
    }

    fn delete_column(&mut self, id: ColumnId) -> RepositoryResult<()> {
        let prior = self.state.prior_column(id);
        let result = self.state.delete_column(id);
        self.record(prior, result)
    }
}

impl TaskRepository for JournaledState<'_> {
    fn list_tasks(&self, column_id: ColumnId) -> RepositoryResult<Vec<Task>> {
        self.state.list_tasks(column_id)
    }

    fn task_by_id(&self, id: TaskId) -> RepositoryResult<Task> {
        self.state.task_by_id(id)
    }

    fn task_at(&self, index: Position, column_id: ColumnId) -> RepositoryResult<Task> {
        self.state.task_at(index, column_id)
    }

    fn create_task(&mut self, task: NewTask) -> RepositoryResult<Task> {
        let stored = self.state.create_task(task)?;
        self.undo.push(Prior::Task(stored.id(), None));
        Ok(stored)
    }

    fn update_task(&mut self, task: &Task) -> RepositoryResult<Task> {
        let prior = self.state.prior_task(task.id());
        let result = self.state.update_task(task);
        self.record(prior, result)
    }

    fn delete_task(&mut self, id: TaskId) -> RepositoryResult<()> {
        let prior = self.state.prior_task(id);
        let result = self.state.delete_task(id);
        self.record(prior, result)
    }
}

impl CommentRepository for JournaledState<'_> {
    fn list_comments(&self, task_id: TaskId) -> RepositoryResult<Vec<Comment>> {
        self.state.list_comments(task_id)
    }

    fn comment_by_id(&self, id: CommentId) -> RepositoryResult<Comment> {
        self.state.comment_by_id(id)
    }

    fn create_comment(&mut self, comment: NewComment) -> RepositoryResult<Comment> {
        let stored = self.state.create_comment(comment)?;
        self.undo.push(Prior::Comment(stored.id(), None));
        Ok(stored)
    }

    fn update_comment(&mut self, comment: &Comment) -> RepositoryResult<Comment> {
        let prior = self.state.prior_comment(comment.id());
        let result = self.state.update_comment(comment);
        self.record(prior, result)
    }

    fn delete_comment(&mut self, id: CommentId) -> RepositoryResult<()> {
        let prior = self.state.prior_comment(id);
        let result = self.state.delete_comment(id);
        self.record(prior, result)
    }
}
