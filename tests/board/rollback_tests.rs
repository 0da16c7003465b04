//! A unit of work that fails part-way leaves the board untouched.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::helpers::Services;
use async_trait::async_trait;
use eyre::{Result, ensure};
use rstest::rstest;
use tasker::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{
        Column, ColumnDirection, ColumnId, Comment, CommentId, NewColumn, NewComment, NewProject,
        NewTask, Position, Project, ProjectId, Task, TaskId,
    },
    ports::{
        BoardStore, BoardTransaction, ColumnRepository, CommentRepository, ProjectRepository,
        RepositoryError, RepositoryResult, TaskRepository,
    },
};

/// Store whose writes start failing once `budget` row updates were made.
struct FaultyStore {
    inner: InMemoryBoardStore,
    budget: Arc<AtomicUsize>,
}

impl FaultyStore {
    fn new() -> Self {
        Self {
            inner: InMemoryBoardStore::new(),
            budget: Arc::new(AtomicUsize::new(usize::MAX)),
        }
    }

    fn fail_after(&self, updates: usize) {
        self.budget.store(updates, Ordering::SeqCst);
    }
}

struct FaultyTransaction<'a> {
    inner: &'a mut dyn BoardTransaction,
    budget: Arc<AtomicUsize>,
}

impl FaultyTransaction<'_> {
    fn spend(&self) -> RepositoryResult<()> {
        self.budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .map(|_| ())
            .map_err(|_| {
                RepositoryError::persistence(std::io::Error::other("injected update failure"))
            })
    }
}

impl ProjectRepository for FaultyTransaction<'_> {
    fn list_projects(&self) -> RepositoryResult<Vec<Project>> {
        self.inner.list_projects()
    }
    fn project_by_id(&self, id: ProjectId) -> RepositoryResult<Project> {
        self.inner.project_by_id(id)
    }
    fn create_project(&mut self, project: NewProject) -> RepositoryResult<Project> {
        self.inner.create_project(project)
    }
    fn update_project(&mut self, project: &Project) -> RepositoryResult<Project> {
        self.spend()?;
        self.inner.update_project(project)
    }
    fn delete_project(&mut self, id: ProjectId) -> RepositoryResult<()> {
        self.inner.delete_project(id)
    }
}

impl ColumnRepository for FaultyTransaction<'_> {
    fn list_columns(&self, project_id: ProjectId) -> RepositoryResult<Vec<Column>> {
        self.inner.list_columns(project_id)
    }
    fn column_by_id(&self, id: ColumnId) -> RepositoryResult<Column> {
        self.inner.column_by_id(id)
    }
    fn column_at(&self, index: Position, project_id: ProjectId) -> RepositoryResult<Column> {
        self.inner.column_at(index, project_id)
    }
    fn create_column(&mut self, column: NewColumn) -> RepositoryResult<Column> {
        self.inner.create_column(column)
    }
    fn update_column(&mut self, column: &Column) -> RepositoryResult<Column> {
        self.spend()?;
        self.inner.update_column(column)
    }
    fn delete_column(&mut self, id: ColumnId) -> RepositoryResult<()> {
        self.inner.delete_column(id)
    }
}

impl TaskRepository for FaultyTransaction<'_> {
    fn list_tasks(&self, column_id: ColumnId) -> RepositoryResult<Vec<Task>> {
        self.inner.list_tasks(column_id)
    }
    fn task_by_id(&self, id: TaskId) -> RepositoryResult<Task> {
        self.inner.task_by_id(id)
    }
    fn task_at(&self, index: Position, column_id: ColumnId) -> RepositoryResult<Task> {
        self.inner.task_at(index, column_id)
    }
    fn create_task(&mut self, task: NewTask) -> RepositoryResult<Task> {
        self.inner.create_task(task)
    }
    fn update_task(&mut self, task: &Task) -> RepositoryResult<Task> {
        self.spend()?;
        self.inner.update_task(task)
    }
    fn delete_task(&mut self, id: TaskId) -> RepositoryResult<()> {
        self.inner.delete_task(id)
    }
}

impl CommentRepository for FaultyTransaction<'_> {
    fn list_comments(&self, task_id: TaskId) -> RepositoryResult<Vec<Comment>> {
        self.inner.list_comments(task_id)
    }
    fn comment_by_id(&self, id: CommentId) -> RepositoryResult<Comment> {
        self.inner.comment_by_id(id)
    }
    fn create_comment(&mut self, comment: NewComment) -> RepositoryResult<Comment> {
        self.inner.create_comment(comment)
    }
    fn update_comment(&mut self, comment: &Comment) -> RepositoryResult<Comment> {
        self.spend()?;
        self.inner.update_comment(comment)
    }
    fn delete_comment(&mut self, id: CommentId) -> RepositoryResult<()> {
        self.inner.delete_comment(id)
    }
}

#[async_trait]
impl BoardStore for FaultyStore {
    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        self.inner.read(work).await
    }

    async fn write<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        let budget = Arc::clone(&self.budget);
        self.inner
            .write(move |tx| {
                let mut faulty = FaultyTransaction { inner: tx, budget };
                work(&mut faulty)
            })
            .await
    }
}

async fn snapshot(
    services: &Services<FaultyStore>,
    project_id: ProjectId,
) -> Result<Vec<(String, u32, Vec<(String, u32)>)>> {
    let mut layout = Vec::new();
    for column in services.columns.list_columns(project_id).await? {
        let tasks = services
            .tasks
            .list_tasks(column.id())
            .await?
            .iter()
            .map(|t| (t.name().to_owned(), t.index().get()))
            .collect();
        layout.push((column.name().to_owned(), column.index().get(), tasks));
    }
    Ok(layout)
}

#[rstest]
#[case::after_first_relocated_task(1)]
#[case::after_all_relocated_tasks(2)]
#[tokio::test(flavor = "multi_thread")]
async fn failed_column_deletion_restores_every_row(#[case] updates: usize) -> Result<()> {
    let store = Arc::new(FaultyStore::new());
    let services = Services::over(&store);
    let (project, columns) = services
        .project_with_columns(&["doing", "review", "done"])
        .await?;
    let doing = columns.get(1).map(Column::id).ok_or_else(|| eyre::eyre!("no column"))?;
    services.tasks_in(doing, &["a", "b"]).await?;
    let before = snapshot(&services, project.id()).await?;

    store.fail_after(updates);
    let result = services.columns.delete_column(doing).await;
    store.fail_after(usize::MAX);

    ensure!(result.is_err(), "deletion should hit the injected failure");
    ensure!(
        snapshot(&services, project.id()).await? == before,
        "board changed after a failed deletion"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_swap_keeps_both_columns_in_place() -> Result<()> {
    let store = Arc::new(FaultyStore::new());
    let services = Services::over(&store);
    let (project, columns) = services.project_with_columns(&["doing"]).await?;
    let first = columns.first().map(Column::id).ok_or_else(|| eyre::eyre!("no column"))?;
    let before = snapshot(&services, project.id()).await?;

    store.fail_after(1);
    let result = services
        .columns
        .move_column(first, ColumnDirection::Right)
        .await;
    store.fail_after(usize::MAX);

    ensure!(result.is_err(), "move should hit the injected failure");
    ensure!(
        snapshot(&services, project.id()).await? == before,
        "columns changed after a failed move"
    );
    Ok(())
}
