//! Boots the configured board store and logs its layout.
//!
//! Usage:
//!
//! ```text
//! TASKER_STORE=memory RUST_LOG=tasker=debug tasker
//! ```
//!
//! When the store holds no projects a demonstration board is seeded first,
//! exercising column creation, task moves and comments.

use std::sync::Arc;

use mockable::DefaultClock;
use tasker::board::adapters::memory::InMemoryBoardStore;
use tasker::board::adapters::postgres::PostgresBoardStore;
use tasker::board::domain::{ColumnDirection, TaskDirection};
use tasker::board::ports::BoardStore;
use tasker::board::services::{
    BoardServiceResult, ColumnOrderingService, CommentService, ProjectService,
    TaskOrderingService,
};
use tasker::config::{BoardConfig, StoreBackend};
use tokio::runtime::Builder;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), BoxError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "tasker=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BoardConfig::from_env()?;
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(serve(&config))
}

async fn serve(config: &BoardConfig) -> Result<(), BoxError> {
    match config.backend() {
        StoreBackend::Memory => {
            tracing::info!("using in-memory board store");
            run(Arc::new(InMemoryBoardStore::new())).await
        }
        StoreBackend::Postgres {
            database_url,
            pool_size,
        } => {
            tracing::info!(pool_size = *pool_size, "using postgres board store");
            let store = PostgresBoardStore::connect(database_url, *pool_size)?;
            store.apply_schema().await?;
            run(Arc::new(store)).await
        }
    }
}

async fn run<S>(store: Arc<S>) -> Result<(), BoxError>
where
    S: BoardStore,
{
    let projects = ProjectService::new(Arc::clone(&store));
    if projects.list_projects().await?.is_empty() {
        seed(&store).await?;
    }
    log_board(&store).await?;
    Ok(())
}

async fn seed<S>(store: &Arc<S>) -> BoardServiceResult<()>
where
    S: BoardStore,
{
    let projects = ProjectService::new(Arc::clone(store));
    let columns = ColumnOrderingService::new(Arc::clone(store));
    let tasks = TaskOrderingService::new(Arc::clone(store));
    let comments = CommentService::new(Arc::clone(store), Arc::new(DefaultClock));

    let project = projects
        .create_project("Tasker", "Demonstration board")
        .await?;
    let default_column = columns
        .list_columns(project.id())
        .await?
        .into_iter()
        .next();
    let doing = columns.create_column("doing", project.id()).await?;
    let done = columns.create_column("done", project.id()).await?;
    columns.move_column(done.id(), ColumnDirection::Left).await?;
    columns.move_column(done.id(), ColumnDirection::Right).await?;

    if let Some(default_column) = default_column {
        let schema = tasks
            .create_task("Design schema", "Tables and constraints", default_column.id())
            .await?;
        let ordering = tasks
            .create_task("Ordering engine", "Contiguous indices", default_column.id())
            .await?;
        tasks.create_task("Binary", "", default_column.id()).await?;
        tasks
            .move_task_within_column(ordering.id(), TaskDirection::Up)
            .await?;
        tasks
            .move_task_across_columns(schema.id(), ColumnDirection::Right)
            .await?;
        comments
            .create_comment("Deferred unique constraints allow swaps", schema.id())
            .await?;
    }
    tracing::info!(
        project_id = %project.id(),
        doing_id = %doing.id(),
        "seeded demonstration board"
    );
    Ok(())
}

async fn log_board<S>(store: &Arc<S>) -> BoardServiceResult<()>
where
    S: BoardStore,
{
    let projects = ProjectService::new(Arc::clone(store));
    let columns = ColumnOrderingService::new(Arc::clone(store));
    let tasks = TaskOrderingService::new(Arc::clone(store));

    for project in projects.list_projects().await? {
        tracing::info!(project_id = %project.id(), name = project.name(), "project");
        for column in columns.list_columns(project.id()).await? {
            tracing::info!(index = column.index().get(), name = column.name(), "column");
            for task in tasks.list_tasks(column.id()).await? {
                tracing::info!(index = task.index().get(), name = task.name(), "task");
            }
        }
    }
    Ok(())
}
