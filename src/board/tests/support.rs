//! Shared fixtures for board service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{Column, ColumnId, Project, ProjectId, Task},
    services::{ColumnOrderingService, CommentService, ProjectService, TaskOrderingService},
};

/// Clock that advances one second on every reading.
pub(super) struct StepClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl StepClock {
    pub(super) fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
                .single()
                .expect("valid start timestamp"),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::seconds(tick)
    }
}

/// Every board service wired to one in-memory store.
pub(super) struct Board {
    pub(super) store: Arc<InMemoryBoardStore>,
    pub(super) projects: ProjectService<InMemoryBoardStore>,
    pub(super) columns: ColumnOrderingService<InMemoryBoardStore>,
    pub(super) tasks: TaskOrderingService<InMemoryBoardStore>,
    pub(super) comments: CommentService<InMemoryBoardStore, StepClock>,
}

impl Board {
    /// Creates a project whose columns carry `extra` names after `default`.
    pub(super) async fn project_with_columns(&self, extra: &[&str]) -> (Project, Vec<Column>) {
        let project = self
            .projects
            .create_project("Board", "")
            .await
            .expect("project creation should succeed");
        for name in extra {
            self.columns
                .create_column(*name, project.id())
                .await
                .expect("column creation should succeed");
        }
        let columns = self.column_layout(project.id()).await;
        (project, columns)
    }

    /// Creates tasks named `names` in order at the end of `column_id`.
    pub(super) async fn tasks_in(&self, column_id: ColumnId, names: &[&str]) -> Vec<Task> {
        let mut created = Vec::with_capacity(names.len());
        for name in names {
            created.push(
                self.tasks
                    .create_task(*name, "", column_id)
                    .await
                    .expect("task creation should succeed"),
            );
        }
        created
    }

    pub(super) async fn column_layout(&self, project_id: ProjectId) -> Vec<Column> {
        self.columns
            .list_columns(project_id)
            .await
            .expect("listing columns should succeed")
    }

    /// Column names paired with their indices.
    pub(super) async fn column_names(&self, project_id: ProjectId) -> Vec<(String, u32)> {
        self.column_layout(project_id)
            .await
            .into_iter()
            .map(|column| (column.name().to_owned(), column.index().get()))
            .collect()
    }

    /// Task names paired with their indices.
    pub(super) async fn task_names(&self, column_id: ColumnId) -> Vec<(String, u32)> {
        self.tasks
            .list_tasks(column_id)
            .await
            .expect("listing tasks should succeed")
            .into_iter()
            .map(|task| (task.name().to_owned(), task.index().get()))
            .collect()
    }
}

pub(super) fn named(pairs: &[(&str, u32)]) -> Vec<(String, u32)> {
    pairs
        .iter()
        .map(|(name, index)| ((*name).to_owned(), *index))
        .collect()
}

#[fixture]
pub(super) fn board() -> Board {
    let store = Arc::new(InMemoryBoardStore::new());
    Board {
        projects: ProjectService::new(Arc::clone(&store)),
        columns: ColumnOrderingService::new(Arc::clone(&store)),
        tasks: TaskOrderingService::new(Arc::clone(&store)),
        comments: CommentService::new(Arc::clone(&store), Arc::new(StepClock::new())),
        store,
    }
}
