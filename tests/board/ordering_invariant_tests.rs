//! Contiguity and conservation checks over scripted operation sequences.

use super::helpers::{Services, services};
use eyre::{Result, bail};
use rstest::rstest;
use tasker::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{Column, ColumnDirection, ColumnId, ProjectId, TaskDirection, TaskId},
    services::{BoardServiceError, BoardServiceResult},
};

use ColumnDirection::{Left, Right};
use Op::{CreateColumn, CreateTask, DeleteColumn, DeleteTask, MoveAcross, MoveColumn, MoveTask};
use TaskDirection::{Down, Up};

/// One step of a script; `usize` operands pick a column or task by its
/// current listing position, wrapping around.
#[derive(Debug, Clone, Copy)]
enum Op {
    CreateColumn,
    MoveColumn(usize, ColumnDirection),
    DeleteColumn(usize),
    CreateTask(usize),
    MoveTask(usize, usize, TaskDirection),
    MoveAcross(usize, usize, ColumnDirection),
    DeleteTask(usize, usize),
}

struct Runner {
    services: Services<InMemoryBoardStore>,
    project_id: ProjectId,
    tasks: usize,
    created: usize,
}

impl Runner {
    async fn apply(&mut self, op: Op) -> Result<()> {
        let columns = self.services.columns.list_columns(self.project_id).await?;
        let pick = |i: usize| -> Option<ColumnId> {
            columns.get(i.checked_rem(columns.len())?).map(Column::id)
        };
        self.created += 1;
        let outcome: BoardServiceResult<isize> = match op {
            CreateColumn => self
                .services
                .columns
                .create_column(format!("column {}", self.created), self.project_id)
                .await
                .map(|_| 0),
            MoveColumn(i, direction) => match pick(i) {
                Some(id) => self.services.columns.move_column(id, direction).await.map(|()| 0),
                None => Ok(0),
            },
            DeleteColumn(i) => match pick(i) {
                Some(id) => self.services.columns.delete_column(id).await.map(|()| 0),
                None => Ok(0),
            },
            CreateTask(i) => match pick(i) {
                Some(id) => self
                    .services
                    .tasks
                    .create_task(format!("task {}", self.created), "", id)
                    .await
                    .map(|_| 1),
                None => Ok(0),
            },
            MoveTask(i, t, direction) => match self.pick_task(pick(i), t).await? {
                Some(id) => self
                    .services
                    .tasks
                    .move_task_within_column(id, direction)
                    .await
                    .map(|()| 0),
                None => Ok(0),
            },
            MoveAcross(i, t, direction) => match self.pick_task(pick(i), t).await? {
                Some(id) => self
                    .services
                    .tasks
                    .move_task_across_columns(id, direction)
                    .await
                    .map(|()| 0),
                None => Ok(0),
            },
            DeleteTask(i, t) => match self.pick_task(pick(i), t).await? {
                Some(id) => self.services.tasks.delete_task(id).await.map(|()| -1),
                None => Ok(0),
            },
        };
        match outcome {
            Ok(delta) => {
                self.tasks = self.tasks.checked_add_signed(delta).unwrap_or_default();
            }
            Err(err) if err.is_not_found() => {}
            Err(BoardServiceError::LastColumn(_)) => {}
            Err(err) => bail!("{op:?} failed unexpectedly: {err}"),
        }
        let total = self.services.assert_board_contiguous(self.project_id).await?;
        eyre::ensure!(
            total == self.tasks,
            "{op:?} changed the task count to {total}, expected {}",
            self.tasks
        );
        Ok(())
    }

    async fn pick_task(
        &self,
        column: Option<ColumnId>,
        t: usize,
    ) -> Result<Option<TaskId>> {
        let Some(column) = column else {
            return Ok(None);
        };
        let tasks = self.services.tasks.list_tasks(column).await?;
        Ok(t.checked_rem(tasks.len())
            .and_then(|slot| tasks.get(slot))
            .map(|task| task.id()))
    }
}

#[rstest]
#[case::columns_only(&[
    CreateColumn, CreateColumn, MoveColumn(0, Right), MoveColumn(2, Right),
    MoveColumn(1, Left), DeleteColumn(1), CreateColumn, DeleteColumn(0),
    DeleteColumn(0), DeleteColumn(0),
])]
#[case::tasks_in_one_column(&[
    CreateTask(0), CreateTask(0), CreateTask(0), CreateTask(0), MoveTask(0, 0, Down),
    MoveTask(0, 3, Down), MoveTask(0, 2, Up), DeleteTask(0, 1), MoveTask(0, 0, Up),
    DeleteTask(0, 0), CreateTask(0),
])]
#[case::mixed(&[
    CreateColumn, CreateColumn, CreateTask(0), CreateTask(0), CreateTask(1),
    CreateTask(2), MoveAcross(0, 0, Right), MoveAcross(1, 1, Right), MoveAcross(2, 0, Right),
    MoveAcross(0, 0, Left), DeleteColumn(1), MoveColumn(0, Right), CreateTask(1),
    MoveTask(1, 0, Down), DeleteColumn(0), MoveAcross(0, 0, Right), DeleteTask(0, 2),
    DeleteColumn(0), CreateTask(0),
])]
#[tokio::test(flavor = "multi_thread")]
async fn scripted_operations_keep_indices_contiguous(
    services: Services<InMemoryBoardStore>,
    #[case] script: &[Op],
) -> Result<()> {
    let (project, _) = services.project_with_columns(&[]).await?;
    let mut runner = Runner {
        services,
        project_id: project.id(),
        tasks: 0,
        created: 0,
    };
    for op in script {
        runner.apply(*op).await?;
    }
    Ok(())
}
