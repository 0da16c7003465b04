//! End-to-end board scenarios through the public services.

use super::helpers::{Services, services};
use eyre::{Result, ensure};
use rstest::rstest;
use tasker::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{ColumnDirection, TaskDirection},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn first_of_two_tasks_moves_into_empty_right_column(
    services: Services<InMemoryBoardStore>,
) -> Result<()> {
    let (_, columns) = services.project_with_columns(&["next"]).await?;
    let [first, second] = columns.as_slice() else {
        eyre::bail!("expected two columns, found {}", columns.len());
    };
    let tasks = services.tasks_in(first.id(), &["10", "11"]).await?;
    let ten = tasks.first().map(|t| t.id()).ok_or_else(|| eyre::eyre!("no task"))?;

    services
        .tasks
        .move_task_across_columns(ten, ColumnDirection::Right)
        .await?;

    let left = services.tasks.list_tasks(first.id()).await?;
    let right = services.tasks.list_tasks(second.id()).await?;
    let summary = |tasks: &[tasker::board::domain::Task]| -> Vec<(String, u32)> {
        tasks
            .iter()
            .map(|t| (t.name().to_owned(), t.index().get()))
            .collect()
    };
    ensure!(summary(&left) == [("11".to_owned(), 1)], "left column: {left:?}");
    ensure!(summary(&right) == [("10".to_owned(), 1)], "right column: {right:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn cross_column_move_preserves_total_and_appends(
    services: Services<InMemoryBoardStore>,
) -> Result<()> {
    let (project, columns) = services.project_with_columns(&["doing"]).await?;
    let [todo, doing] = columns.as_slice() else {
        eyre::bail!("expected two columns");
    };
    let tasks = services.tasks_in(todo.id(), &["a", "b", "c"]).await?;
    services.tasks_in(doing.id(), &["x", "y"]).await?;
    let before = services.assert_board_contiguous(project.id()).await?;
    let c = tasks.get(2).map(|t| t.id()).ok_or_else(|| eyre::eyre!("no task"))?;

    services
        .tasks
        .move_task_across_columns(c, ColumnDirection::Right)
        .await?;

    let after = services.assert_board_contiguous(project.id()).await?;
    let moved = services.tasks.get_task(c).await?;
    let destination_count = services.tasks.list_tasks(doing.id()).await?.len();
    ensure!(before == after, "task count changed from {before} to {after}");
    ensure!(
        usize::try_from(moved.index().get())? == destination_count,
        "moved task should be last in its new column"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn working_a_board_end_to_end(services: Services<InMemoryBoardStore>) -> Result<()> {
    let (project, columns) = services
        .project_with_columns(&["doing", "review", "done"])
        .await?;
    let [todo, doing, review, done] = columns.as_slice() else {
        eyre::bail!("expected four columns");
    };
    let tasks = services
        .tasks_in(todo.id(), &["schema", "engine", "docs"])
        .await?;
    let docs = tasks.get(2).map(|t| t.id()).ok_or_else(|| eyre::eyre!("no task"))?;

    services
        .tasks
        .move_task_within_column(docs, TaskDirection::Up)
        .await?;
    services
        .tasks
        .move_task_across_columns(docs, ColumnDirection::Right)
        .await?;
    services
        .comments
        .create_comment("started on docs", docs)
        .await?;
    services.columns.move_column(done.id(), ColumnDirection::Left).await?;
    services.columns.delete_column(review.id()).await?;

    ensure!(
        services.task_names(todo.id()).await? == ["schema", "engine"],
        "todo column"
    );
    ensure!(services.task_names(doing.id()).await? == ["docs"], "doing column");
    let names: Vec<String> = services
        .columns
        .list_columns(project.id())
        .await?
        .iter()
        .map(|c| c.name().to_owned())
        .collect();
    ensure!(names == ["default", "doing", "done"], "columns: {names:?}");
    let comments = services.comments.list_comments(docs).await?;
    ensure!(comments.len() == 1, "comment should survive column moves");
    services.assert_board_contiguous(project.id()).await?;
    Ok(())
}
