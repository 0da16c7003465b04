//! Then steps for board ordering BDD scenarios.

use super::world::{BoardWorld, names, run_async};
use rstest_bdd_macros::then;
use tasker::board::services::BoardServiceError;

fn positions_are_contiguous(indices: impl IntoIterator<Item = u32>) -> bool {
    (1_u32..).zip(indices).all(|(expected, actual)| expected == actual)
}

#[then(r#"the columns are "{columns}""#)]
fn columns_are(world: &BoardWorld, columns: String) -> Result<(), eyre::Report> {
    let listed = run_async(world.columns.list_columns(world.project_id()?))?;
    let actual: Vec<String> = listed.iter().map(|c| c.name().to_owned()).collect();
    let expected = names(&columns);
    if actual != expected {
        return Err(eyre::eyre!("expected columns {expected:?}, found {actual:?}"));
    }
    if !positions_are_contiguous(listed.iter().map(|c| c.index().get())) {
        return Err(eyre::eyre!("column positions are not contiguous"));
    }
    Ok(())
}

#[then(r#"column "{column}" holds tasks "{tasks}""#)]
fn column_holds(world: &BoardWorld, column: String, tasks: String) -> Result<(), eyre::Report> {
    let listed = run_async(world.tasks.list_tasks(world.column_id(&column)?))?;
    let actual: Vec<String> = listed.iter().map(|t| t.name().to_owned()).collect();
    let expected = names(&tasks);
    if actual != expected {
        return Err(eyre::eyre!(
            "expected tasks {expected:?} in {column}, found {actual:?}"
        ));
    }
    if !positions_are_contiguous(listed.iter().map(|t| t.index().get())) {
        return Err(eyre::eyre!("task positions in {column} are not contiguous"));
    }
    Ok(())
}

#[then("the operation fails with a missing neighbour")]
fn fails_with_missing_neighbour(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    if !result.as_ref().is_err_and(BoardServiceError::is_not_found) {
        return Err(eyre::eyre!("expected a not-found error, got {result:?}"));
    }
    Ok(())
}

#[then("the operation fails because the column is the last one")]
fn fails_with_last_column(world: &BoardWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing operation result"))?;
    if !matches!(result, Err(BoardServiceError::LastColumn(_))) {
        return Err(eyre::eyre!("expected LastColumn error, got {result:?}"));
    }
    Ok(())
}
