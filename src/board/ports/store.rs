//! Unit-of-work port grouping repository calls into one atomic operation.

use super::{BoardTransaction, RepositoryError};
use async_trait::async_trait;

/// Entry point to a board backing store.
///
/// Every ordering operation runs inside exactly one unit of work, so its
/// reads and writes are isolated from concurrent operations and either all
/// take effect or none do.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Runs `work` with shared, read-only access to the repositories.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a
    /// [`RepositoryError::Persistence`] converted into `E` when the store
    /// cannot provide access.
    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static;

    /// Runs `work` with exclusive access to the repositories and commits its
    /// writes only when it returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work` after discarding its writes, or a
    /// [`RepositoryError::Persistence`] converted into `E` when the store
    /// cannot begin or commit.
    async fn write<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static;
}
