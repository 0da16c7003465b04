//! Unit-of-work implementation over [`BoardState`].

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use super::{journal::JournaledState, state::BoardState};
use crate::board::ports::{BoardStore, BoardTransaction, RepositoryError};

/// Thread-safe in-memory board store.
///
/// Reads share a read lock. A write holds the write lock for the whole unit
/// of work and journals every record it changes; when the work fails the
/// journal is replayed backwards. Clones share the same underlying maps.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardStore {
    state: Arc<RwLock<BoardState>>,
}

impl InMemoryBoardStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        let state = self.state.read().map_err(|err| E::from(poisoned(err)))?;
        work(&*state)
    }

    async fn write<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        let mut state = self.state.write().map_err(|err| E::from(poisoned(err)))?;
        let mut journal = JournaledState::new(&mut *state);
        let outcome = work(&mut journal);
        if outcome.is_err() {
            let undone = journal.rollback();
            tracing::warn!(undone, "in-memory unit of work failed; discarding its writes");
        }
        outcome
    }
}
