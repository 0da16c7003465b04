//! `PostgreSQL` unit of work backed by an r2d2 connection pool.

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::Error as DieselError;

use super::transaction::PgBoardTransaction;
use crate::board::ports::{BoardStore, BoardTransaction, RepositoryError, RepositoryResult};

/// `PostgreSQL` connection pool type used by board adapters.
pub type BoardPgPool = Pool<ConnectionManager<PgConnection>>;

const BOARD_SCHEMA: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_board_tables/up.sql");

/// `PostgreSQL`-backed board store.
///
/// Every unit of work runs on the blocking thread pool inside a single
/// database transaction. Writes use `SERIALIZABLE` isolation so two ordering
/// operations on the same parent cannot interleave their reads and writes.
#[derive(Debug, Clone)]
pub struct PostgresBoardStore {
    pool: BoardPgPool,
}

impl PostgresBoardStore {
    /// Creates a store from an existing connection pool.
    #[must_use]
    pub const fn new(pool: BoardPgPool) -> Self {
        Self { pool }
    }

    /// Builds a connection pool for `database_url` holding at most
    /// `max_size` connections.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when the pool cannot open its
    /// initial connections.
    pub fn connect(database_url: &str, max_size: u32) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(max_size)
            .build(manager)
            .map_err(RepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the board tables when they do not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Persistence`] when a connection cannot be
    /// acquired or the DDL fails.
    pub async fn apply_schema(&self) -> RepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(BOARD_SCHEMA)
                .map_err(RepositoryError::persistence)
        })
        .await?;
        tracing::info!("board schema applied");
        Ok(())
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| E::from(RepositoryError::persistence(err)))?;
            f(&mut connection)
        })
        .await
        .map_err(|err| E::from(RepositoryError::persistence(err)))?
    }
}

/// Failure of a unit of work: either the work itself or the database
/// transaction around it.
enum TxError<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TxError<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl<E> TxError<E>
where
    E: From<RepositoryError>,
{
    fn into_inner(self) -> E {
        match self {
            Self::Work(err) => err,
            Self::Database(err) => E::from(RepositoryError::persistence(err)),
        }
    }
}

#[async_trait]
impl BoardStore for PostgresBoardStore {
    async fn read<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            connection
                .build_transaction()
                .read_only()
                .run(|tx_connection| {
                    let tx = PgBoardTransaction::new(tx_connection);
                    work(&tx).map_err(TxError::Work)
                })
                .map_err(TxError::into_inner)
        })
        .await
    }

    async fn write<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn BoardTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<RepositoryError> + Send + 'static,
    {
        let outcome = self
            .run_blocking(move |connection| {
                connection
                    .build_transaction()
                    .serializable()
                    .run(|tx_connection| {
                        let mut tx = PgBoardTransaction::new(tx_connection);
                        work(&mut tx).map_err(TxError::Work)
                    })
                    .map_err(TxError::into_inner)
            })
            .await;
        if outcome.is_err() {
            tracing::warn!("postgres unit of work failed; transaction rolled back");
        }
        outcome
    }
}
