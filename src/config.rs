//! Environment-driven configuration for the board store.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TASKER_STORE` | `memory` | `memory` or `postgres` |
//! | `DATABASE_URL` | assembled | full `PostgreSQL` connection URL |
//! | `POSTGRES_HOST` | `localhost` | used when `DATABASE_URL` is unset |
//! | `POSTGRES_PORT` | `5432` | |
//! | `POSTGRES_USER` | `postgres` | |
//! | `POSTGRES_PASSWORD` | empty | |
//! | `POSTGRES_DBNAME` | `tasker` | |
//! | `POSTGRES_SSLMODE` | `disable` | |
//! | `TASKER_PG_POOL_SIZE` | `10` | maximum pooled connections |

use thiserror::Error;

const DEFAULT_POOL_SIZE: u32 = 10;

/// Which backing store the board runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local maps; state is lost on exit.
    Memory,
    /// A `PostgreSQL` database.
    Postgres {
        /// Connection URL.
        database_url: String,
        /// Maximum number of pooled connections.
        pool_size: u32,
    },
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `TASKER_STORE` names no known backend.
    #[error("unknown store backend '{0}'; expected 'memory' or 'postgres'")]
    UnknownBackend(String),
    /// `TASKER_PG_POOL_SIZE` is not a positive integer.
    #[error("invalid pool size '{0}'; expected a positive integer")]
    InvalidPoolSize(String),
}

/// Runtime configuration of the board store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    backend: StoreBackend,
}

impl BoardConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unsupported value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a variable holds an unsupported value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store = lookup("TASKER_STORE").unwrap_or_else(|| "memory".to_owned());
        let backend = match store.trim().to_ascii_lowercase().as_str() {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: database_url(&lookup),
                pool_size: pool_size(&lookup)?,
            },
            _ => return Err(ConfigError::UnknownBackend(store)),
        };
        Ok(Self { backend })
    }

    /// Returns the selected backend.
    #[must_use]
    pub const fn backend(&self) -> &StoreBackend {
        &self.backend
    }
}

fn database_url<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL") {
        return url;
    }
    let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());
    let host = var("POSTGRES_HOST", "localhost");
    let port = var("POSTGRES_PORT", "5432");
    let user = var("POSTGRES_USER", "postgres");
    let password = var("POSTGRES_PASSWORD", "");
    let dbname = var("POSTGRES_DBNAME", "tasker");
    let sslmode = var("POSTGRES_SSLMODE", "disable");
    let credentials = if password.is_empty() {
        user
    } else {
        format!("{user}:{password}")
    };
    format!("postgres://{credentials}@{host}:{port}/{dbname}?sslmode={sslmode}")
}

fn pool_size<F>(lookup: &F) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup("TASKER_PG_POOL_SIZE") else {
        return Ok(DEFAULT_POOL_SIZE);
    };
    match raw.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidPoolSize(raw)),
    }
}
