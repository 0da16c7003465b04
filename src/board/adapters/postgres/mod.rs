//! `PostgreSQL` adapter for board persistence.
//!
//! Ordering constraints (`UNIQUE (parent, position)`) are deferred to commit
//! so a unit of work may pass through intermediate states where two siblings
//! briefly share an index.

mod models;
mod schema;
mod store;
mod transaction;

pub use store::{BoardPgPool, PostgresBoardStore};
