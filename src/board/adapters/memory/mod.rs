//! In-memory board store.
//!
//! The reference backing store used by tests and the demonstration binary.

mod journal;
mod state;
mod store;

pub use store::InMemoryBoardStore;
