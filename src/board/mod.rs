//! Board position maintenance for Tasker.
//!
//! A project owns an ordered sequence of columns and each column an ordered
//! sequence of tasks. The services in this module keep the 1-based indices of
//! every sibling group contiguous while columns and tasks are created, moved,
//! relocated and deleted. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
