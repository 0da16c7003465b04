//! Tasker: ordered project boards.
//!
//! This crate maintains the ordering of columns within projects and of tasks
//! within columns, keeping sibling positions contiguous under create, move
//! and delete operations.
//!
//! # Architecture
//!
//! Tasker follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`board`]: Projects, columns, tasks and comments with their ordering
//!   services
//! - [`config`]: Environment-driven store selection

pub mod board;
pub mod config;
