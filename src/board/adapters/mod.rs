//! Adapter implementations for board persistence ports.

pub mod memory;
pub mod postgres;
