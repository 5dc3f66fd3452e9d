//! Data models
//!
//! Shared between board-client and ops-board. Field names follow the
//! order store's JSON (camelCase, Mongo-style `_id`).

pub mod order;
pub mod reservation;

// Re-exports
pub use order::*;
pub use reservation::*;
