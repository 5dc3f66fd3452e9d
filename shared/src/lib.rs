//! Shared types for the operations board
//!
//! Order and reservation records as served by the remote order store,
//! the request/response envelopes of its HTTP API, and record validation.
//! Used by both `board-client` and `ops-board`.

pub mod client;
pub mod error;
pub mod models;
pub mod serde_helpers;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::ValidationError;
pub use models::{Dish, OrderRecord, ReservationRecord, TAKEAWAY_TABLE};
