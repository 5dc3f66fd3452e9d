//! Order store trait
//!
//! The board only talks to the store through this trait, so tests can swap
//! the network client for an in-memory double.

use async_trait::async_trait;

use crate::ClientResult;
use shared::{OrderRecord, ReservationRecord};

/// Remote order store operations
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// One read of every order, in store order
    async fn fetch_orders(&self) -> ClientResult<Vec<OrderRecord>>;

    /// One read of every reservation
    async fn fetch_reservations(&self) -> ClientResult<Vec<ReservationRecord>>;

    /// Ask the store to flag an order as delivered
    ///
    /// Idempotent on the store side: repeating it for a delivered order succeeds.
    async fn mark_as_delivered(&self, order_id: &str) -> ClientResult<()>;
}
