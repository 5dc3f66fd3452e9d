//! Mark-delivered action
//!
//! The store is asked first; only a confirmed update touches local state.
//! The local patch then adjusts the counters by hand instead of recounting,
//! so it must land on exactly what `Counters::from_orders` would compute.

use std::sync::Arc;

use board_client::OrderStore;
use shared::OrderRecord;

use super::Counters;
use crate::core::{Board, BoardError, BoardResult};

/// What the local patch did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The order flipped to delivered and the counters were adjusted
    Delivered,
    /// The order was already delivered; nothing changed
    AlreadyDelivered,
    /// No such order on the board; nothing changed
    NotFound,
}

/// Flag one order delivered and adjust the counters
pub fn apply_delivered(
    orders: &mut [OrderRecord],
    counters: &mut Counters,
    order_id: &str,
) -> MarkOutcome {
    let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
        return MarkOutcome::NotFound;
    };

    if order.is_delivered {
        return MarkOutcome::AlreadyDelivered;
    }

    order.is_delivered = true;
    counters.record_delivery(order);
    MarkOutcome::Delivered
}

/// Runs staff actions against the store and the board
#[derive(Clone)]
pub struct ActionApplier {
    board: Arc<Board>,
    store: Arc<dyn OrderStore>,
}

impl ActionApplier {
    pub fn new(board: Arc<Board>, store: Arc<dyn OrderStore>) -> Self {
        Self { board, store }
    }

    /// Mark an order delivered
    ///
    /// On a store failure the error is put in the board's error slot and
    /// returned; the order list and counters are left alone.
    pub async fn mark_delivered(&self, order_id: &str) -> BoardResult<MarkOutcome> {
        if let Err(e) = self.store.mark_as_delivered(order_id).await {
            let err = BoardError::Mutation(e);
            tracing::warn!(order_id = %order_id, error = %err, "Failed to mark order as delivered");
            self.board.record_mutation_error(order_id, &err);
            return Err(err);
        }

        let outcome = self.board.apply_delivered(order_id);
        match outcome {
            MarkOutcome::Delivered => {
                tracing::info!(order_id = %order_id, "Order marked as delivered");
            }
            MarkOutcome::AlreadyDelivered => {
                tracing::debug!(order_id = %order_id, "Order was already delivered");
            }
            MarkOutcome::NotFound => {
                tracing::warn!(order_id = %order_id, "Delivered order is not on the board");
            }
        }
        Ok(outcome)
    }
}
