//! Board events
//!
//! Every committed change is published on a broadcast channel. Consumers
//! decide what a notification looks like (sound, banner, log line); the
//! board only decides that one is due.

use serde::Serialize;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use crate::orders::Counters;

/// Event published after a board write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    /// A fetched snapshot replaced the order list
    OrdersReconciled { total: usize, counters: Counters },
    /// The snapshot grew since the previous reconciliation
    NewOrders { total: usize, previous: usize },
    /// An order was flagged delivered locally after the store confirmed it
    OrderDelivered { order_id: String, counters: Counters },
    /// The reservation list was replaced
    ReservationsLoaded { total: usize },
    /// A read failed; the previous data stays on the board
    FetchFailed { message: String },
    /// A delivery update was refused; local state is unchanged
    MutationFailed { order_id: String, message: String },
}

/// Log board events until shutdown
///
/// Registered as a `TaskKind::Listener` by the binary.
pub async fn log_events(mut rx: broadcast::Receiver<BoardEvent>, shutdown: CancellationToken) {
    loop {
        let event = tokio::select! {
            _ = shutdown.cancelled() => break,
            event = rx.recv() => event,
        };

        match event {
            Ok(BoardEvent::NewOrders { total, previous }) => {
                tracing::info!(target: "notify", total, previous, "🔔 New orders received");
            }
            Ok(BoardEvent::OrdersReconciled { total, counters }) => {
                tracing::info!(
                    total,
                    pending = counters.pending,
                    takeaway = counters.takeaway,
                    "Orders reconciled"
                );
            }
            Ok(BoardEvent::OrderDelivered { order_id, counters }) => {
                tracing::info!(order_id = %order_id, pending = counters.pending, "Order delivered");
            }
            Ok(BoardEvent::ReservationsLoaded { total }) => {
                tracing::info!(total, "Reservations loaded");
            }
            Ok(BoardEvent::FetchFailed { message }) => {
                tracing::warn!(error = %message, "Fetch failed, keeping last known data");
            }
            Ok(BoardEvent::MutationFailed { order_id, message }) => {
                tracing::warn!(order_id = %order_id, error = %message, "Delivery update refused");
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event listener lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
