//! Order poller
//!
//! Fetches orders and reservations once at startup, then orders every
//! `interval` and whenever a refresh is requested. Reservations are not
//! refreshed after startup.
//!
//! Registered as a `TaskKind::Periodic` task; stops when the shutdown token
//! is cancelled, including in the middle of a fetch.

use std::sync::Arc;
use std::time::Duration;

use board_client::OrderStore;
use shared::{OrderRecord, ReservationRecord};
use tokio::sync::Notify;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::core::{Board, BoardError, ReconcileOutcome};

/// Requests an immediate order fetch from a running poller
#[derive(Clone)]
pub struct PollerHandle {
    refresh: Arc<Notify>,
}

impl PollerHandle {
    /// Fetch orders now instead of waiting for the next tick
    ///
    /// Requests made while a fetch is running collapse into one extra fetch.
    pub fn refresh(&self) {
        self.refresh.notify_one();
    }
}

/// Periodic order poller
pub struct Poller {
    board: Arc<Board>,
    store: Arc<dyn OrderStore>,
    interval: Duration,
    shutdown: CancellationToken,
    refresh: Arc<Notify>,
}

impl Poller {
    pub fn new(
        board: Arc<Board>,
        store: Arc<dyn OrderStore>,
        interval: Duration,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            board,
            store,
            interval,
            shutdown,
            refresh: Arc::new(Notify::new()),
        }
    }

    pub fn handle(&self) -> PollerHandle {
        PollerHandle {
            refresh: self.refresh.clone(),
        }
    }

    /// Main loop: startup fetch, then periodic fetches until shutdown
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Order poller started");

        let startup = async {
            tokio::join!(self.poll_orders(), self.poll_reservations());
        };
        tokio::select! {
            _ = self.shutdown.cancelled() => {
                tracing::info!("Order poller stopped during startup");
                return;
            }
            _ = startup => {}
        }

        let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = ticker.tick() => {
                    tracing::debug!("Poll tick");
                }
                _ = self.refresh.notified() => {
                    tracing::debug!("Refresh requested");
                    ticker.reset();
                }
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = self.poll_orders() => {}
            }
        }

        tracing::info!("Order poller stopped");
    }

    /// One order fetch; the board is only written once the fetch completes
    pub async fn poll_orders(&self) -> Option<ReconcileOutcome> {
        match self.store.fetch_orders().await {
            Ok(fresh) => {
                let outcome = self.board.commit_orders(retain_valid_orders(fresh));
                tracing::debug!(
                    total = outcome.total,
                    pending = outcome.counters.pending,
                    notify = outcome.should_notify,
                    "Orders fetched"
                );
                Some(outcome)
            }
            Err(e) => {
                let err = BoardError::Fetch(e);
                tracing::warn!(error = %err, "Failed to fetch orders");
                self.board.record_fetch_error(&err);
                None
            }
        }
    }

    /// One reservation fetch
    pub async fn poll_reservations(&self) -> bool {
        match self.store.fetch_reservations().await {
            Ok(fresh) => {
                self.board.commit_reservations(retain_valid_reservations(fresh));
                true
            }
            Err(e) => {
                let err = BoardError::Fetch(e);
                tracing::warn!(error = %err, "Failed to fetch reservations");
                self.board.record_fetch_error(&err);
                false
            }
        }
    }
}

/// Drop records that break the model invariants, keep the rest
fn retain_valid_orders(mut orders: Vec<OrderRecord>) -> Vec<OrderRecord> {
    orders.retain(|order| match order.validate() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(order_id = %order.id, error = %e, "Dropping invalid order");
            false
        }
    });
    orders
}

fn retain_valid_reservations(mut reservations: Vec<ReservationRecord>) -> Vec<ReservationRecord> {
    reservations.retain(|reservation| match reservation.validate() {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Dropping invalid reservation");
            false
        }
    });
    reservations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{order, reservation, MemoryStore};
    use board_client::StatusCode;

    const INTERVAL: Duration = Duration::from_secs(10);

    fn setup(store: MemoryStore) -> (Arc<Board>, Arc<MemoryStore>, CancellationToken, Poller) {
        let board = Arc::new(Board::new(10, 64));
        let store = Arc::new(store);
        let shutdown = CancellationToken::new();
        let poller = Poller::new(board.clone(), store.clone(), INTERVAL, shutdown.clone());
        (board, store, shutdown, poller)
    }

    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetches_at_startup_then_every_interval() {
        let store = MemoryStore::with_orders(vec![order("o1", 2, false, 1)]);
        store.set_reservations(vec![reservation("Marta")]);
        let (board, store, shutdown, poller) = setup(store);

        let task = tokio::spawn(poller.run());
        settle().await;
        assert_eq!(store.order_fetches(), 1);
        assert_eq!(store.reservation_fetches(), 1);
        assert_eq!(board.snapshot().orders.len(), 1);
        assert_eq!(board.snapshot().reservations.len(), 1);

        tokio::time::sleep(INTERVAL + Duration::from_millis(1)).await;
        settle().await;
        assert_eq!(store.order_fetches(), 2);

        tokio::time::sleep(INTERVAL).await;
        settle().await;
        assert_eq!(store.order_fetches(), 3);
        // Reservations are only loaded once
        assert_eq!(store.reservation_fetches(), 1);

        shutdown.cancel();
        task.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_shutdown() {
        let (_board, store, shutdown, poller) = setup(MemoryStore::default());

        let task = tokio::spawn(poller.run());
        settle().await;
        assert_eq!(store.order_fetches(), 1);

        shutdown.cancel();
        task.await.unwrap();

        tokio::time::sleep(INTERVAL * 5).await;
        settle().await;
        assert_eq!(store.order_fetches(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_fetches_immediately() {
        let (board, store, shutdown, poller) = setup(MemoryStore::default());
        let handle = poller.handle();

        let task = tokio::spawn(poller.run());
        settle().await;
        assert_eq!(store.order_fetches(), 1);

        store.set_orders(vec![order("o1", 3, false, 1)]);
        handle.refresh();
        settle().await;
        assert_eq!(store.order_fetches(), 2);
        assert_eq!(board.snapshot().orders.len(), 1);

        shutdown.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_orders() {
        let store = MemoryStore::with_orders(vec![order("o1", 2, false, 1), order("o2", 0, false, 2)]);
        let (board, store, _shutdown, poller) = setup(store);

        poller.poll_orders().await.unwrap();
        let before = board.snapshot();

        store.fail_reads(Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(poller.poll_orders().await.is_none());

        let after = board.snapshot();
        assert_eq!(after.orders, before.orders);
        assert_eq!(after.counters, before.counters);
        assert_eq!(after.error.as_deref(), Some("Error: Internal Server Error"));
        assert!(!after.loading);

        // Next successful poll clears the error
        store.fail_reads(None);
        poller.poll_orders().await.unwrap();
        assert_eq!(board.snapshot().error, None);
    }

    #[tokio::test]
    async fn test_first_fetch_failure_clears_loading() {
        let store = MemoryStore::default();
        store.fail_reads(Some(StatusCode::BAD_GATEWAY));
        let (board, _store, _shutdown, poller) = setup(store);

        assert!(board.snapshot().loading);
        assert!(!poller.poll_reservations().await);

        let state = board.snapshot();
        assert!(!state.loading);
        assert!(state.orders.is_empty());
        assert_eq!(state.error.as_deref(), Some("Error: Bad Gateway"));
    }

    #[tokio::test]
    async fn test_invalid_records_are_dropped() {
        let mut broken = order("o2", 4, false, 2);
        broken.dishes.clear();
        let store = MemoryStore::with_orders(vec![order("o1", 4, false, 1), broken]);
        let (board, _store, _shutdown, poller) = setup(store);

        let outcome = poller.poll_orders().await.unwrap();
        assert_eq!(outcome.total, 1);
        assert_eq!(board.snapshot().orders[0].id, "o1");
    }
}
