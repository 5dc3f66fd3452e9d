//! Board state
//!
//! One record holds everything the board shows: orders, counters,
//! reservations, the loading/error flags and the current selection.
//! Writers take the lock once, commit, and release it before publishing the
//! matching [`BoardEvent`]; readers get a cloned [`BoardState`]. No lock is
//! held across an `.await`.

use parking_lot::RwLock;
use shared::{OrderRecord, ReservationRecord};
use tokio::sync::broadcast;

use super::error::{BoardError, BoardResult};
use super::events::BoardEvent;
use crate::orders::applier::{self, MarkOutcome};
use crate::orders::reconciler;
use crate::orders::Counters;
use crate::reservations::ReservationStore;
use crate::view::{self, BoardView, MenuOption};

/// Snapshot of the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    /// Latest reconciled snapshot, newest first
    pub orders: Vec<OrderRecord>,
    pub counters: Counters,
    /// Snapshot size at the last reconciliation (notification baseline)
    pub last_order_count: usize,
    pub reservations: ReservationStore,
    /// Set until the first fetch completes, successfully or not
    pub loading: bool,
    /// Shared error slot for fetch and mutation failures
    pub error: Option<String>,
    pub menu_option: MenuOption,
    pub selected_table: Option<u32>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self {
            orders: Vec::new(),
            counters: Counters::default(),
            last_order_count: 0,
            reservations: ReservationStore::default(),
            loading: true,
            error: None,
            menu_option: MenuOption::default(),
            selected_table: None,
        }
    }
}

/// Summary of a committed reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub total: usize,
    pub counters: Counters,
    pub should_notify: bool,
    /// Orders whose local delivered flag survived a stale snapshot
    pub carried_delivered: usize,
}

/// The shared board
pub struct Board {
    state: RwLock<BoardState>,
    table_count: u32,
    events: broadcast::Sender<BoardEvent>,
}

impl Board {
    /// Create an empty board showing tables `1..=table_count`
    pub fn new(table_count: u32, event_capacity: usize) -> Self {
        let (events, _) = broadcast::channel(event_capacity.max(1));
        Self {
            state: RwLock::new(BoardState::default()),
            table_count,
            events,
        }
    }

    pub fn table_count(&self) -> u32 {
        self.table_count
    }

    /// Subscribe to board events
    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    /// Current state, cloned
    pub fn snapshot(&self) -> BoardState {
        self.state.read().clone()
    }

    /// Project the current state for display
    pub fn view(&self) -> BoardView {
        let state = self.state.read();
        view::project(&state, self.table_count)
    }

    // ========================================================================
    // Orders
    // ========================================================================

    /// Replace the order list with a freshly fetched snapshot
    pub fn commit_orders(&self, mut fresh: Vec<OrderRecord>) -> ReconcileOutcome {
        let (outcome, previous) = {
            let mut state = self.state.write();

            let carried_delivered = reconciler::carry_delivered(&state.orders, &mut fresh);
            let previous = state.last_order_count;
            let result = reconciler::reconcile(previous, fresh);

            let outcome = ReconcileOutcome {
                total: result.orders.len(),
                counters: result.counters,
                should_notify: result.should_notify,
                carried_delivered,
            };

            state.orders = result.orders;
            state.counters = result.counters;
            state.last_order_count = outcome.total;
            state.error = None;
            state.loading = false;

            (outcome, previous)
        };

        if outcome.carried_delivered > 0 {
            tracing::debug!(
                carried = outcome.carried_delivered,
                "Kept local delivered flags over stale snapshot"
            );
        }

        self.publish(BoardEvent::OrdersReconciled {
            total: outcome.total,
            counters: outcome.counters,
        });
        if outcome.should_notify {
            self.publish(BoardEvent::NewOrders {
                total: outcome.total,
                previous,
            });
        }

        outcome
    }

    /// Flag an order delivered after the store confirmed it
    pub fn apply_delivered(&self, order_id: &str) -> MarkOutcome {
        let (outcome, counters) = {
            let mut state = self.state.write();
            let state = &mut *state;
            let outcome = applier::apply_delivered(&mut state.orders, &mut state.counters, order_id);
            (outcome, state.counters)
        };

        if outcome == MarkOutcome::Delivered {
            self.publish(BoardEvent::OrderDelivered {
                order_id: order_id.to_string(),
                counters,
            });
        }

        outcome
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    /// Replace the reservation list with a freshly fetched snapshot
    pub fn commit_reservations(&self, fresh: Vec<ReservationRecord>) {
        let total = fresh.len();
        {
            let mut state = self.state.write();
            state.reservations.replace(fresh);
            state.error = None;
            state.loading = false;
        }
        self.publish(BoardEvent::ReservationsLoaded { total });
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Surface a failed read; orders and reservations stay as they were
    pub fn record_fetch_error(&self, err: &BoardError) {
        let message = err.user_message();
        {
            let mut state = self.state.write();
            state.error = Some(message.clone());
            state.loading = false;
        }
        self.publish(BoardEvent::FetchFailed { message });
    }

    /// Surface a refused delivery update; nothing else changes
    pub fn record_mutation_error(&self, order_id: &str, err: &BoardError) {
        let message = err.user_message();
        self.state.write().error = Some(message.clone());
        self.publish(BoardEvent::MutationFailed {
            order_id: order_id.to_string(),
            message,
        });
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Switch menu; the table selection is cleared
    pub fn select_menu(&self, menu_option: MenuOption) {
        let mut state = self.state.write();
        state.menu_option = menu_option;
        state.selected_table = None;
    }

    /// Select a table of the grid, or clear the selection with `None`
    pub fn select_table(&self, table: Option<u32>) -> BoardResult<()> {
        if let Some(n) = table
            && (n == 0 || n > self.table_count)
        {
            return Err(BoardError::InvalidTable(n));
        }
        self.state.write().selected_table = table;
        Ok(())
    }

    fn publish(&self, event: BoardEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
