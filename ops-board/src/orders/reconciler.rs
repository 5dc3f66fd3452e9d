//! Order snapshot reconciliation
//!
//! Turns a freshly fetched order snapshot into the board's authoritative
//! order list plus its derived counters, and decides whether the batch
//! warrants a new-order notification.
//!
//! # Notification heuristic
//!
//! A notification fires when the snapshot holds more orders than the
//! previous one. Identities are not compared: an order added while another
//! disappears in the same interval goes unnoticed, and a store that drops
//! and re-adds orders notifies again. The board keeps this behavior.

use std::collections::HashSet;

use shared::OrderRecord;

use super::Counters;

/// Result of reconciling one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Snapshot sorted newest first
    pub orders: Vec<OrderRecord>,
    pub counters: Counters,
    pub should_notify: bool,
}

/// Reconcile a fresh snapshot against the previous order count
///
/// Pure: no I/O, no access to board state.
pub fn reconcile(previous_order_count: usize, fresh_snapshot: Vec<OrderRecord>) -> Reconciliation {
    let should_notify = fresh_snapshot.len() > previous_order_count;

    let mut orders = fresh_snapshot;
    sort_newest_first(&mut orders);
    let counters = Counters::from_orders(&orders);

    Reconciliation {
        orders,
        counters,
        should_notify,
    }
}

/// Stable sort by `created_at` descending; equal timestamps keep fetch order
pub fn sort_newest_first(orders: &mut [OrderRecord]) {
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

/// Keep the delivered flag of orders already delivered locally
///
/// A fetch that left the store before a delivery was confirmed carries the
/// old `is_delivered = false`; committing it as-is would undo the delivery.
/// Returns the number of orders whose flag was carried over.
pub fn carry_delivered(local: &[OrderRecord], fresh: &mut [OrderRecord]) -> usize {
    let delivered: HashSet<&str> = local
        .iter()
        .filter(|o| o.is_delivered)
        .map(|o| o.id.as_str())
        .collect();

    if delivered.is_empty() {
        return 0;
    }

    let mut carried = 0;
    for order in fresh.iter_mut() {
        if !order.is_delivered && delivered.contains(order.id.as_str()) {
            order.is_delivered = true;
            carried += 1;
        }
    }
    carried
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::order;

    #[test]
    fn test_sorts_newest_first() {
        let fresh = vec![
            order("a", 1, false, 5),
            order("b", 2, false, 30),
            order("c", 3, false, 10),
        ];

        let result = reconcile(0, fresh);
        let ids: Vec<_> = result.orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_fetch_order() {
        let fresh = vec![
            order("first", 1, false, 10),
            order("second", 2, false, 10),
            order("newer", 3, false, 20),
            order("third", 4, false, 10),
        ];

        let once = reconcile(0, fresh.clone());
        let ids: Vec<_> = once.orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["newer", "first", "second", "third"]);

        // Same snapshot again, same ordering
        let twice = reconcile(4, fresh);
        assert_eq!(once.orders, twice.orders);
    }

    #[test]
    fn test_counters_match_definitions() {
        let fresh = vec![
            order("o1", 0, false, 1),
            order("o2", 0, false, 2),
            order("o3", 0, true, 3),
            order("o4", 6, false, 4),
            order("o5", 6, true, 5),
        ];

        let result = reconcile(0, fresh);
        assert_eq!(result.counters.pending, 3);
        assert_eq!(result.counters.new_orders, result.counters.pending);
        assert_eq!(result.counters.takeaway, 2);
    }

    #[test]
    fn test_notify_boundary() {
        let three = || {
            vec![
                order("o1", 1, false, 1),
                order("o2", 2, false, 2),
                order("o3", 3, false, 3),
            ]
        };

        assert!(reconcile(2, three()).should_notify);
        assert!(!reconcile(3, three()).should_notify);
        assert!(!reconcile(4, three()).should_notify);
        assert!(!reconcile(0, Vec::new()).should_notify);
    }

    #[test]
    fn test_new_undelivered_order_notifies() {
        let fresh = vec![
            order("o1", 1, true, 1),
            order("o2", 2, true, 2),
            order("o3", 3, false, 3),
            order("o4", 5, false, 4),
        ];

        let result = reconcile(3, fresh);
        assert!(result.should_notify);
        assert_eq!(result.counters.pending, 2);
        assert!(result.orders.iter().any(|o| o.id == "o4" && o.is_pending()));
    }

    #[test]
    fn test_same_count_swap_does_not_notify() {
        // o2 disappears while o3 arrives: the count heuristic misses it
        let result = reconcile(2, vec![order("o1", 1, false, 1), order("o3", 2, false, 3)]);
        assert!(!result.should_notify);
    }

    #[test]
    fn test_carry_delivered() {
        let local = vec![order("o1", 0, true, 1), order("o2", 3, false, 2)];
        let mut fresh = vec![
            order("o1", 0, false, 1),
            order("o2", 3, false, 2),
            order("o3", 4, false, 3),
        ];

        let carried = carry_delivered(&local, &mut fresh);
        assert_eq!(carried, 1);
        assert!(fresh[0].is_delivered);
        assert!(!fresh[1].is_delivered);
        assert!(!fresh[2].is_delivered);
    }
}
