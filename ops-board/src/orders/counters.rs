//! Derived order counters

use serde::Serialize;
use shared::OrderRecord;

/// Badge counters derived from the order list
///
/// `pending` and `new_orders` share one definition (undelivered orders);
/// they back two different menu badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub pending: usize,
    pub new_orders: usize,
    pub takeaway: usize,
}

impl Counters {
    /// Full recount over an order list
    pub fn from_orders(orders: &[OrderRecord]) -> Self {
        let pending = orders.iter().filter(|o| o.is_pending()).count();
        let takeaway = orders
            .iter()
            .filter(|o| o.is_pending() && o.is_takeaway())
            .count();

        Self {
            pending,
            new_orders: pending,
            takeaway,
        }
    }

    /// Adjust for one order flipping from undelivered to delivered
    ///
    /// Must only be called for an order that actually flipped, otherwise the
    /// counters drift from `from_orders`.
    pub fn record_delivery(&mut self, order: &OrderRecord) {
        self.pending = self.pending.saturating_sub(1);
        self.new_orders = self.new_orders.saturating_sub(1);
        if order.is_takeaway() {
            self.takeaway = self.takeaway.saturating_sub(1);
        }
    }
}
