//! Test fixtures: record builders and an in-memory order store

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use board_client::{ClientError, ClientResult, OrderStore, StatusCode};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use shared::{Dish, OrderRecord, ReservationRecord};

fn base_time() -> DateTime<Utc> {
    "2024-05-01T12:00:00Z".parse().unwrap()
}

/// Order created `minute` minutes after a fixed base time
pub fn order(id: &str, table: u32, delivered: bool, minute: i64) -> OrderRecord {
    OrderRecord {
        id: id.to_string(),
        table_number: table,
        dishes: vec![Dish::new("Paella", 2), Dish::new("Water", 1)],
        is_delivered: delivered,
        created_at: base_time() + Duration::minutes(minute),
        token_id: None,
    }
}

pub fn reservation(name: &str) -> ReservationRecord {
    ReservationRecord {
        name: name.to_string(),
        phone: "600123123".to_string(),
        persons: 2,
        date: "2024-05-02".to_string(),
        time: "21:00".to_string(),
    }
}

/// In-memory order store with failure switches and call counters
#[derive(Default)]
pub struct MemoryStore {
    orders: Mutex<Vec<OrderRecord>>,
    reservations: Mutex<Vec<ReservationRecord>>,
    read_failure: Mutex<Option<StatusCode>>,
    mark_rejection: Mutex<Option<String>>,
    order_fetches: AtomicUsize,
    reservation_fetches: AtomicUsize,
    mark_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with_orders(orders: Vec<OrderRecord>) -> Self {
        let store = Self::default();
        *store.orders.lock() = orders;
        store
    }

    pub fn set_orders(&self, orders: Vec<OrderRecord>) {
        *self.orders.lock() = orders;
    }

    pub fn set_reservations(&self, reservations: Vec<ReservationRecord>) {
        *self.reservations.lock() = reservations;
    }

    pub fn fail_reads(&self, status: Option<StatusCode>) {
        *self.read_failure.lock() = status;
    }

    pub fn reject_marks(&self, message: &str) {
        *self.mark_rejection.lock() = Some(message.to_string());
    }

    pub fn order_fetches(&self) -> usize {
        self.order_fetches.load(Ordering::SeqCst)
    }

    pub fn reservation_fetches(&self) -> usize {
        self.reservation_fetches.load(Ordering::SeqCst)
    }

    pub fn mark_calls(&self) -> usize {
        self.mark_calls.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> ClientResult<()> {
        match *self.read_failure.lock() {
            Some(status) => Err(ClientError::from_status(status)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn fetch_orders(&self) -> ClientResult<Vec<OrderRecord>> {
        self.order_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        Ok(self.orders.lock().clone())
    }

    async fn fetch_reservations(&self) -> ClientResult<Vec<ReservationRecord>> {
        self.reservation_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_read()?;
        Ok(self.reservations.lock().clone())
    }

    async fn mark_as_delivered(&self, order_id: &str) -> ClientResult<()> {
        self.mark_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.mark_rejection.lock().clone() {
            return Err(ClientError::Rejected(message));
        }
        if let Some(order) = self.orders.lock().iter_mut().find(|o| o.id == order_id) {
            order.is_delivered = true;
        }
        Ok(())
    }
}
