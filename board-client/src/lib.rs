//! Board Client - HTTP client for the remote order store
//!
//! Provides network-based calls to the order store API consumed by the
//! operations board: `getOrders`, `getReservations` and `markAsDelivered`.

pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::NetworkOrderStore;
pub use store::OrderStore;

// Re-export shared types for convenience
pub use shared::client::{MarkDeliveredRequest, MarkDeliveredResponse, OrdersResponse, ReservationsResponse};
pub use shared::{Dish, OrderRecord, ReservationRecord};

// Status codes appear in `ClientError::Status`
pub use reqwest::StatusCode;
