//! Request/response types of the order store HTTP API
//!
//! These types are shared between board-client and the test doubles
//! that stand in for the order store.

use serde::{Deserialize, Serialize};

use serde_json::Value;

// =============================================================================
// Orders
// =============================================================================

/// `GET /getOrders` response body
///
/// Records stay raw; each one is decoded on its own so a single bad record
/// does not reject the snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Value>,
}

/// `POST /markAsDelivered` request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkDeliveredRequest {
    pub order_id: String,
}

/// `POST /markAsDelivered` response body
///
/// Empty object on success; `error` is set when the store refused the update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MarkDeliveredResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// =============================================================================
// Reservations
// =============================================================================

/// `GET /getReservations` response body
///
/// Raw records, decoded one by one like [`OrdersResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<Value>,
}
