//! HTTP client for the order store

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::DEFAULT_MARK_ERROR;
use crate::{ClientConfig, ClientError, ClientResult, OrderStore};
use shared::client::{MarkDeliveredRequest, MarkDeliveredResponse, OrdersResponse, ReservationsResponse};
use shared::{OrderRecord, ReservationRecord};

/// Network order store client
#[derive(Debug, Clone)]
pub struct NetworkOrderStore {
    client: Client,
    base_url: String,
}

impl NetworkOrderStore {
    /// Create a new client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Make a GET request; any non-2xx status is an error
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::from_status(status));
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl OrderStore for NetworkOrderStore {
    async fn fetch_orders(&self) -> ClientResult<Vec<OrderRecord>> {
        let body: OrdersResponse = self.get("getOrders").await?;
        let received = body.orders.len();
        let orders: Vec<OrderRecord> = decode_records("order", body.orders);
        tracing::debug!(count = orders.len(), received, "Fetched orders");
        Ok(orders)
    }

    async fn fetch_reservations(&self) -> ClientResult<Vec<ReservationRecord>> {
        let body: ReservationsResponse = self.get("getReservations").await?;
        let received = body.reservations.len();
        let reservations: Vec<ReservationRecord> = decode_records("reservation", body.reservations);
        tracing::debug!(count = reservations.len(), received, "Fetched reservations");
        Ok(reservations)
    }

    async fn mark_as_delivered(&self, order_id: &str) -> ClientResult<()> {
        let request = MarkDeliveredRequest {
            order_id: order_id.to_string(),
        };
        let response = self
            .client
            .post(self.url("markAsDelivered"))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        // Either a non-2xx status or an `error` field means the update was refused
        let body = if text.trim().is_empty() {
            MarkDeliveredResponse::default()
        } else {
            match serde_json::from_str::<MarkDeliveredResponse>(&text) {
                Ok(body) => body,
                Err(e) if status.is_success() => {
                    return Err(ClientError::InvalidResponse(e.to_string()));
                }
                Err(_) => MarkDeliveredResponse::default(),
            }
        };

        if let Some(error) = body.error {
            return Err(ClientError::Rejected(error));
        }
        if !status.is_success() {
            return Err(ClientError::Rejected(DEFAULT_MARK_ERROR.to_string()));
        }

        tracing::debug!(order_id = %order_id, "Order marked as delivered");
        Ok(())
    }
}

/// Decode each raw record on its own, dropping the ones that fail
fn decode_records<T: DeserializeOwned>(kind: &'static str, raw: Vec<Value>) -> Vec<T> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let id = value
                .get("_id")
                .or_else(|| value.get("id"))
                .and_then(Value::as_str)
                .map(str::to_owned);
            match serde_json::from_value(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(kind, index, id = ?id, error = %e, "Dropping undecodable record");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_base_url_is_normalized() {
        let store = NetworkOrderStore::new(&ClientConfig::new("http://localhost:5000/")).unwrap();
        assert_eq!(store.base_url(), "http://localhost:5000");
        assert_eq!(store.url("/getOrders"), "http://localhost:5000/getOrders");
        assert_eq!(store.url("getOrders"), "http://localhost:5000/getOrders");
    }

    #[test]
    fn test_decode_records_drops_only_bad_records() {
        let raw = vec![
            json!({"_id": "o1", "tableNumber": 4, "dishes": [{"name": "Paella", "quantity": 1}],
                   "createdAt": "2024-05-01T12:00:00Z"}),
            json!({"_id": "o2", "tableNumber": "patio", "dishes": [{"name": "Paella", "quantity": 1}],
                   "createdAt": "2024-05-01T12:01:00Z"}),
            json!({"_id": "o3", "tableNumber": "7", "dishes": [{"name": "Agua", "quantity": 2}],
                   "createdAt": "not a date"}),
            json!({"_id": "o4", "tableNumber": "0", "dishes": [{"name": "Agua", "quantity": 2}],
                   "createdAt": "2024-05-01T12:02:00Z", "tokenId": "A7"}),
        ];

        let orders: Vec<OrderRecord> = decode_records("order", raw);
        let ids: Vec<_> = orders.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, ["o1", "o4"]);
        assert!(orders[1].is_takeaway());
    }

    #[test]
    fn test_decode_records_reservations() {
        let raw = vec![
            json!({"name": "Marta", "phone": "600123123", "persons": 4}),
            json!({"name": "Luis", "phone": "600000000", "persons": "many"}),
        ];

        let reservations: Vec<ReservationRecord> = decode_records("reservation", raw);
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].name, "Marta");
    }
}
