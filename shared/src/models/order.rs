//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::serde_helpers;

/// Table number reserved for takeaway (tap-and-collect) orders
pub const TAKEAWAY_TABLE: u32 = 0;

/// Display value for a takeaway order without a collection token
pub const NO_TOKEN: &str = "N/A";

/// One dish line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub quantity: i32,
}

impl Dish {
    pub fn new(name: impl Into<String>, quantity: i32) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

/// Order as held by the remote order store
///
/// `id` is assigned by the store and never changes. `is_delivered` only
/// ever moves from `false` to `true` through this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(with = "serde_helpers::table_number")]
    pub table_number: u32,
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub is_delivered: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
}

impl OrderRecord {
    /// Takeaway orders are not tied to a physical table
    pub fn is_takeaway(&self) -> bool {
        self.table_number == TAKEAWAY_TABLE
    }

    /// Undelivered orders keep their table busy and count towards the badges
    pub fn is_pending(&self) -> bool {
        !self.is_delivered
    }

    /// Collection token, or `"N/A"` when the store sent none
    pub fn token_label(&self) -> &str {
        self.token_id
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(NO_TOKEN)
    }

    /// Check the invariants the board relies on
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "order id" });
        }
        if self.dishes.is_empty() {
            return Err(ValidationError::NoDishes {
                order_id: self.id.clone(),
            });
        }
        for dish in &self.dishes {
            if dish.name.trim().is_empty() {
                return Err(ValidationError::EmptyField { field: "dish name" });
            }
            if dish.quantity <= 0 {
                return Err(ValidationError::InvalidQuantity {
                    order_id: self.id.clone(),
                    dish: dish.name.clone(),
                    quantity: dish.quantity,
                });
            }
        }
        Ok(())
    }
}
