//! Error types for the shared crate

use thiserror::Error;

/// A record received from the order store that breaks a model invariant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field is empty or whitespace
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    /// An order without dish lines
    #[error("order {order_id} has no dishes")]
    NoDishes { order_id: String },

    /// A dish line with quantity below one
    #[error("dish '{dish}' in order {order_id} has invalid quantity {quantity}")]
    InvalidQuantity {
        order_id: String,
        dish: String,
        quantity: i32,
    },

    /// A reservation for zero (or fewer) persons
    #[error("reservation for {name} has invalid party size {persons}")]
    InvalidPartySize { name: String, persons: i32 },
}
