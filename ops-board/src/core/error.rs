//! Board error types

use board_client::ClientError;
use thiserror::Error;

/// Board error type
///
/// Fetch and mutation failures are caught at the operation that triggered
/// them and end up as one message in the board's error slot.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Reading orders or reservations failed
    #[error("{0}")]
    Fetch(#[source] ClientError),

    /// Marking an order as delivered failed
    #[error("{0}")]
    Mutation(#[source] ClientError),

    /// Table outside the board's grid
    #[error("Table {0} is not on the board")]
    InvalidTable(u32),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),
}

impl BoardError {
    /// The message shown to staff
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Result type for board operations
pub type BoardResult<T> = Result<T, BoardError>;
