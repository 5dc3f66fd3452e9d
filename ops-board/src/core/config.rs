use std::time::Duration;

use board_client::ClientConfig;

use super::error::{BoardError, BoardResult};

/// Board configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ORDER_STORE_URL | http://localhost:5000 | Order store base URL |
/// | POLL_INTERVAL_SECS | 10 | Seconds between order fetches |
/// | REQUEST_TIMEOUT_SECS | 30 | HTTP request timeout |
/// | TABLE_COUNT | 10 | Physical tables on the grid (1..=N) |
/// | EVENT_CHANNEL_CAPACITY | 256 | Board event buffer per subscriber |
/// | LOG_LEVEL | info | Log filter |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
///
/// # Example
///
/// ```ignore
/// ORDER_STORE_URL=http://10.0.0.5:5000 POLL_INTERVAL_SECS=5 cargo run -p ops-board
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub order_store_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
    pub table_count: u32,
    pub event_channel_capacity: usize,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            order_store_url: std::env::var("ORDER_STORE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".into()),
            poll_interval_secs: std::env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            table_count: std::env::var("TABLE_COUNT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            event_channel_capacity: std::env::var("EVENT_CHANNEL_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(256),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
        }
    }

    /// Override the store URL and poll interval
    ///
    /// Used by tests
    pub fn with_overrides(order_store_url: impl Into<String>, poll_interval_secs: u64) -> Self {
        let mut config = Self::from_env();
        config.order_store_url = order_store_url.into();
        config.poll_interval_secs = poll_interval_secs;
        config
    }

    /// Reject values the board cannot run with
    pub fn validate(&self) -> BoardResult<()> {
        if self.poll_interval_secs == 0 {
            return Err(BoardError::Config("POLL_INTERVAL_SECS must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(BoardError::Config("REQUEST_TIMEOUT_SECS must be at least 1".into()));
        }
        if self.table_count == 0 {
            return Err(BoardError::Config("TABLE_COUNT must be at least 1".into()));
        }
        if !self.order_store_url.starts_with("http://") && !self.order_store_url.starts_with("https://") {
            return Err(BoardError::Config(format!(
                "ORDER_STORE_URL must be an http(s) URL, got {}",
                self.order_store_url
            )));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// HTTP client settings for the order store
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.order_store_url.clone()).with_timeout(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
