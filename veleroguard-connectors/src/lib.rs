//! Outbound connectors for VeleroGuard
//!
//! ## Overview
//!
//! The gateway receives readings over HTTP. This crate is the other side of
//! that wire: a small blocking client for the ingest API, and a simulator
//! that drives it with synthetic vibration traffic.
//!
//! ## Retry Logic
//!
//! Exponential backoff on server errors, rate limiting and transport
//! failures:
//! ```text
//! retry_delay = retry_base * 2^attempt
//! ```
//! Client errors (4xx other than 429) are returned immediately; a
//! rejected reading will be rejected again.
//!
//! ## Example Usage
//!
//! ```no_run
//! use veleroguard_connectors::http::{HttpConfig, IngestClient};
//! use veleroguard_core::Reading;
//!
//! let client = IngestClient::new(HttpConfig::new("http://127.0.0.1:8000"))?;
//! let ack = client.send_reading(&Reading::new("mast_accelerometer_01", 4.52))?;
//! println!("anomaly={}", ack.anomaly.is_anomaly);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod http;
pub mod simulator;

pub use http::{HttpConfig, HttpError, IngestAck, IngestClient};
pub use simulator::{Phase, SimulationPlan, Simulator};

use thiserror::Error;

/// Common connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Trait for all protocol connectors
pub trait Connector {
    type Error;

    /// Send a JSON payload to `topic` (a path for HTTP)
    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error>;

    /// Check if connected
    fn is_connected(&self) -> bool;

    /// Get connection statistics
    fn stats(&self) -> ConnectionStats;
}

/// Connection statistics common to all connectors
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ConnectionStats {
    /// Total messages sent successfully
    pub messages_sent: u64,
    /// Total messages failed to send
    pub messages_failed: u64,
    /// Total bytes sent
    pub bytes_sent: u64,
    /// Requests retried after a retryable failure
    pub retries: u64,
    /// Last error message
    pub last_error: Option<String>,
}
