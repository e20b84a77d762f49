//! HTTP Connector for the VeleroGuard Ingest API
//!
//! ## Overview
//!
//! Blocking client for the gateway's REST surface. Built on `ureq`: one
//! agent per client, connections reused across requests, JSON in and out.
//!
//! ## Implementation Choices
//!
//! - Blocking I/O: the simulator sends one reading per tick, nothing to
//!   overlap
//! - Base URL validated up front, paths appended per request
//! - Bounded retries with exponential backoff for 5xx, 429 and transport
//!   errors
//!
//! ## Example Usage
//!
//! ```no_run
//! use veleroguard_connectors::http::{HttpConfig, IngestClient};
//! use veleroguard_core::Reading;
//!
//! let config = HttpConfig::new("http://127.0.0.1:8000")
//!     .timeout_secs(5)
//!     .max_retries(2);
//! let client = IngestClient::new(config)?;
//!
//! let reading = Reading::new("mast_accelerometer_01", 4.52)
//!     .sensor_type("vibration")
//!     .unit("m/s2");
//! let ack = client.send_reading(&reading)?;
//! println!("z_score={:?}", ack.anomaly.z_score);
//! # Ok::<(), veleroguard_connectors::HttpError>(())
//! ```

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use veleroguard_core::{AnomalyResult, Reading, WindowSnapshot};

use crate::{ConnectionStats, Connector};

/// Path of the ingest endpoint
pub const INGEST_PATH: &str = "/sensors/ingest";

/// Path of the window inspection endpoint
pub const WINDOWS_PATH: &str = "/sensors/windows";

/// Path of the health probe
pub const HEALTH_PATH: &str = "/health";

/// HTTP-specific errors
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(String),

    /// Server returned error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// HTTP configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Base URL of the gateway
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Custom headers
    pub headers: HashMap<String, String>,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// First backoff delay, doubled per attempt
    pub retry_base: Duration,
    /// User agent string
    pub user_agent: String,
}

impl HttpConfig {
    /// Create new configuration with base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            headers: HashMap::new(),
            max_retries: 3,
            retry_base: Duration::from_millis(100),
            user_agent: format!("VeleroGuard/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set retry count
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set first backoff delay
    pub fn retry_base(mut self, delay: Duration) -> Self {
        self.retry_base = delay;
        self
    }

    /// Add custom header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Gateway reply to an accepted reading
#[derive(Debug, Clone, Deserialize)]
pub struct IngestAck {
    pub status: String,
    pub reading: Reading,
    pub anomaly: AnomalyResult,
}

#[derive(Debug, Deserialize)]
struct WindowsBody {
    windows: WindowSnapshot,
}

/// Ingest API client using lightweight ureq agent
pub struct IngestClient {
    config: HttpConfig,
    agent: ureq::Agent,
    stats: Mutex<ConnectionStats>,
}

impl IngestClient {
    /// Create new client
    pub fn new(config: HttpConfig) -> Result<Self, HttpError> {
        if !config.base_url.starts_with("http://") && !config.base_url.starts_with("https://") {
            return Err(HttpError::Config("Base URL must start with http:// or https://".into()));
        }

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            stats: Mutex::new(ConnectionStats::default()),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &HttpConfig {
        &self.config
    }

    /// Post one reading and return the gateway's classification
    pub fn send_reading(&self, reading: &Reading) -> Result<IngestAck, HttpError> {
        self.post(INGEST_PATH, reading)
    }

    /// Current window contents
    pub fn windows(&self) -> Result<WindowSnapshot, HttpError> {
        let body: WindowsBody = self.get(WINDOWS_PATH)?;
        Ok(body.windows)
    }

    /// Health probe body
    pub fn health(&self) -> Result<serde_json::Value, HttpError> {
        self.get(HEALTH_PATH)
    }

    /// Send GET request
    pub fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, HttpError> {
        let url = self.url(path);
        let request = self.build_request(self.agent.get(&url));
        self.execute_with_retry(request, None)
    }

    /// Send POST request with a JSON body
    pub fn post<T: Serialize, R: DeserializeOwned>(&self, path: &str, data: &T) -> Result<R, HttpError> {
        let url = self.url(path);
        let request = self.build_request(self.agent.post(&url));
        let json = serde_json::to_string(data).map_err(|e| HttpError::Serialization(e.to_string()))?;
        self.execute_with_retry(request, Some(json))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Build request with headers
    fn build_request(&self, mut request: ureq::Request) -> ureq::Request {
        for (name, value) in &self.config.headers {
            request = request.set(name, value);
        }

        request
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
    }

    /// Execute request with retry logic
    fn execute_with_retry<R: DeserializeOwned>(
        &self,
        request: ureq::Request,
        json: Option<String>,
    ) -> Result<R, HttpError> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Exponential backoff
                let delay = self.config.retry_base * (1u32 << (attempt - 1).min(16));
                log::debug!("retry {} after {:?}", attempt, delay);
                self.stats.lock().retries += 1;
                std::thread::sleep(delay);
            }

            let response = match &json {
                Some(body) => request.clone().send_string(body),
                None => request.clone().call(),
            };

            match response {
                Ok(resp) => {
                    {
                        let mut stats = self.stats.lock();
                        stats.messages_sent += 1;
                        stats.bytes_sent += json.as_ref().map_or(0, |b| b.len() as u64);
                    }

                    return resp
                        .into_json::<R>()
                        .map_err(|e| HttpError::Serialization(e.to_string()));
                }
                Err(ureq::Error::Status(code, resp)) => {
                    let error = HttpError::ServerError {
                        status: code,
                        message: resp.into_string().unwrap_or_default(),
                    };
                    if code >= 500 || code == 429 {
                        // Server error or rate limit - retry
                        last_error = Some(error);
                        continue;
                    }
                    // Client error - don't retry
                    return Err(self.record_failure(error));
                }
                Err(ureq::Error::Transport(e)) => {
                    // Network error - retry
                    last_error = Some(HttpError::Request(e.to_string()));
                    continue;
                }
            }
        }

        // All retries exhausted
        let error = last_error.unwrap_or_else(|| HttpError::Request("Unknown error".into()));
        Err(self.record_failure(error))
    }

    fn record_failure(&self, error: HttpError) -> HttpError {
        let mut stats = self.stats.lock();
        stats.messages_failed += 1;
        stats.last_error = Some(error.to_string());
        error
    }
}

impl Connector for IngestClient {
    type Error = HttpError;

    fn send(&mut self, topic: &str, data: &[u8]) -> Result<(), Self::Error> {
        // Parse data as JSON
        let value: serde_json::Value =
            serde_json::from_slice(data).map_err(|e| HttpError::Serialization(e.to_string()))?;

        // Use topic as path
        let _: serde_json::Value = self.post(topic, &value)?;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        // HTTP is stateless, so we're always "connected"
        true
    }

    fn stats(&self) -> ConnectionStats {
        self.stats.lock().clone()
    }
}
