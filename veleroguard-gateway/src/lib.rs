//! Ingestion gateway for VeleroGuard
//!
//! Receives sensor readings over HTTP, rejects invalid ones, passes the rest
//! to the anomaly evaluator and shapes the response. Also exposes the
//! current window contents for inspection.
//!
//! | Method | Path               | Purpose                      |
//! |--------|--------------------|------------------------------|
//! | GET    | `/`                | banner                       |
//! | GET    | `/health`          | liveness probe               |
//! | POST   | `/sensors/ingest`  | validate + evaluate a reading|
//! | GET    | `/sensors/windows` | snapshot of every window     |

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::GatewayConfig;
pub use error::{ApiError, GatewayError};
pub use server::{create_router, run};
pub use state::AppState;
