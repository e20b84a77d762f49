//! Tracing setup
//!
//! `log` records from the core are forwarded into the same subscriber.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "veleroguard=info,veleroguard_gateway=info,veleroguard_core=info,tower_http=info";

/// Install the global subscriber
pub fn init() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into()))
        .init();
}
