//! # veleroguard
//!
//! Sensor ingestion and anomaly detection service.

use clap::Parser;
use veleroguard_gateway::{telemetry, GatewayConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    telemetry::init();

    let config = GatewayConfig::parse();
    veleroguard_gateway::run(config).await?;
    Ok(())
}
