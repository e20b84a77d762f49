//! Gateway configuration
//!
//! Every option can be given as a flag or an environment variable; a `.env`
//! file in the working directory is loaded first when present.

use std::net::{IpAddr, SocketAddr};

use clap::Parser;
use veleroguard_core::{
    constants::{DEFAULT_WARMUP_SAMPLES, DEFAULT_WINDOW_CAPACITY, DEFAULT_Z_THRESHOLD},
    DetectorConfig,
};

use crate::error::{GatewayError, GatewayResult};

/// Default TCP port, the one the simulator targets
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Parser, Debug, Clone)]
#[command(name = "veleroguard", version, about = "Sensor ingestion and anomaly detection service")]
pub struct GatewayConfig {
    /// Interface to listen on
    #[arg(long, env = "VELEROGUARD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "VELEROGUARD_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Values retained per sensor
    #[arg(long, env = "VELEROGUARD_WINDOW_CAPACITY", default_value_t = DEFAULT_WINDOW_CAPACITY)]
    pub window_capacity: usize,

    /// Values required before classification starts
    #[arg(long, env = "VELEROGUARD_WARMUP_SAMPLES", default_value_t = DEFAULT_WARMUP_SAMPLES)]
    pub warmup_samples: usize,

    /// Z-score above which a value is anomalous
    #[arg(long, env = "VELEROGUARD_Z_THRESHOLD", default_value_t = DEFAULT_Z_THRESHOLD)]
    pub z_threshold: f64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            warmup_samples: DEFAULT_WARMUP_SAMPLES,
            z_threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl GatewayConfig {
    /// Detector parameters, validated
    pub fn detector_config(&self) -> GatewayResult<DetectorConfig> {
        let config = DetectorConfig::new()
            .window_capacity(self.window_capacity)
            .warmup_samples(self.warmup_samples)
            .z_threshold(self.z_threshold);
        config.validate()?;
        Ok(config)
    }

    /// Address to bind
    pub fn socket_addr(&self) -> GatewayResult<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|_| GatewayError::Address(format!("{}:{}", self.host, self.port)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
