//! Drive a running gateway with synthetic vibration traffic:
//!
//! 1. Baseline phase: healthy readings that fill the sensor's window
//! 2. Normal operation phase: more healthy readings, now classified
//! 3. A single injected spike, which should come back flagged

use std::thread;
use std::time::Duration;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

use veleroguard_connectors::http::{HttpConfig, IngestClient};
use veleroguard_connectors::simulator::{Phase, SimulationPlan, Simulator};

#[derive(Parser, Debug)]
#[command(name = "sensor-simulator", about = "Send synthetic sensor readings to a VeleroGuard gateway")]
struct Opts {
    /// Gateway base URL
    #[arg(long, env = "VELEROGUARD_URL", default_value = "http://127.0.0.1:8000")]
    url: String,

    #[arg(long, default_value = "mast_accelerometer_01")]
    sensor_id: String,

    #[arg(long, default_value = "vibration")]
    sensor_type: String,

    #[arg(long, default_value = "m/s2")]
    unit: String,

    #[arg(long, default_value_t = 4.5)]
    baseline_mean: f64,

    #[arg(long, default_value_t = 0.15)]
    baseline_std: f64,

    #[arg(long, default_value_t = 10)]
    baseline_samples: usize,

    #[arg(long, default_value_t = 10)]
    normal_samples: usize,

    #[arg(long, default_value_t = 60.0)]
    anomaly_value: f64,

    /// Delay between readings in milliseconds
    #[arg(long, default_value_t = 1000)]
    interval_ms: u64,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

impl Opts {
    fn plan(&self) -> SimulationPlan {
        SimulationPlan {
            sensor_id: self.sensor_id.clone(),
            sensor_type: self.sensor_type.clone(),
            unit: self.unit.clone(),
            baseline_mean: self.baseline_mean,
            baseline_std: self.baseline_std,
            baseline_samples: self.baseline_samples,
            normal_samples: self.normal_samples,
            anomaly_value: self.anomaly_value,
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut simulator = Simulator::new(opts.plan(), rng)?;
    let client = IngestClient::new(HttpConfig::new(&opts.url))?;

    println!("Starting VeleroGuard sensor simulator");
    log::info!("target {}", client.config().base_url);

    let interval = simulator.plan().interval;
    let mut current_phase = None;
    let mut flagged = 0usize;

    for (phase, value) in simulator.schedule() {
        if current_phase != Some(phase) {
            println!("\n--- {} ---", phase);
            current_phase = Some(phase);
        }

        let reading = simulator.reading_now(value);
        let ack = client
            .send_reading(&reading)
            .with_context(|| format!("sending {} for {}", reading.value, reading.sensor_id))?;

        if ack.anomaly.is_anomaly {
            flagged += 1;
        }
        println!(
            "[{}] value={} | anomaly={} | z_score={}",
            Utc::now().to_rfc3339(),
            reading.value,
            ack.anomaly.is_anomaly,
            ack.anomaly
                .z_score
                .map_or_else(|| "None".to_string(), |z| format!("{z:.3}")),
        );

        if phase != Phase::Anomaly {
            thread::sleep(interval);
        }
    }

    println!("\nSimulation completed");
    log::info!("{} reading(s) flagged", flagged);
    Ok(())
}
