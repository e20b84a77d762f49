//! Vibration Spike Example
//!
//! Feeds a short mast-accelerometer trace through the evaluator and prints
//! how each value is classified.
//!
//! ## What You'll Learn
//!
//! - The warm-up regime before any classification
//! - Why a perfectly flat window never flags its first deviation
//! - How a spike is judged against history that excludes it
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_vibration_spike
//! ```

use veleroguard_core::{AnomalyEvaluator, DetectorConfig, Reading};

fn main() {
    println!("VeleroGuard Vibration Spike Example");
    println!("===================================\n");

    let config = DetectorConfig::default();
    println!("Detector configuration:");
    println!("  Window capacity: {}", config.window_capacity);
    println!("  Warm-up samples: {}", config.warmup_samples);
    println!("  Z-score threshold: {}", config.z_threshold);
    println!();

    let evaluator = AnomalyEvaluator::new(config);

    let trace = [4.41, 4.62, 4.48, 4.39, 4.57, 4.52, 4.44, 4.61, 60.0, 4.50];
    for value in trace {
        let reading = Reading::new("mast_accelerometer_01", value).unit("m/s2");
        if let Err(e) = reading.validate() {
            println!("  rejected {value}: {e}");
            continue;
        }

        let regime = evaluator.regime(&reading.sensor_id);
        let result = evaluator.evaluate(&reading.sensor_id, reading.value);
        let z = result
            .z_score
            .map(|z| format!("{z:8.2}"))
            .unwrap_or_else(|| "       -".to_string());
        let flag = if result.is_anomaly { "ANOMALY" } else { "ok" };
        println!("  {:6.2} {:>2} | {:?} z={} {}", value, reading.unit.as_deref().unwrap_or(""), regime, z, flag);
    }

    println!("\nFlat window, then a small step:");
    let flat = AnomalyEvaluator::default();
    for value in [4.5, 4.5, 4.5, 4.5, 4.5, 4.6] {
        let result = flat.evaluate("flat_sensor", value);
        println!("  {:.1} anomaly={} std_dev={:?}", value, result.is_anomaly, result.std_dev);
    }

    println!("\nWindow contents:");
    for (sensor_id, values) in evaluator.snapshot_all() {
        println!("  {sensor_id}: {values:?}");
    }
}
