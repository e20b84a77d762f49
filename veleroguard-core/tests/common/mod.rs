//! Common test utilities and data generators for integration tests
//!
//! Provides a deterministic signal generator so integration tests can feed
//! realistic vibration traffic without pulling in an RNG.

#![allow(dead_code)]

use veleroguard_core::{AnomalyEvaluator, AnomalyResult};

/// Baseline of the mast accelerometer in m/s2
pub const VIBRATION_MEAN: f64 = 4.5;

/// Spread of a healthy mast accelerometer
pub const VIBRATION_NOISE: f64 = 0.15;

/// Value well outside any healthy vibration reading
pub const VIBRATION_SPIKE: f64 = 60.0;

/// Deterministic pseudo-random signal source
pub struct SignalGenerator {
    seed: u32,
}

impl SignalGenerator {
    /// Create generator with a fixed seed
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Uniform noise in `[-amplitude, amplitude]` around `mean`
    pub fn sample(&mut self, mean: f64, amplitude: f64) -> f64 {
        mean + (self.random_float() - 0.5) * 2.0 * amplitude
    }

    /// `count` vibration readings around the healthy baseline
    pub fn vibration_series(&mut self, count: usize) -> Vec<f64> {
        (0..count)
            .map(|_| self.sample(VIBRATION_MEAN, VIBRATION_NOISE))
            .collect()
    }

    fn random_float(&mut self) -> f64 {
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);
        self.seed as f64 / u32::MAX as f64
    }
}

/// Feeds `values` to one sensor and returns every result in order
pub fn evaluate_all(evaluator: &AnomalyEvaluator, sensor_id: &str, values: &[f64]) -> Vec<AnomalyResult> {
    values
        .iter()
        .map(|&value| evaluator.evaluate(sensor_id, value))
        .collect()
}
