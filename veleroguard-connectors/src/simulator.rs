//! Synthetic sensor traffic
//!
//! Reproduces a healthy mast accelerometer and then breaks it: a baseline
//! phase and a normal-operation phase drawn from the same Gaussian, followed
//! by a single injected spike. Against a default detector the spike is the
//! only value that should come back flagged.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use veleroguard_core::Reading;

use crate::ConnectorError;

/// Phase of a simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Warm-up traffic that fills the window
    Baseline,
    /// Healthy traffic judged against the baseline
    Normal,
    /// The injected out-of-distribution value
    Anomaly,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Baseline => write!(f, "Baseline phase"),
            Phase::Normal => write!(f, "Normal operation phase"),
            Phase::Anomaly => write!(f, "Anomaly injected"),
        }
    }
}

/// What to send and how often
#[derive(Debug, Clone)]
pub struct SimulationPlan {
    pub sensor_id: String,
    pub sensor_type: String,
    pub unit: String,
    pub baseline_mean: f64,
    pub baseline_std: f64,
    pub baseline_samples: usize,
    pub normal_samples: usize,
    pub anomaly_value: f64,
    pub interval: Duration,
}

impl Default for SimulationPlan {
    fn default() -> Self {
        Self {
            sensor_id: "mast_accelerometer_01".to_string(),
            sensor_type: "vibration".to_string(),
            unit: "m/s2".to_string(),
            baseline_mean: 4.5,
            baseline_std: 0.15,
            baseline_samples: 10,
            normal_samples: 10,
            anomaly_value: 60.0,
            interval: Duration::from_secs(1),
        }
    }
}

/// Generates the reading schedule for a [`SimulationPlan`]
pub struct Simulator<R: Rng> {
    plan: SimulationPlan,
    noise: Normal<f64>,
    rng: R,
}

impl<R: Rng> Simulator<R> {
    /// Fails if the plan's standard deviation is negative or not finite
    pub fn new(plan: SimulationPlan, rng: R) -> Result<Self, ConnectorError> {
        let noise = Normal::new(plan.baseline_mean, plan.baseline_std)
            .map_err(|e| ConnectorError::Config(format!("baseline distribution: {e}")))?;
        Ok(Self { plan, noise, rng })
    }

    /// Plan being simulated
    pub fn plan(&self) -> &SimulationPlan {
        &self.plan
    }

    /// Every value of the run, in send order
    ///
    /// Values are drawn up front; readings are stamped when they are built
    /// with [`reading`](Self::reading), right before sending.
    pub fn schedule(&mut self) -> Vec<(Phase, f64)> {
        let mut values = Vec::with_capacity(self.plan.baseline_samples + self.plan.normal_samples + 1);

        for _ in 0..self.plan.baseline_samples {
            values.push((Phase::Baseline, self.sample()));
        }
        for _ in 0..self.plan.normal_samples {
            values.push((Phase::Normal, self.sample()));
        }
        values.push((Phase::Anomaly, self.plan.anomaly_value));

        values
    }

    /// Reading for `value` stamped now
    pub fn reading_now(&self, value: f64) -> Reading {
        self.reading(value, Utc::now())
    }

    /// One Gaussian draw, rounded to three decimals
    fn sample(&mut self) -> f64 {
        round3(self.noise.sample(&mut self.rng))
    }

    /// Reading for `value` carrying the plan's sensor metadata
    pub fn reading(&self, value: f64, timestamp: DateTime<Utc>) -> Reading {
        Reading::at(&self.plan.sensor_id, value, timestamp)
            .sensor_type(&self.plan.sensor_type)
            .unit(&self.plan.unit)
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
