//! Sliding-Window Z-Score Evaluator
//!
//! ## Algorithm
//!
//! For each `(sensor_id, value)`, under the sensor's lock:
//!
//! ```text
//! 1. read window (before mutation)
//! 2. len < warmup        → normal, no statistics          [Warming]
//! 3. mean, sample sd of the window, excluding `value`
//! 4. sd == 0             → normal, mean/sd reported       [Flat]
//! 5. z = |value - mean| / sd, anomaly iff z > threshold   [Active]
//! 6. push `value` (FIFO eviction), whatever the outcome
//! ```
//!
//! The value under test never contributes to its own baseline; a spike
//! would otherwise absorb part of itself into the statistics judging it.
//!
//! ## Ordering
//!
//! Results depend on arrival order. Replaying the same values in a
//! different order can flip classifications, since each value is judged
//! only against what came before it. A flat run followed by a spike does
//! not flag the spike: the zero-variance branch treats it as normal and it
//! becomes part of the next baseline.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::DetectorConfig;
use crate::stats::WindowStats;
use crate::store::{WindowSnapshot, WindowStore};
use crate::traits::AnomalyDetector;
use crate::window::Window;

/// Outcome of one evaluation
///
/// Statistics are `None` where they were not computed; they serialize as
/// `null` so consumers always see the same keys.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Whether the value exceeded the threshold
    pub is_anomaly: bool,
    /// Baseline mean, absent during warm-up
    pub mean: Option<f64>,
    /// Baseline sample standard deviation, absent during warm-up
    pub std_dev: Option<f64>,
    /// Absolute z-score, absent during warm-up and for a flat baseline
    pub z_score: Option<f64>,
    /// Threshold the z-score was compared against
    pub threshold: f64,
}

impl AnomalyResult {
    fn warming(threshold: f64) -> Self {
        Self {
            is_anomaly: false,
            mean: None,
            std_dev: None,
            z_score: None,
            threshold,
        }
    }
}

/// Classification regime of a sensor, derived from its live window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Regime {
    /// Fewer than `warmup_samples` values
    Warming,
    /// Enough values and non-zero spread
    Active,
    /// Enough values, all identical
    Flat,
}

impl Regime {
    /// Regime implied by the baseline statistics, `None` meaning warm-up
    fn of(stats: Option<&WindowStats>) -> Self {
        match stats {
            None => Regime::Warming,
            Some(stats) if stats.std_dev == 0.0 => Regime::Flat,
            Some(_) => Regime::Active,
        }
    }
}

/// Per-sensor anomaly evaluator
///
/// Cheap to share: wrap it in an `Arc` and call [`evaluate`](Self::evaluate)
/// from any thread.
#[derive(Debug)]
pub struct AnomalyEvaluator {
    store: Arc<WindowStore>,
    config: DetectorConfig,
}

impl AnomalyEvaluator {
    /// Evaluator with a fresh store sized from `config`
    pub fn new(config: DetectorConfig) -> Self {
        let store = Arc::new(WindowStore::new(config.window_capacity));
        Self::with_store(config, store)
    }

    /// Evaluator over an existing store
    ///
    /// The store's capacity wins over `config.window_capacity`, and
    /// [`config`](Self::config) reports it.
    pub fn with_store(mut config: DetectorConfig, store: Arc<WindowStore>) -> Self {
        if config.window_capacity != store.capacity() {
            log::warn!(
                "window capacity {} overridden by store capacity {}",
                config.window_capacity,
                store.capacity()
            );
            config.window_capacity = store.capacity();
        }
        Self { store, config }
    }

    /// Active configuration
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Underlying store
    pub fn store(&self) -> &Arc<WindowStore> {
        &self.store
    }

    /// Classifies `value` against the sensor's history, then appends it
    pub fn evaluate(&self, sensor_id: &str, value: f64) -> AnomalyResult {
        self.store.with_window(sensor_id, |window| {
            let stats = self.classify(window);
            let regime = Regime::of(stats.as_ref());
            let result = stats.map_or_else(
                || AnomalyResult::warming(self.config.z_threshold),
                |stats| self.score(stats, value),
            );

            if let Some(evicted) = window.push(value) {
                log::trace!("sensor {} evicted {}", sensor_id, evicted);
            }

            if result.is_anomaly {
                log::info!(
                    "anomaly on sensor {}: value={} z={:.3} mean={:.4} sd={:.4}",
                    sensor_id,
                    value,
                    result.z_score.unwrap_or_default(),
                    result.mean.unwrap_or_default(),
                    result.std_dev.unwrap_or_default(),
                );
            } else {
                log::debug!(
                    "sensor {} value={} normal, {:?} (window {}/{})",
                    sensor_id,
                    value,
                    regime,
                    window.len(),
                    window.capacity()
                );
            }

            result
        })
    }

    /// Current contents of every window
    pub fn snapshot_all(&self) -> WindowSnapshot {
        self.store.snapshot_all()
    }

    /// Regime the next evaluation of `sensor_id` would run in
    ///
    /// Like any access through the store, this creates the window of an
    /// unseen sensor.
    pub fn regime(&self, sensor_id: &str) -> Regime {
        self.store
            .with_window(sensor_id, |window| Regime::of(self.classify(window).as_ref()))
    }

    /// Baseline statistics, or `None` while the window is warming up
    fn classify(&self, window: &Window) -> Option<WindowStats> {
        if window.len() < self.config.warmup_samples {
            return None;
        }
        window.stats()
    }

    fn score(&self, stats: WindowStats, value: f64) -> AnomalyResult {
        let threshold = self.config.z_threshold;
        let z_score = stats.z_score(value);

        AnomalyResult {
            is_anomaly: z_score.map_or(false, |z| z > threshold),
            mean: Some(stats.mean),
            std_dev: Some(stats.std_dev),
            z_score,
            threshold,
        }
    }
}

impl Default for AnomalyEvaluator {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl AnomalyDetector for AnomalyEvaluator {
    fn evaluate(&self, sensor_id: &str, value: f64) -> AnomalyResult {
        AnomalyEvaluator::evaluate(self, sensor_id, value)
    }

    fn snapshot_all(&self) -> WindowSnapshot {
        AnomalyEvaluator::snapshot_all(self)
    }
}
