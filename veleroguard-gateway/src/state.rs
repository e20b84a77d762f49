//! Shared application state

use std::sync::Arc;

use veleroguard_core::{AnomalyDetector, AnomalyEvaluator, DetectorConfig};

/// Application state shared across handlers
///
/// Holds the one detector built at startup; every request evaluates
/// against the same windows.
#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<dyn AnomalyDetector>,
}

impl AppState {
    /// State around an existing detector
    pub fn new(detector: Arc<dyn AnomalyDetector>) -> Self {
        Self { detector }
    }

    /// State with a fresh evaluator
    pub fn with_config(config: DetectorConfig) -> Self {
        Self::new(Arc::new(AnomalyEvaluator::new(config)))
    }
}
