//! Core traits
//!
//! The gateway talks to the detector through [`AnomalyDetector`] so it can
//! hold any implementation behind an `Arc<dyn AnomalyDetector>`.

use crate::evaluator::AnomalyResult;
use crate::store::WindowSnapshot;

/// The two operations the core exposes to its collaborators
pub trait AnomalyDetector: Send + Sync {
    /// Classify `value` against the sensor's history, then record it
    fn evaluate(&self, sensor_id: &str, value: f64) -> AnomalyResult;

    /// Current contents of every window, oldest value first
    fn snapshot_all(&self) -> WindowSnapshot;
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is a usable number (not NaN or infinite)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
