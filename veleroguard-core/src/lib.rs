//! Core anomaly evaluation for VeleroGuard
//!
//! Keeps a bounded history per sensor and classifies each new value as
//! normal or anomalous by its z-score against that history.
//!
//! Key properties:
//! - Count-based window per sensor (default 20 values, FIFO eviction)
//! - No classification until the window holds enough values (default 5)
//! - Baseline computed before the new value is appended
//! - Per-sensor locking: evaluations on one sensor are serialized,
//!   different sensors proceed in parallel
//!
//! ```
//! use veleroguard_core::{AnomalyEvaluator, DetectorConfig};
//!
//! let evaluator = AnomalyEvaluator::new(DetectorConfig::default());
//!
//! for value in [4.4, 4.6, 4.5, 4.4, 4.6] {
//!     evaluator.evaluate("mast_accelerometer_01", value);
//! }
//!
//! let result = evaluator.evaluate("mast_accelerometer_01", 60.0);
//! assert!(result.is_anomaly);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod errors;
pub mod evaluator;
pub mod reading;
pub mod stats;
pub mod store;
pub mod traits;
pub mod window;

// Public API
pub use config::DetectorConfig;
pub use errors::{ConfigError, ValidationError, ValidationResult};
pub use evaluator::{AnomalyEvaluator, AnomalyResult, Regime};
pub use reading::Reading;
pub use stats::WindowStats;
pub use store::{WindowHandle, WindowSnapshot, WindowStore};
pub use traits::{AnomalyDetector, Validatable};
pub use window::Window;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
