//! Error Types for Reading Rejection and Detector Configuration
//!
//! ## Design Philosophy
//!
//! The evaluator itself never fails: warm-up and zero variance are policy
//! branches that still produce an [`AnomalyResult`](crate::AnomalyResult).
//! Errors only exist at the two edges of the core:
//!
//! 1. **Reading validation** (`ValidationError`): a reading the gateway must
//!    reject before it reaches the evaluator. Rejection never touches a window.
//!
//! 2. **Configuration** (`ConfigError`): detector parameters that would make
//!    the algorithm ill-defined, caught once at startup.
//!
//! ## Error Handling Strategy
//!
//! ```rust
//! use veleroguard_core::{Reading, ValidationError};
//!
//! let reading = Reading::new("mast_accelerometer_01", -1.0);
//! match reading.validate() {
//!     Ok(()) => {
//!         // hand off to the evaluator
//!     }
//!     Err(ValidationError::NegativeValue { .. }) => {
//!         // reject with 422, windows untouched
//!     }
//!     Err(_) => {
//!         // other malformed input
//!     }
//! }
//! ```

use thiserror::Error;

/// Result type for reading validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Reasons a reading is refused before evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Sensor identifier is empty or whitespace
    #[error("sensor_id must not be empty")]
    EmptySensorId,

    /// Value is NaN or infinite
    #[error("Invalid value: not a finite number")]
    InvalidValue,

    /// Value is below zero
    #[error("Value {value} must be non-negative")]
    NegativeValue {
        /// The rejected reading value
        value: f64,
    },
}

/// Detector parameters that cannot be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Window must hold at least one value
    #[error("window capacity must be at least 1")]
    ZeroCapacity,

    /// Warm-up too short for a sample standard deviation
    #[error("warm-up of {warmup} samples is below the minimum of {min}")]
    WarmupTooSmall {
        /// Configured warm-up length
        warmup: usize,
        /// Smallest allowed warm-up
        min: usize,
    },

    /// Warm-up can never be reached inside the window
    #[error("warm-up of {warmup} samples exceeds window capacity {capacity}")]
    WarmupExceedsCapacity {
        /// Configured warm-up length
        warmup: usize,
        /// Configured window capacity
        capacity: usize,
    },

    /// Threshold must be a positive finite number
    #[error("z-score threshold {0} must be finite and positive")]
    InvalidThreshold(f64),
}
