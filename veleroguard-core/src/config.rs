//! Detector configuration
//!
//! The warm-up length, threshold and window capacity are named values
//! rather than literals so a deployment can tune them. Defaults come from
//! [`constants::detection`](crate::constants::detection).
//!
//! ```rust
//! use veleroguard_core::DetectorConfig;
//!
//! let config = DetectorConfig::new()
//!     .window_capacity(50)
//!     .z_threshold(4.0);
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_WARMUP_SAMPLES, DEFAULT_WINDOW_CAPACITY, DEFAULT_Z_THRESHOLD, MIN_WARMUP_SAMPLES,
};
use crate::errors::ConfigError;

/// Parameters of the sliding-window z-score detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Values retained per sensor
    pub window_capacity: usize,
    /// Values required before classification starts
    pub warmup_samples: usize,
    /// Strict z-score limit for flagging a value
    pub z_threshold: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            warmup_samples: DEFAULT_WARMUP_SAMPLES,
            z_threshold: DEFAULT_Z_THRESHOLD,
        }
    }
}

impl DetectorConfig {
    /// Configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set values retained per sensor
    pub fn window_capacity(mut self, capacity: usize) -> Self {
        self.window_capacity = capacity;
        self
    }

    /// Set values required before classification
    pub fn warmup_samples(mut self, samples: usize) -> Self {
        self.warmup_samples = samples;
        self
    }

    /// Set the z-score threshold
    pub fn z_threshold(mut self, threshold: f64) -> Self {
        self.z_threshold = threshold;
        self
    }

    /// Checks that the parameters define a usable detector
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.warmup_samples < MIN_WARMUP_SAMPLES {
            return Err(ConfigError::WarmupTooSmall {
                warmup: self.warmup_samples,
                min: MIN_WARMUP_SAMPLES,
            });
        }
        if self.warmup_samples > self.window_capacity {
            return Err(ConfigError::WarmupExceedsCapacity {
                warmup: self.warmup_samples,
                capacity: self.window_capacity,
            });
        }
        if !self.z_threshold.is_finite() || self.z_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.z_threshold));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_behavior() {
        let config = DetectorConfig::default();
        assert_eq!(config.window_capacity, 20);
        assert_eq!(config.warmup_samples, 5);
        assert_eq!(config.z_threshold, 3.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_overrides() {
        let config = DetectorConfig::new()
            .window_capacity(8)
            .warmup_samples(3)
            .z_threshold(2.5);

        assert_eq!(config.window_capacity, 8);
        assert_eq!(config.warmup_samples, 3);
        assert_eq!(config.z_threshold, 2.5);
    }

    #[test]
    fn rejects_unusable_parameters() {
        assert_eq!(
            DetectorConfig::new().window_capacity(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(
            DetectorConfig::new().warmup_samples(1).validate(),
            Err(ConfigError::WarmupTooSmall { warmup: 1, min: 2 })
        );
        assert_eq!(
            DetectorConfig::new().window_capacity(4).validate(),
            Err(ConfigError::WarmupExceedsCapacity { warmup: 5, capacity: 4 })
        );
        assert!(matches!(
            DetectorConfig::new().z_threshold(f64::NAN).validate(),
            Err(ConfigError::InvalidThreshold(_))
        ));
        assert_eq!(
            DetectorConfig::new().z_threshold(0.0).validate(),
            Err(ConfigError::InvalidThreshold(0.0))
        );
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let config: DetectorConfig = serde_json::from_str(r#"{"z_threshold": 4.0}"#).unwrap();
        assert_eq!(config.window_capacity, 20);
        assert_eq!(config.z_threshold, 4.0);
    }
}
