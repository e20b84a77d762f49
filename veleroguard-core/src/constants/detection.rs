//! Sliding-Window Detection Parameters
//!
//! Defaults for the per-sensor anomaly evaluator. Each one can be
//! overridden through [`DetectorConfig`](crate::config::DetectorConfig);
//! changing them tunes the detector without changing the algorithm.

// ===== WINDOW SIZING =====

/// Number of recent values retained per sensor.
///
/// At the simulator's 1Hz cadence this is the last 20 seconds of a
/// vibration channel:
/// - 20 samples × 8 bytes = 160 bytes of history per sensor
/// - Long enough to smooth single-sample noise
/// - Short enough to follow slow drift in sea state
pub const DEFAULT_WINDOW_CAPACITY: usize = 20;

/// Minimum history before any classification is attempted.
///
/// With fewer samples the sample standard deviation is too unstable
/// to judge a new value against. Must be at least 2, since the
/// Bessel-corrected deviation divides by `count - 1`.
pub const DEFAULT_WARMUP_SAMPLES: usize = 5;

/// Smallest warm-up the detector accepts.
pub const MIN_WARMUP_SAMPLES: usize = 2;

// ===== CLASSIFICATION =====

/// Z-score above which a value is flagged.
///
/// Comparison is strict: a z-score of exactly 3.0 is normal.
/// For a normally distributed channel roughly 0.27% of healthy
/// readings exceed this.
pub const DEFAULT_Z_THRESHOLD: f64 = 3.0;
