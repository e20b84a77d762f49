//! Constants for VeleroGuard Core
//!
//! Centralized numeric defaults used throughout the detector. Use these
//! instead of magic numbers; each one documents where its value comes from.

/// Window sizing, warm-up and classification defaults.
pub mod detection;

pub use detection::{
    DEFAULT_WINDOW_CAPACITY, DEFAULT_WARMUP_SAMPLES, DEFAULT_Z_THRESHOLD,
    MIN_WARMUP_SAMPLES,
};
