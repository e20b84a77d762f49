//! Baseline Statistics over a Window
//!
//! Single-pass mean and Bessel-corrected sample standard deviation using
//! Welford's update:
//!
//! ```text
//! delta  = x - mean
//! mean  += delta / n
//! m2    += delta * (x - mean)
//! var    = m2 / (n - 1)
//! ```
//!
//! For a run of identical values every `delta` is exactly zero, so `mean`
//! equals the value bit-for-bit and `std_dev` is exactly `0.0`. The
//! degenerate-variance branch of the evaluator relies on that.

use serde::{Deserialize, Serialize};

/// Summary of a window's contents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Number of values summarized
    pub count: usize,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (denominator `count - 1`), `0.0` below two samples
    pub std_dev: f64,
}

impl WindowStats {
    /// Computes statistics over `values`, `None` when there are none
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut count = 0usize;
        let mut mean = 0.0f64;
        let mut m2 = 0.0f64;

        for value in values {
            count += 1;
            let delta = value - mean;
            mean += delta / count as f64;
            m2 += delta * (value - mean);
        }

        if count == 0 {
            return None;
        }

        let std_dev = if count < 2 {
            0.0
        } else {
            (m2 / (count - 1) as f64).sqrt()
        };

        Some(Self { count, mean, std_dev })
    }

    /// Absolute number of standard deviations `value` lies from the mean
    ///
    /// `None` when the deviation is zero.
    pub fn z_score(&self, value: f64) -> Option<f64> {
        if self.std_dev == 0.0 {
            return None;
        }
        Some(((value - self.mean) / self.std_dev).abs())
    }
}
