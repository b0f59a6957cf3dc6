//! Descriptive statistics for repeated benchmark runs
//!
//! Repeated runs are a sample, not a population, so the spread uses the
//! sample standard deviation (Bessel's correction, divide by n-1).

use serde::{Deserialize, Serialize};

/// Mean and sample standard deviation of a group of observations
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeanStd {
    pub mean: f64,
    pub std: f64,
}

impl MeanStd {
    /// Compute mean and sample standard deviation
    ///
    /// An empty slice yields (0, 0) and a single value yields (value, 0).
    pub fn of(values: &[f64]) -> Self {
        let n = values.len();
        if n == 0 {
            return Self::default();
        }

        let mean = values.iter().sum::<f64>() / n as f64;
        if n < 2 {
            return Self { mean, std: 0.0 };
        }

        let sum_sq: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
        let variance = sum_sq / (n - 1) as f64;

        Self {
            mean,
            std: variance.sqrt(),
        }
    }
}
