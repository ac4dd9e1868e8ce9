//! Density samples and their summary statistics.

use serde::{Deserialize, Serialize};

/// One evaluated `(Pg, T, rho)` point of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSample {
    /// Gas pressure, in atm.
    pub pg: f64,
    /// Temperature, in °C.
    pub t: f64,
    /// Modelled density, in g/cm³.
    pub rho: f64,
}

/// Aggregate statistics over the density column of a sample set.
///
/// Empty input yields `NaN` for every statistic, and the standard deviation of a
/// single sample is `NaN`. The standard deviation is the unbiased sample
/// estimate (divides by `n - 1`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DensitySummary {
    /// Number of samples summarized.
    pub num_points: usize,
    /// Smallest density.
    pub min_density: f64,
    /// Largest density.
    pub max_density: f64,
    /// Arithmetic mean density.
    pub mean_density: f64,
    /// Sample standard deviation of density.
    pub std_density: f64,
}

impl DensitySummary {
    /// Summarize the densities of `samples`.
    #[must_use]
    pub fn from_samples(samples: &[GridSample]) -> Self {
        Self::from_densities(samples.iter().map(|s| s.rho))
    }

    /// Summarize a stream of density values.
    ///
    /// Uses Welford's update so long sweeps do not lose precision in the variance.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_densities(densities: impl IntoIterator<Item = f64>) -> Self {
        let mut n = 0usize;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut mean = 0.0;
        let mut m2 = 0.0;

        for rho in densities {
            n += 1;
            min = min.min(rho);
            max = max.max(rho);
            let delta = rho - mean;
            mean += delta / n as f64;
            m2 += delta * (rho - mean);
        }

        if n == 0 {
            return Self::empty();
        }

        let std_density = if n > 1 {
            (m2 / (n - 1) as f64).sqrt()
        } else {
            f64::NAN
        };

        Self {
            num_points: n,
            min_density: min,
            max_density: max,
            mean_density: mean,
            std_density,
        }
    }

    /// The degenerate summary of no samples.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            num_points: 0,
            min_density: f64::NAN,
            max_density: f64::NAN,
            mean_density: f64::NAN,
            std_density: f64::NAN,
        }
    }

    /// Compare two summaries within `tolerance`, treating `NaN` as equal to `NaN`.
    #[must_use]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        fn close(a: f64, b: f64, tolerance: f64) -> bool {
            (a.is_nan() && b.is_nan()) || (a - b).abs() <= tolerance
        }

        self.num_points == other.num_points
            && close(self.min_density, other.min_density, tolerance)
            && close(self.max_density, other.max_density, tolerance)
            && close(self.mean_density, other.mean_density, tolerance)
            && close(self.std_density, other.std_density, tolerance)
    }
}
