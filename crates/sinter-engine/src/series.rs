//! Representative density curves for plotting.
//!
//! A plotting front end shows density against pressure at a few fixed
//! temperatures, and density against temperature at a few fixed pressures.
//! The fixed values are the first, middle and last grid value of the other
//! axis; grids too small to have three distinct values yield fewer curves.

use serde::Serialize;
use sinter_core::Axis;

use crate::grid::GridEvaluation;

/// One curve through the grid with the other axis held fixed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityCurve {
    /// The axis along which the curve runs.
    pub along: Axis,
    /// The value at which the other axis is held.
    pub fixed_value: f64,
    /// `(x, rho)` points in ascending `x`.
    pub points: Vec<(f64, f64)>,
}

/// First, middle and last index of an axis with `len` values, without repeats.
fn representative_indices(len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut indices = vec![0, len / 2, len - 1];
    indices.dedup();
    indices
}

impl GridEvaluation {
    /// Density against pressure at the first, middle and last temperature.
    #[must_use]
    pub fn pressure_curves(&self) -> Vec<DensityCurve> {
        representative_indices(self.temperature_points)
            .into_iter()
            .map(|j| DensityCurve {
                along: Axis::Pressure,
                fixed_value: self.sweep.temperature.value(j),
                points: (0..self.pressure_points)
                    .filter_map(|i| self.sample(i, j))
                    .map(|s| (s.pg, s.rho))
                    .collect(),
            })
            .collect()
    }

    /// Density against temperature at the first, middle and last pressure.
    #[must_use]
    pub fn temperature_curves(&self) -> Vec<DensityCurve> {
        representative_indices(self.pressure_points)
            .into_iter()
            .map(|i| DensityCurve {
                along: Axis::Temperature,
                fixed_value: self.sweep.pressure.value(i),
                points: (0..self.temperature_points)
                    .filter_map(|j| self.sample(i, j))
                    .map(|s| (s.t, s.rho))
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::evaluate_grid;
    use sinter_core::{AxisRange, Coefficients, SweepSpec};

    fn linear() -> Coefficients {
        // rho = Pg + T, easy to check by hand.
        Coefficients::from_array([0.0, 1.0, 1.0, 0.0, 0.0, 0.0])
    }

    #[test]
    fn indices_deduplicate_small_axes() {
        assert_eq!(representative_indices(0), Vec::<usize>::new());
        assert_eq!(representative_indices(1), vec![0]);
        assert_eq!(representative_indices(2), vec![0, 1]);
        assert_eq!(representative_indices(3), vec![0, 1, 2]);
        assert_eq!(representative_indices(21), vec![0, 10, 20]);
    }

    #[test]
    fn default_sweep_curves() {
        let eval = evaluate_grid(&linear(), &SweepSpec::default()).unwrap();

        let by_pressure = eval.pressure_curves();
        let fixed: Vec<f64> = by_pressure.iter().map(|c| c.fixed_value).collect();
        assert_eq!(fixed, vec![1300.0, 1400.0, 1500.0]);
        assert!(by_pressure.iter().all(|c| c.points.len() == 21));
        assert_eq!(by_pressure[1].points[0], (40.0, 1440.0));

        let by_temperature = eval.temperature_curves();
        let fixed: Vec<f64> = by_temperature.iter().map(|c| c.fixed_value).collect();
        assert_eq!(fixed, vec![40.0, 60.0, 80.0]);
        assert_eq!(by_temperature[2].points.last(), Some(&(1500.0, 1580.0)));
    }

    #[test]
    fn single_value_axis_gives_one_curve() {
        let sweep = SweepSpec::new(AxisRange::new(10.0, 11.0, 5.0), AxisRange::new(1000.0, 1020.0, 10.0));
        let eval = evaluate_grid(&linear(), &sweep).unwrap();
        assert_eq!(eval.temperature_curves().len(), 1);
        assert_eq!(eval.pressure_curves().len(), 3);
        assert!(eval.pressure_curves().iter().all(|c| c.points.len() == 1));
    }
}
