//! Density grid evaluation.
//!
//! The engine is a pure function of the coefficients and the sweep. It keeps
//! no state between calls; the only side channel is the wall-clock timing it
//! reports.

use std::time::{Duration, Instant};

use serde::Serialize;
use sinter_core::{
    Coefficients, DensitySummary, GridSample, SweepSpec, ValidationError, OPS_PER_SAMPLE,
};

/// The result of evaluating the density model over one sweep.
#[derive(Debug, Clone, Serialize)]
pub struct GridEvaluation {
    /// The sweep that was evaluated.
    pub sweep: SweepSpec,
    /// Number of pressure values.
    pub pressure_points: usize,
    /// Number of temperature values.
    pub temperature_points: usize,
    /// Samples in row-major order: pressure ascending, then temperature ascending.
    pub samples: Vec<GridSample>,
    /// Statistics of the density column.
    pub summary: DensitySummary,
    /// `samples.len() * OPS_PER_SAMPLE`.
    pub operations_count: u64,
    /// Wall-clock time spent building and evaluating the grid.
    #[serde(serialize_with = "serialize_seconds")]
    pub elapsed: Duration,
}

impl GridEvaluation {
    /// Elapsed time in seconds.
    #[must_use]
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// The sample at pressure index `i` and temperature index `j`.
    #[must_use]
    pub fn sample(&self, i: usize, j: usize) -> Option<&GridSample> {
        if i >= self.pressure_points || j >= self.temperature_points {
            return None;
        }
        self.samples.get(i * self.temperature_points + j)
    }
}

fn serialize_seconds<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(elapsed.as_secs_f64())
}

/// Evaluate `coefficients` over every point of `sweep`.
///
/// The sweep is validated before any value is computed. Pressure is the outer
/// axis and temperature the inner one, both ascending, so the first sample is
/// `(pg_min, t_min)` and the last is the largest reachable `(pg, t)` pair.
///
/// # Errors
///
/// Returns a `ValidationError` for negative bounds, `min >= max`, non-positive
/// steps, or non-finite values.
pub fn evaluate_grid(
    coefficients: &Coefficients,
    sweep: &SweepSpec,
) -> Result<GridEvaluation, ValidationError> {
    sweep.validate()?;

    let started = Instant::now();

    let pressures = sweep.pressure.values();
    let temperatures = sweep.temperature.values();

    // Bounded by MAX_GRID_POINTS once validated.
    let mut samples = Vec::with_capacity(sweep.point_count());
    for &pg in &pressures {
        for &t in &temperatures {
            samples.push(GridSample {
                pg,
                t,
                rho: coefficients.density(pg, t),
            });
        }
    }

    let elapsed = started.elapsed();

    let operations_count = samples.len() as u64 * OPS_PER_SAMPLE;
    let summary = DensitySummary::from_samples(&samples);

    tracing::debug!(
        points = samples.len(),
        operations_count,
        elapsed_us = elapsed.as_micros(),
        "Evaluated density grid"
    );

    Ok(GridEvaluation {
        sweep: *sweep,
        pressure_points: pressures.len(),
        temperature_points: temperatures.len(),
        samples,
        summary,
        operations_count,
        elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinter_core::{Axis, AxisRange};

    const WC_NI: Coefficients =
        Coefficients::from_array([-17.46, -0.00622, 0.04293, 1.5e-5, -1.4e-5, -5e-9]);

    #[test]
    fn default_sweep_has_441_samples() {
        let eval = evaluate_grid(&WC_NI, &SweepSpec::default()).unwrap();
        assert_eq!(eval.pressure_points, 21);
        assert_eq!(eval.temperature_points, 21);
        assert_eq!(eval.samples.len(), 441);
        assert_eq!(eval.operations_count, 441 * 13);
        assert_eq!(eval.summary.num_points, 441);
    }

    #[test]
    fn samples_are_row_major() {
        let eval = evaluate_grid(&WC_NI, &SweepSpec::default()).unwrap();

        let first = eval.samples.first().unwrap();
        assert_eq!((first.pg, first.t), (40.0, 1300.0));
        let last = eval.samples.last().unwrap();
        assert_eq!((last.pg, last.t), (80.0, 1500.0));

        // Temperature varies fastest.
        assert_eq!((eval.samples[1].pg, eval.samples[1].t), (40.0, 1310.0));
        assert_eq!((eval.samples[21].pg, eval.samples[21].t), (42.0, 1300.0));

        assert!(eval
            .samples
            .windows(2)
            .all(|w| (w[0].pg, w[0].t) < (w[1].pg, w[1].t)));
    }

    #[test]
    fn reference_density() {
        let eval = evaluate_grid(&WC_NI, &SweepSpec::default()).unwrap();
        let rho = eval.samples[0].rho;
        assert!((rho - 14.8822).abs() < 1e-9, "rho = {rho}");
        assert_eq!(eval.sample(0, 0), eval.samples.first());
        assert_eq!(eval.sample(20, 20), eval.samples.last());
        assert!(eval.sample(21, 0).is_none());
    }

    #[test]
    fn summary_matches_samples() {
        let eval = evaluate_grid(&WC_NI, &SweepSpec::default()).unwrap();
        let rhos: Vec<f64> = eval.samples.iter().map(|s| s.rho).collect();
        let min = rhos.iter().copied().fold(f64::INFINITY, f64::min);
        let max = rhos.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(eval.summary.min_density, min);
        assert_eq!(eval.summary.max_density, max);
        assert!(eval.summary.std_density > 0.0);
    }

    #[test]
    fn fractional_steps_do_not_overshoot() {
        let sweep = SweepSpec::new(AxisRange::new(0.0, 0.3, 0.1), AxisRange::new(1000.0, 1001.0, 0.1));
        let eval = evaluate_grid(&WC_NI, &sweep).unwrap();
        assert_eq!(eval.pressure_points, 4);
        assert_eq!(eval.temperature_points, 11);
        assert_eq!(eval.samples.len(), 44);
        assert!(eval.samples.iter().all(|s| s.pg <= 0.3 + 1e-9 && s.t <= 1001.0 + 1e-9));
    }

    #[test]
    fn oversized_sweeps_rejected() {
        let tiny_step = SweepSpec::new(AxisRange::new(0.0, 1.0, 1e-300), AxisRange::new(1300.0, 1500.0, 10.0));
        assert!(matches!(
            evaluate_grid(&WC_NI, &tiny_step),
            Err(ValidationError::TooManyPoints {
                axis: Some(Axis::Pressure),
                ..
            })
        ));

        let wide = SweepSpec::new(AxisRange::new(0.0, 1.0, 1e-4), AxisRange::new(0.0, 1.0, 1e-4));
        assert!(matches!(
            evaluate_grid(&WC_NI, &wide),
            Err(ValidationError::TooManyPoints { axis: None, .. })
        ));
    }

    #[test]
    fn invalid_sweeps_rejected() {
        let bad_order = SweepSpec::new(AxisRange::new(80.0, 40.0, 2.0), AxisRange::new(1300.0, 1500.0, 10.0));
        assert!(matches!(
            evaluate_grid(&WC_NI, &bad_order),
            Err(ValidationError::EmptyRange {
                axis: Axis::Pressure,
                ..
            })
        ));

        let negative = SweepSpec::new(AxisRange::new(40.0, 80.0, 2.0), AxisRange::new(-10.0, 1500.0, 10.0));
        assert!(matches!(
            evaluate_grid(&WC_NI, &negative),
            Err(ValidationError::NegativeBound {
                axis: Axis::Temperature,
                ..
            })
        ));

        let zero_step = SweepSpec::new(AxisRange::new(40.0, 80.0, 0.0), AxisRange::new(1300.0, 1500.0, 10.0));
        assert!(matches!(
            evaluate_grid(&WC_NI, &zero_step),
            Err(ValidationError::NonPositiveStep { .. })
        ));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let a = evaluate_grid(&WC_NI, &SweepSpec::default()).unwrap();
        let b = evaluate_grid(&WC_NI, &SweepSpec::default()).unwrap();
        assert_eq!(a.samples, b.samples);
        assert_eq!(a.operations_count, b.operations_count);
    }
}
