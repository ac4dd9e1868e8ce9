//! Sweep definitions over the (pressure, temperature) plane.
//!
//! A sweep is two inclusive axis ranges. Grid points are placed at
//! `min + i * step` for `i` in `0..point_count()`, computed in closed form so
//! that floating-point accumulation can never add a point beyond `max`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Tolerance absorbed when dividing the span by the step.
///
/// Keeps spans such as `(0.3 - 0.0) / 0.1 = 2.9999999999999996` at four points.
pub const POINT_COUNT_EPSILON: f64 = 1e-9;

/// Largest number of grid points a sweep may produce, per axis and in total.
pub const MAX_GRID_POINTS: usize = 10_000_000;

/// The two axes of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Gas pressure, in atm.
    Pressure,
    /// Sintering temperature, in °C.
    Temperature,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pressure => "pressure",
            Self::Temperature => "temperature",
        })
    }
}

/// An inclusive range along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// First value of the sweep.
    pub min: f64,
    /// Last value of the sweep (included when reachable by whole steps).
    pub max: f64,
    /// Distance between consecutive values.
    pub step: f64,
}

impl AxisRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Check the range on its own.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found for `axis`.
    pub fn validate(&self, axis: Axis) -> Result<(), ValidationError> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err(ValidationError::NonFinite { axis });
        }
        if self.min < 0.0 {
            return Err(ValidationError::NegativeBound {
                axis,
                bound: "minimum",
                value: self.min,
            });
        }
        if self.max < 0.0 {
            return Err(ValidationError::NegativeBound {
                axis,
                bound: "maximum",
                value: self.max,
            });
        }
        if self.min >= self.max {
            return Err(ValidationError::EmptyRange {
                axis,
                min: self.min,
                max: self.max,
            });
        }
        if self.step <= 0.0 {
            return Err(ValidationError::NonPositiveStep {
                axis,
                step: self.step,
            });
        }
        match self.checked_point_count() {
            Some(count) if count <= MAX_GRID_POINTS => Ok(()),
            _ => Err(ValidationError::TooManyPoints {
                axis: Some(axis),
                limit: MAX_GRID_POINTS,
            }),
        }
    }

    /// Number of grid values, `floor((max - min) / step + eps) + 1`, or `None`
    /// when that does not fit in a `usize`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn checked_point_count(&self) -> Option<usize> {
        let span = ((self.max - self.min) / self.step + POINT_COUNT_EPSILON).floor();
        if !span.is_finite() || span >= usize::MAX as f64 {
            return None;
        }
        (span.max(0.0) as usize).checked_add(1)
    }

    /// Number of grid values, saturating at `usize::MAX`.
    ///
    /// Only meaningful for a validated range.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.checked_point_count().unwrap_or(usize::MAX)
    }

    /// The `index`-th grid value.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn value(&self, index: usize) -> f64 {
        self.min + index as f64 * self.step
    }

    /// All grid values in ascending order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        (0..self.point_count()).map(|i| self.value(i)).collect()
    }
}

/// The six numbers defining a grid evaluation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepSpec {
    /// Gas pressure range, in atm.
    pub pressure: AxisRange,
    /// Temperature range, in °C.
    pub temperature: AxisRange,
}

impl SweepSpec {
    /// Create a sweep from explicit bounds.
    #[must_use]
    pub const fn new(pressure: AxisRange, temperature: AxisRange) -> Self {
        Self {
            pressure,
            temperature,
        }
    }

    /// Validate both axes, pressure first, then the size of the whole grid.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.pressure.validate(Axis::Pressure)?;
        self.temperature.validate(Axis::Temperature)?;
        match self.checked_point_count() {
            Some(count) if count <= MAX_GRID_POINTS => Ok(()),
            _ => Err(ValidationError::TooManyPoints {
                axis: None,
                limit: MAX_GRID_POINTS,
            }),
        }
    }

    /// Total number of grid points, or `None` on overflow.
    #[must_use]
    pub fn checked_point_count(&self) -> Option<usize> {
        self.pressure
            .checked_point_count()?
            .checked_mul(self.temperature.checked_point_count()?)
    }

    /// Total number of grid points, saturating at `usize::MAX`.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.checked_point_count().unwrap_or(usize::MAX)
    }
}

impl Default for SweepSpec {
    /// Pressure 40 to 80 atm in steps of 2, temperature 1300 to 1500 °C in steps of 10.
    fn default() -> Self {
        Self {
            pressure: AxisRange::new(40.0, 80.0, 2.0),
            temperature: AxisRange::new(1300.0, 1500.0, 10.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep_counts() {
        let sweep = SweepSpec::default();
        assert_eq!(sweep.pressure.point_count(), 21);
        assert_eq!(sweep.temperature.point_count(), 21);
        assert_eq!(sweep.point_count(), 441);
        assert!(sweep.validate().is_ok());
    }

    #[test]
    fn inexact_division_keeps_max() {
        let range = AxisRange::new(0.0, 0.3, 0.1);
        assert_eq!(range.point_count(), 4);
        let values = range.values();
        assert!((values[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn unreachable_max_is_not_exceeded() {
        let range = AxisRange::new(40.0, 81.0, 2.0);
        assert_eq!(range.point_count(), 21);
        assert_eq!(*range.values().last().unwrap(), 80.0);
    }

    #[test]
    fn step_larger_than_span() {
        let range = AxisRange::new(1.0, 2.0, 5.0);
        assert_eq!(range.values(), vec![1.0]);
    }

    #[test]
    fn values_use_closed_form() {
        let range = AxisRange::new(0.0, 1.0, 0.1);
        assert_eq!(range.point_count(), 11);
        assert_eq!(range.value(7), 0.7000000000000001);
    }

    #[test]
    fn negative_bound_rejected() {
        let sweep = SweepSpec::new(AxisRange::new(-1.0, 10.0, 1.0), AxisRange::new(0.0, 10.0, 1.0));
        assert!(matches!(
            sweep.validate(),
            Err(ValidationError::NegativeBound {
                axis: Axis::Pressure,
                bound: "minimum",
                ..
            })
        ));

        let sweep = SweepSpec::new(AxisRange::new(0.0, 10.0, 1.0), AxisRange::new(0.0, -5.0, 1.0));
        assert!(matches!(
            sweep.validate(),
            Err(ValidationError::NegativeBound {
                axis: Axis::Temperature,
                bound: "maximum",
                ..
            })
        ));
    }

    #[test]
    fn min_not_below_max_rejected() {
        let range = AxisRange::new(80.0, 80.0, 2.0);
        assert!(matches!(
            range.validate(Axis::Pressure),
            Err(ValidationError::EmptyRange { .. })
        ));

        let range = AxisRange::new(1500.0, 1300.0, 10.0);
        assert!(matches!(
            range.validate(Axis::Temperature),
            Err(ValidationError::EmptyRange { .. })
        ));
    }

    #[test]
    fn step_must_be_positive() {
        for step in [0.0, -2.0] {
            let range = AxisRange::new(40.0, 80.0, step);
            assert!(matches!(
                range.validate(Axis::Pressure),
                Err(ValidationError::NonPositiveStep { .. })
            ));
        }
    }

    #[test]
    fn nan_rejected() {
        let range = AxisRange::new(f64::NAN, 80.0, 2.0);
        assert!(matches!(
            range.validate(Axis::Pressure),
            Err(ValidationError::NonFinite { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_axis() {
        let err = AxisRange::new(5.0, 1.0, 1.0)
            .validate(Axis::Temperature)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "temperature minimum must be less than maximum (got 5 >= 1)"
        );
    }

    #[test]
    fn tiny_step_is_too_many_points() {
        let range = AxisRange::new(0.0, 1.0, 1e-300);
        assert_eq!(range.checked_point_count(), None);
        assert_eq!(range.point_count(), usize::MAX);
        assert!(matches!(
            range.validate(Axis::Pressure),
            Err(ValidationError::TooManyPoints {
                axis: Some(Axis::Pressure),
                ..
            })
        ));
    }

    #[test]
    fn too_many_points_message() {
        let err = AxisRange::new(0.0, 1.0, 1e-300)
            .validate(Axis::Temperature)
            .unwrap_err();
        assert_eq!(err.to_string(), "temperature range exceeds 10000000 grid points");
    }

    #[test]
    fn axis_limit_is_inclusive() {
        let step = 1.0;
        #[allow(clippy::cast_precision_loss)]
        let max = (MAX_GRID_POINTS - 1) as f64;
        assert!(AxisRange::new(0.0, max, step).validate(Axis::Pressure).is_ok());
        assert!(matches!(
            AxisRange::new(0.0, max + 1.0, step).validate(Axis::Pressure),
            Err(ValidationError::TooManyPoints { .. })
        ));
    }

    #[test]
    fn grid_product_is_bounded() {
        let sweep = SweepSpec::new(AxisRange::new(0.0, 1.0, 1e-12), AxisRange::new(0.0, 1.0, 1e-12));
        assert_eq!(sweep.checked_point_count(), None);
        assert!(matches!(
            sweep.validate(),
            Err(ValidationError::TooManyPoints {
                axis: Some(Axis::Pressure),
                ..
            })
        ));

        // Each axis fits on its own, the product does not.
        let sweep = SweepSpec::new(AxisRange::new(0.0, 1.0, 1e-4), AxisRange::new(0.0, 1.0, 1e-4));
        assert_eq!(sweep.point_count(), 10_001 * 10_001);
        assert!(matches!(
            sweep.validate(),
            Err(ValidationError::TooManyPoints { axis: None, .. })
        ));
    }
}
