//! Common error types for sinterlab.
//!
//! These errors are shared by the store, the engine and the command-line front end.

use thiserror::Error;

use crate::sweep::Axis;

/// A malformed sweep definition, detected before any evaluation starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A bound of the sweep is below zero.
    #[error("{axis} {bound} must not be negative (got {value})")]
    NegativeBound {
        /// The offending axis.
        axis: Axis,
        /// Which bound, `"minimum"` or `"maximum"`.
        bound: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// The minimum is not strictly below the maximum.
    #[error("{axis} minimum must be less than maximum (got {min} >= {max})")]
    EmptyRange {
        /// The offending axis.
        axis: Axis,
        /// The requested minimum.
        min: f64,
        /// The requested maximum.
        max: f64,
    },

    /// The step is zero or negative.
    #[error("{axis} step must be positive (got {step})")]
    NonPositiveStep {
        /// The offending axis.
        axis: Axis,
        /// The rejected step.
        step: f64,
    },

    /// A bound or step is NaN or infinite.
    #[error("{axis} range contains a non-finite value")]
    NonFinite {
        /// The offending axis.
        axis: Axis,
    },

    /// The sweep would produce more grid points than allowed.
    #[error("{} exceeds {limit} grid points", grid_scope(.axis))]
    TooManyPoints {
        /// The offending axis, or `None` when only the full grid is too large.
        axis: Option<Axis>,
        /// The point limit.
        limit: usize,
    },
}

fn grid_scope(axis: &Option<Axis>) -> String {
    axis.map_or_else(|| "sweep".to_string(), |a| format!("{a} range"))
}

/// An unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0:?} (expected \"researcher\" or \"admin\")")]
pub struct RoleError(pub String);
