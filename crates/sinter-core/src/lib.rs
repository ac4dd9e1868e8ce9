//! Core types for sinterlab.
//!
//! This crate provides the foundational types shared by the store, the grid
//! engine and the command-line front end:
//!
//! - **Identifiers**: Strongly-typed numeric IDs for users, materials,
//!   coefficient sets and calculation sessions
//! - **Density model**: The six-coefficient polynomial `rho(Pg, T)`
//! - **Sweeps**: Validated (pressure, temperature) ranges with exact point counts
//! - **Summaries**: Min/max/mean/standard deviation of a density column
//!
//! # Example
//!
//! ```
//! use sinter_core::{Coefficients, SweepSpec};
//!
//! let coeffs = Coefficients::from_array([-17.46, -0.00622, 0.04293, 1.5e-5, -1.4e-5, -5e-9]);
//! let sweep = SweepSpec::default();
//! sweep.validate().unwrap();
//!
//! assert_eq!(sweep.point_count(), 441);
//! let rho = coeffs.density(sweep.pressure.min, sweep.temperature.min);
//! assert!((rho - 14.8822).abs() < 1e-9);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;
pub mod model;
pub mod role;
pub mod summary;
pub mod sweep;

pub use error::{RoleError, ValidationError};
pub use ids::{CoefficientSetId, IdError, MaterialId, SessionId, UserId};
pub use model::{Coefficients, OPS_PER_SAMPLE};
pub use role::Role;
pub use summary::{DensitySummary, GridSample};
pub use sweep::{Axis, AxisRange, SweepSpec, MAX_GRID_POINTS};
