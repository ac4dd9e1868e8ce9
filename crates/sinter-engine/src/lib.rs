//! Density grid evaluation and study orchestration for sinterlab.
//!
//! This crate evaluates the six-coefficient density model over a
//! pressure/temperature grid and wraps the evaluation in a study service that
//! reads the current coefficients of a material and records every run as a
//! calculation session.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        sinter (CLI)                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     LaboratoryService                       │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │  Sign-in    │ │  Materials  │ │   Studies           │    │
//! │  │  & roles    │ │  & coeffs   │ │   (evaluate_grid)   │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!                       ┌────────────┐
//!                       │   Store    │
//!                       │ (RocksDB)  │
//!                       └────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use sinter_core::SweepSpec;
//! use sinter_engine::{Laboratory, LaboratoryService};
//! use sinter_store::RocksStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RocksStore::open("/tmp/sinterlab-db")?);
//! let lab = LaboratoryService::with_defaults(store);
//!
//! let researcher = lab.sign_in("researcher", "pass123")?.ok_or("bad credentials")?;
//! let material = lab.list_materials()?[0].material_id;
//! let outcome = lab.run_study(&researcher, material, &SweepSpec::default())?;
//!
//! println!(
//!     "{} points, mean density {:.4}",
//!     outcome.evaluation.samples.len(),
//!     outcome.evaluation.summary.mean_density
//! );
//! # Ok(())
//! # }
//! ```
//!
//! The grid itself can be evaluated without a store:
//!
//! ```
//! use sinter_core::{Coefficients, SweepSpec};
//! use sinter_engine::evaluate_grid;
//!
//! let coefficients = Coefficients::from_array([1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
//! let evaluation = evaluate_grid(&coefficients, &SweepSpec::default()).unwrap();
//! assert_eq!(evaluation.samples.len(), 441);
//! assert_eq!(evaluation.operations_count, 441 * 13);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod grid;
pub mod series;
pub mod service;
pub mod types;

pub use error::{LabError, Result};
pub use grid::{evaluate_grid, GridEvaluation};
pub use series::DensityCurve;
pub use service::{Laboratory, LaboratoryService};
pub use types::{LabConfig, NewMaterial, Principal, StudyOutcome};

// Re-export commonly used types from dependencies for convenience
pub use sinter_core::{Coefficients, MaterialId, SessionId, SweepSpec, UserId};
pub use sinter_store::{CalculationSession, CoefficientSet, Material, MaterialSummary};
