//! Request and response types for study service operations.

use serde::{Deserialize, Serialize};
use sinter_core::{Coefficients, Role, SweepSpec, UserId};
use sinter_store::CalculationSession;

use crate::grid::GridEvaluation;

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identifier of the user.
    pub user_id: UserId,
    /// Login the user signed in with.
    pub login: String,
    /// Access role.
    pub role: Role,
}

/// Request to create a new material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMaterial {
    /// Unique human-readable name.
    pub name: String,
    /// Free-text material class.
    #[serde(default)]
    pub material_type: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Initial model coefficients.
    pub coefficients: Coefficients,
}

impl NewMaterial {
    /// Create a request with empty type and description.
    #[must_use]
    pub fn new(name: impl Into<String>, coefficients: Coefficients) -> Self {
        Self {
            name: name.into(),
            material_type: String::new(),
            description: String::new(),
            coefficients,
        }
    }
}

/// A completed study: the evaluated grid and its persisted audit record.
#[derive(Debug, Clone)]
pub struct StudyOutcome {
    /// Samples, statistics and timing of the evaluation.
    pub evaluation: GridEvaluation,
    /// The session recorded for the evaluation.
    pub session: CalculationSession,
}

/// Configuration for the study service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabConfig {
    /// Sweep used when a request leaves bounds unspecified.
    #[serde(default)]
    pub default_sweep: SweepSpec,
}
