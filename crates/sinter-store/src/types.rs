//! Domain types stored in the database.
//!
//! These types represent the persisted state of users, materials, coefficient
//! history and calculation sessions. Every row is written once; none of them
//! is updated in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sinter_auth::PasswordDigest;
use sinter_core::{
    Coefficients, CoefficientSetId, DensitySummary, MaterialId, Role, SessionId, SweepSpec, UserId,
};

/// A user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub user_id: UserId,
    /// Unique login name.
    pub login: String,
    /// Salted one-way digest of the password.
    pub password_digest: PasswordDigest,
    /// Access role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// The identity returned by a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The signed-in user.
    pub user_id: UserId,
    /// Access role of the user.
    pub role: Role,
}

/// A material under study.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Material {
    /// Unique identifier for the material.
    pub material_id: MaterialId,
    /// Unique human-readable name.
    pub name: String,
    /// Free-text material class, e.g. "hard alloy".
    pub material_type: String,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A `(id, name)` pair for material listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialSummary {
    /// Identifier of the material.
    pub material_id: MaterialId,
    /// Name of the material.
    pub name: String,
}

/// One version of a material's model coefficients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoefficientSet {
    /// Unique, monotonically allocated identifier.
    pub coefficient_id: CoefficientSetId,
    /// Material these coefficients belong to.
    pub material_id: MaterialId,
    /// The six polynomial coefficients.
    pub coefficients: Coefficients,
    /// First day the set is valid.
    pub valid_from: NaiveDate,
    /// Reserved. Never set by any write path.
    #[serde(default)]
    pub valid_to: Option<NaiveDate>,
    /// Optional free-text note.
    #[serde(default)]
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Audit record of one completed grid evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationSession {
    /// Unique identifier for the session.
    pub session_id: SessionId,
    /// User who ran the evaluation.
    pub user_id: UserId,
    /// Material that was evaluated.
    pub material_id: MaterialId,
    /// The requested sweep.
    pub sweep: SweepSpec,
    /// Number of grid points produced.
    pub num_points: usize,
    /// Elementary operation count reported by the engine.
    pub operations_count: u64,
    /// Wall-clock evaluation time in seconds.
    pub exec_time_sec: f64,
    /// Density statistics over all samples.
    pub summary: DensitySummary,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}
