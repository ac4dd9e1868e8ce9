//! Study service implementation.
//!
//! This module provides the `Laboratory` trait and `LaboratoryService`
//! implementation that coordinates the store and the grid engine on behalf of a
//! signed-in user.

use std::sync::Arc;

use sinter_core::{MaterialId, SweepSpec};
use sinter_store::{CalculationSession, CoefficientSet, Material, MaterialSummary, Store};

use crate::error::{LabError, Result};
use crate::grid::evaluate_grid;
use crate::types::{LabConfig, NewMaterial, Principal, StudyOutcome};

/// Trait defining the study service operations.
///
/// Every call runs to completion on the calling thread.
pub trait Laboratory: Send + Sync {
    // =========================================================================
    // Access
    // =========================================================================

    /// Check a login and password.
    ///
    /// Returns `None` when the credentials do not match.
    ///
    /// # Errors
    ///
    /// Returns `LabError::Store` only if the store fails.
    fn sign_in(&self, login: &str, password: &str) -> Result<Option<Principal>>;

    // =========================================================================
    // Materials & Coefficients
    // =========================================================================

    /// List all materials by name.
    fn list_materials(&self) -> Result<Vec<MaterialSummary>>;

    /// Get one material.
    ///
    /// # Errors
    ///
    /// Returns `LabError::MaterialNotFound` if the material doesn't exist.
    fn material(&self, material_id: MaterialId) -> Result<Material>;

    /// Create a material with its initial coefficients. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `LabError::NotPermitted` for non-admin users and
    /// `LabError::InvalidMaterial` for an empty name or non-finite coefficients.
    fn add_material(&self, principal: &Principal, request: NewMaterial) -> Result<MaterialId>;

    /// The current coefficient set of a material.
    ///
    /// # Errors
    ///
    /// Returns `LabError::CoefficientsNotFound` if the material has none.
    fn current_coefficients(&self, material_id: MaterialId) -> Result<CoefficientSet>;

    /// Append a new coefficient set. Admin only.
    ///
    /// # Errors
    ///
    /// Returns `LabError::NotPermitted` for non-admin users.
    fn update_coefficients(
        &self,
        principal: &Principal,
        material_id: MaterialId,
        coefficients: sinter_core::Coefficients,
        comment: Option<&str>,
    ) -> Result<CoefficientSet>;

    /// Every coefficient set of a material, oldest first.
    fn coefficient_history(&self, material_id: MaterialId) -> Result<Vec<CoefficientSet>>;

    // =========================================================================
    // Studies
    // =========================================================================

    /// Evaluate the current coefficients of a material over `sweep` and record
    /// the session.
    ///
    /// # Errors
    ///
    /// Returns `LabError::Validation` before touching the store if the sweep is
    /// malformed, and `LabError::CoefficientsNotFound` if the material has no
    /// coefficients.
    fn run_study(
        &self,
        principal: &Principal,
        material_id: MaterialId,
        sweep: &SweepSpec,
    ) -> Result<StudyOutcome>;

    /// Recorded sessions, optionally for one material only.
    fn list_sessions(&self, material_id: Option<MaterialId>) -> Result<Vec<CalculationSession>>;
}

/// The main study service implementation.
pub struct LaboratoryService<S: Store> {
    store: Arc<S>,
    config: LabConfig,
}

impl<S: Store> LaboratoryService<S> {
    /// Create a new study service.
    #[must_use]
    pub fn new(store: Arc<S>, config: LabConfig) -> Self {
        Self { store, config }
    }

    /// Create with default configuration.
    #[must_use]
    pub fn with_defaults(store: Arc<S>) -> Self {
        Self::new(store, LabConfig::default())
    }

    /// Get a reference to the store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &LabConfig {
        &self.config
    }

    /// Refuse the action unless the principal may manage materials.
    fn require_admin(principal: &Principal, action: &'static str) -> Result<()> {
        if !principal.role.can_manage_materials() {
            tracing::warn!(
                user_id = %principal.user_id,
                role = %principal.role,
                action,
                "Refused action"
            );
            return Err(LabError::NotPermitted {
                role: principal.role,
                action,
            });
        }
        Ok(())
    }

    fn validate_material(request: &NewMaterial) -> Result<()> {
        if request.name.trim().is_empty() {
            return Err(LabError::InvalidMaterial(
                "material name must not be empty".to_string(),
            ));
        }
        if !request.coefficients.is_finite() {
            return Err(LabError::InvalidMaterial(
                "coefficients must be finite numbers".to_string(),
            ));
        }
        Ok(())
    }

    /// Get a material or fail with `MaterialNotFound`.
    fn get_material(&self, material_id: MaterialId) -> Result<Material> {
        self.store
            .get_material(material_id)?
            .ok_or(LabError::MaterialNotFound(material_id))
    }
}

impl<S: Store + 'static> Laboratory for LaboratoryService<S> {
    fn sign_in(&self, login: &str, password: &str) -> Result<Option<Principal>> {
        Ok(self
            .store
            .authenticate(login, password)?
            .map(|user| Principal {
                user_id: user.user_id,
                login: login.to_string(),
                role: user.role,
            }))
    }

    fn list_materials(&self) -> Result<Vec<MaterialSummary>> {
        Ok(self.store.list_materials()?)
    }

    fn material(&self, material_id: MaterialId) -> Result<Material> {
        self.get_material(material_id)
    }

    fn add_material(&self, principal: &Principal, request: NewMaterial) -> Result<MaterialId> {
        Self::require_admin(principal, "add materials")?;
        Self::validate_material(&request)?;

        let material_id = self.store.add_material(
            request.name.trim(),
            &request.material_type,
            &request.description,
            &request.coefficients,
        )?;

        tracing::info!(
            material_id = %material_id,
            user_id = %principal.user_id,
            "Added material"
        );

        Ok(material_id)
    }

    fn current_coefficients(&self, material_id: MaterialId) -> Result<CoefficientSet> {
        self.store
            .current_coefficient_set(material_id)?
            .ok_or(LabError::CoefficientsNotFound(material_id))
    }

    fn update_coefficients(
        &self,
        principal: &Principal,
        material_id: MaterialId,
        coefficients: sinter_core::Coefficients,
        comment: Option<&str>,
    ) -> Result<CoefficientSet> {
        Self::require_admin(principal, "edit coefficients")?;
        if !coefficients.is_finite() {
            return Err(LabError::InvalidMaterial(
                "coefficients must be finite numbers".to_string(),
            ));
        }
        self.get_material(material_id)?;

        let set = self
            .store
            .append_coefficients(material_id, &coefficients, comment)?;

        tracing::info!(
            material_id = %material_id,
            coefficient_id = %set.coefficient_id,
            user_id = %principal.user_id,
            "Updated coefficients"
        );

        Ok(set)
    }

    fn coefficient_history(&self, material_id: MaterialId) -> Result<Vec<CoefficientSet>> {
        self.get_material(material_id)?;
        Ok(self.store.coefficient_history(material_id)?)
    }

    fn run_study(
        &self,
        principal: &Principal,
        material_id: MaterialId,
        sweep: &SweepSpec,
    ) -> Result<StudyOutcome> {
        // Reject malformed sweeps before any I/O.
        sweep.validate()?;

        let coefficients = self.current_coefficients(material_id)?.coefficients;
        let evaluation = evaluate_grid(&coefficients, sweep)?;

        let session = self.store.record_session(
            principal.user_id,
            material_id,
            sweep,
            &evaluation.samples,
            evaluation.elapsed_seconds(),
            evaluation.operations_count,
        )?;

        tracing::info!(
            session_id = %session.session_id,
            material_id = %material_id,
            points = evaluation.samples.len(),
            elapsed_s = evaluation.elapsed_seconds(),
            "Completed density study"
        );

        Ok(StudyOutcome {
            evaluation,
            session,
        })
    }

    fn list_sessions(&self, material_id: Option<MaterialId>) -> Result<Vec<CalculationSession>> {
        Ok(self.store.list_sessions(material_id)?)
    }
}
