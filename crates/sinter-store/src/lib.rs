//! `RocksDB` storage layer for sinterlab.
//!
//! This crate provides persistent storage for users, materials, coefficient
//! history and calculation sessions using `RocksDB` with one column family per
//! logical table plus index families.
//!
//! # Architecture
//!
//! The storage uses the following column families:
//!
//! - `users`, `users_by_login`: Accounts and their unique login index
//! - `materials`, `materials_by_name`: Materials and their unique name index
//! - `coefficient_sets`, `coefficient_sets_by_material`: Append-only coefficient history
//! - `calculation_sessions`, `sessions_by_material`: Immutable evaluation audit records
//! - `sequences`: Last allocated id per table
//!
//! # Example
//!
//! ```no_run
//! use sinter_store::{RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/sinterlab-db").unwrap();
//!
//! // Sign in with one of the seeded accounts
//! let user = store.authenticate("researcher", "pass123").unwrap();
//! assert!(user.is_some());
//!
//! for material in store.list_materials().unwrap() {
//!     println!("{} {}", material.material_id, material.name);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod keys;
pub mod rocks;
pub mod schema;
pub mod seed;
pub mod types;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use rocks::RocksStore;
pub use types::{
    AuthenticatedUser, CalculationSession, CoefficientSet, Material, MaterialSummary, User,
};

use sinter_core::{Coefficients, GridSample, MaterialId, Role, SessionId, SweepSpec, UserId};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different implementations
/// (e.g., `RocksDB`, in-memory for testing). Implementations are the sole writer
/// of persisted state and must serialize their writes.
pub trait Store: Send + Sync {
    // =========================================================================
    // User Operations
    // =========================================================================

    /// Check a login and password.
    ///
    /// Returns `None` when the login is unknown or the password does not match.
    ///
    /// # Errors
    ///
    /// Returns an error only if the database operation fails.
    fn authenticate(&self, login: &str, password: &str) -> Result<Option<AuthenticatedUser>>;

    /// Create a user account with a freshly salted password digest.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateName` if the login is taken.
    fn add_user(&self, login: &str, password: &str, role: Role) -> Result<User>;

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user(&self, user_id: UserId) -> Result<Option<User>>;

    /// Get a user by login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_user_by_login(&self, login: &str) -> Result<Option<User>>;

    // =========================================================================
    // Material Operations
    // =========================================================================

    /// List all materials, sorted by name ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_materials(&self) -> Result<Vec<MaterialSummary>>;

    /// Create a material together with its initial coefficient set.
    ///
    /// Both rows are written atomically.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateName` if a material with this name exists;
    /// nothing is written in that case.
    fn add_material(
        &self,
        name: &str,
        material_type: &str,
        description: &str,
        coefficients: &Coefficients,
    ) -> Result<MaterialId>;

    /// Get a material by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_material(&self, material_id: MaterialId) -> Result<Option<Material>>;

    // =========================================================================
    // Coefficient Operations
    // =========================================================================

    /// Get the most recently appended coefficient set of a material.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn current_coefficient_set(&self, material_id: MaterialId) -> Result<Option<CoefficientSet>>;

    /// Get the current coefficients of a material.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_current_coefficients(&self, material_id: MaterialId) -> Result<Option<Coefficients>> {
        Ok(self
            .current_coefficient_set(material_id)?
            .map(|set| set.coefficients))
    }

    /// Append a new coefficient set, valid from today.
    ///
    /// Earlier sets are never modified or removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the material doesn't exist.
    fn append_coefficients(
        &self,
        material_id: MaterialId,
        coefficients: &Coefficients,
        comment: Option<&str>,
    ) -> Result<CoefficientSet>;

    /// All coefficient sets of a material, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn coefficient_history(&self, material_id: MaterialId) -> Result<Vec<CoefficientSet>>;

    // =========================================================================
    // Session Operations
    // =========================================================================

    /// Summarize `samples` and persist one immutable session record.
    ///
    /// An empty sample slice is recorded with `NaN` statistics.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user or the material doesn't exist.
    fn record_session(
        &self,
        user_id: UserId,
        material_id: MaterialId,
        sweep: &SweepSpec,
        samples: &[GridSample],
        exec_time_sec: f64,
        operations_count: u64,
    ) -> Result<CalculationSession>;

    /// Get a session by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_session(&self, session_id: SessionId) -> Result<Option<CalculationSession>>;

    /// List sessions in creation order, optionally restricted to one material.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_sessions(&self, material_id: Option<MaterialId>) -> Result<Vec<CalculationSession>>;
}
