//! Error types for the study service.
//!
//! This module defines all errors that can occur while managing materials and
//! running density studies.

use sinter_core::{MaterialId, Role, ValidationError};
use sinter_store::StoreError;
use thiserror::Error;

/// A result type using `LabError`.
pub type Result<T> = std::result::Result<T, LabError>;

/// Errors that can occur in study service operations.
#[derive(Debug, Error)]
pub enum LabError {
    /// The requested material was not found.
    #[error("material not found: {0}")]
    MaterialNotFound(MaterialId),

    /// The material exists but has no coefficient set.
    #[error("no coefficients found for material {0}")]
    CoefficientsNotFound(MaterialId),

    /// The signed-in role may not perform the action.
    #[error("role {role} is not permitted to {action}")]
    NotPermitted {
        /// Role of the signed-in user.
        role: Role,
        /// The refused action, e.g. `"add materials"`.
        action: &'static str,
    },

    /// A material definition was rejected before reaching the store.
    #[error("invalid material: {0}")]
    InvalidMaterial(String),

    /// The sweep definition is malformed.
    #[error("invalid sweep: {0}")]
    Validation(#[from] ValidationError),

    /// Storage layer error.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl LabError {
    /// Process exit code for a command-line front end.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) | Self::InvalidMaterial(_) => 2,
            Self::MaterialNotFound(_)
            | Self::CoefficientsNotFound(_)
            | Self::Store(StoreError::NotFound { .. }) => 3,
            Self::NotPermitted { .. } => 4,
            Self::Store(StoreError::DuplicateName { .. }) => 5,
            Self::Store(_) => 1,
        }
    }

    /// Returns true if this error might be resolved by retrying.
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        match self {
            Self::Store(err) => err.is_storage_failure(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sinter_core::Axis;

    #[test]
    fn error_exit_codes() {
        assert_eq!(LabError::MaterialNotFound(MaterialId::new(1)).exit_code(), 3);
        assert_eq!(
            LabError::NotPermitted {
                role: Role::Researcher,
                action: "add materials"
            }
            .exit_code(),
            4
        );
        assert_eq!(
            LabError::Validation(ValidationError::NonFinite {
                axis: Axis::Pressure
            })
            .exit_code(),
            2
        );
        assert_eq!(
            LabError::Store(StoreError::DuplicateName {
                kind: "material",
                name: "x".into()
            })
            .exit_code(),
            5
        );
        assert_eq!(LabError::Store(StoreError::Database("io".into())).exit_code(), 1);
    }

    #[test]
    fn only_storage_failures_retry() {
        assert!(LabError::Store(StoreError::Database("io".into())).is_retriable());
        assert!(!LabError::CoefficientsNotFound(MaterialId::new(1)).is_retriable());
    }

    #[test]
    fn duplicate_name_message_is_passed_through() {
        let err = LabError::from(StoreError::DuplicateName {
            kind: "material",
            name: "WC-Co".into(),
        });
        assert_eq!(err.to_string(), "material named \"WC-Co\" already exists");
    }
}
