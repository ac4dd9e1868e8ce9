//! Error types for the storage layer.

use thiserror::Error;

/// A result type using `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during storage operations.
///
/// Callers never see a `rocksdb` error directly: every backend failure is
/// flattened into `Database` or `Serialization`.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique name (material name or user login) is already taken.
    #[error("{kind} named {name:?} already exists")]
    DuplicateName {
        /// What kind of record collided, e.g. `"material"`.
        kind: &'static str,
        /// The rejected name.
        name: String,
    },

    /// The requested record was not found.
    #[error("{kind} {id} not found")]
    NotFound {
        /// What kind of record was looked up.
        kind: &'static str,
        /// The identifier that was looked up.
        id: String,
    },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(String),

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Producing a credential digest failed.
    #[error("credential error: {0}")]
    Credential(#[from] sinter_auth::AuthError),
}

impl StoreError {
    pub(crate) fn not_found(kind: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub(crate) fn database(err: &rocksdb::Error) -> Self {
        Self::Database(err.to_string())
    }

    /// Returns true for failures of the persistence layer itself, as opposed to
    /// a request that conflicts with stored data.
    #[must_use]
    pub const fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Serialization(_) | Self::Credential(_)
        )
    }
}
