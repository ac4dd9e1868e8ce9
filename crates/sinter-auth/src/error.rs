//! Credential error types.

use thiserror::Error;

/// A result type using `AuthError`.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors that can occur while producing credential digests.
///
/// A wrong password is not an error: verification returns `false`.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The configured hashing cost is outside what Argon2 accepts.
    #[error("invalid password hashing parameters: {0}")]
    InvalidParams(String),

    /// Hashing the password failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}
