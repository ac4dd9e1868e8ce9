//! Salted password digests.
//!
//! Digests are Argon2id hashes in PHC string format
//! (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`), so the salt and cost
//! travel with the digest and verification needs no extra configuration.

use std::fmt;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, Result};

/// Argon2id cost settings used when hashing new passwords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCost {
    /// Memory size in KiB.
    #[serde(default = "PasswordCost::default_memory_kib")]
    pub memory_kib: u32,
    /// Number of passes over memory.
    #[serde(default = "PasswordCost::default_iterations")]
    pub iterations: u32,
    /// Degree of parallelism.
    #[serde(default = "PasswordCost::default_parallelism")]
    pub parallelism: u32,
}

impl PasswordCost {
    const fn default_memory_kib() -> u32 {
        Params::DEFAULT_M_COST
    }

    const fn default_iterations() -> u32 {
        Params::DEFAULT_T_COST
    }

    const fn default_parallelism() -> u32 {
        Params::DEFAULT_P_COST
    }

    /// The cheapest cost Argon2 accepts. Only suitable for tests.
    #[must_use]
    pub const fn minimal() -> Self {
        Self {
            memory_kib: Params::MIN_M_COST,
            iterations: Params::MIN_T_COST,
            parallelism: Params::MIN_P_COST,
        }
    }

    fn hasher(self) -> Result<Argon2<'static>> {
        let params = Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| AuthError::InvalidParams(e.to_string()))?;
        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

impl Default for PasswordCost {
    fn default() -> Self {
        Self {
            memory_kib: Self::default_memory_kib(),
            iterations: Self::default_iterations(),
            parallelism: Self::default_parallelism(),
        }
    }
}

/// A stored one-way password digest.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap an already encoded PHC string.
    #[must_use]
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    /// The PHC string encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Never print the digest itself.
impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

/// Hash `password` with a fresh random salt.
///
/// # Errors
///
/// Returns `AuthError::InvalidParams` if `cost` is out of range, or
/// `AuthError::Hashing` if Argon2 fails.
pub fn hash_password(password: &str, cost: PasswordCost) -> Result<PasswordDigest> {
    let salt = SaltString::encode_b64(uuid::Uuid::new_v4().as_bytes())
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    let hash = cost
        .hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(PasswordDigest(hash.to_string()))
}

/// Check `password` against `digest`.
///
/// Malformed digests never match.
#[must_use]
pub fn verify_password(password: &str, digest: &PasswordDigest) -> bool {
    let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
        tracing::warn!("Stored password digest is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let digest = hash_password("pass123", PasswordCost::minimal()).unwrap();
        assert!(digest.as_str().starts_with("$argon2id$"));
        assert!(verify_password("pass123", &digest));
        assert!(!verify_password("pass124", &digest));
        assert!(!verify_password("", &digest));
    }

    #[test]
    fn salts_differ_per_digest() {
        let a = hash_password("admin123", PasswordCost::minimal()).unwrap();
        let b = hash_password("admin123", PasswordCost::minimal()).unwrap();
        assert_ne!(a, b);
        assert!(verify_password("admin123", &a));
        assert!(verify_password("admin123", &b));
    }

    #[test]
    fn unsalted_hex_digest_never_matches() {
        // SHA-256 of "pass123" in hex, as an unsalted scheme would store it.
        let legacy = PasswordDigest::from_phc(
            "9b8769a4a742959a2d0298c36fb70623f2dfacda8436237df08d8dfd5b37374c",
        );
        assert!(!verify_password("pass123", &legacy));
    }

    #[test]
    fn invalid_cost_rejected() {
        let cost = PasswordCost {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        };
        assert!(matches!(
            hash_password("x", cost),
            Err(AuthError::InvalidParams(_))
        ));
    }

    #[test]
    fn debug_hides_digest() {
        let digest = hash_password("secret", PasswordCost::minimal()).unwrap();
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
    }
}
