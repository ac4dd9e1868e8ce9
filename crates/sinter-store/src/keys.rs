//! Key encoding utilities for `RocksDB`.
//!
//! Ids are encoded big-endian so that lexicographic key order equals numeric
//! order, which makes "latest row for a material" a reverse prefix seek.

use sinter_core::{CoefficientSetId, IdError, MaterialId, SessionId, UserId};

/// Encode a user key (the user ID bytes).
#[must_use]
pub fn user_key(user_id: UserId) -> [u8; 8] {
    user_id.to_be_bytes()
}

/// Encode a login index key.
#[must_use]
pub fn login_key(login: &str) -> &[u8] {
    login.as_bytes()
}

/// Encode a material key (the material ID bytes).
#[must_use]
pub fn material_key(material_id: MaterialId) -> [u8; 8] {
    material_id.to_be_bytes()
}

/// Encode a material name index key.
#[must_use]
pub fn material_name_key(name: &str) -> &[u8] {
    name.as_bytes()
}

/// Encode a coefficient set key (the coefficient set ID bytes).
#[must_use]
pub fn coefficient_key(coefficient_id: CoefficientSetId) -> [u8; 8] {
    coefficient_id.to_be_bytes()
}

/// Encode a material-coefficient index key: `material_id || coefficient_id`.
#[must_use]
pub fn material_coefficient_key(material_id: MaterialId, coefficient_id: CoefficientSetId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&material_id.to_be_bytes());
    key.extend_from_slice(&coefficient_id.to_be_bytes());
    key
}

/// Encode a session key (the session ID bytes).
#[must_use]
pub fn session_key(session_id: SessionId) -> [u8; 8] {
    session_id.to_be_bytes()
}

/// Encode a material-session index key: `material_id || session_id`.
#[must_use]
pub fn material_session_key(material_id: MaterialId, session_id: SessionId) -> Vec<u8> {
    let mut key = Vec::with_capacity(16);
    key.extend_from_slice(&material_id.to_be_bytes());
    key.extend_from_slice(&session_id.to_be_bytes());
    key
}

/// Encode a material prefix for scanning the per-material indexes.
#[must_use]
pub fn material_prefix(material_id: MaterialId) -> [u8; 8] {
    material_id.to_be_bytes()
}

/// The largest possible key under a material prefix, used to seek backwards
/// to the newest entry.
#[must_use]
pub fn material_upper_bound(material_id: MaterialId) -> Vec<u8> {
    material_coefficient_key(material_id, CoefficientSetId::new(u64::MAX))
}

/// Extract the coefficient set ID from a material-coefficient key.
///
/// # Errors
///
/// Returns an error if the key is shorter than 16 bytes.
pub fn extract_coefficient_id(key: &[u8]) -> Result<CoefficientSetId, IdError> {
    CoefficientSetId::from_be_slice(key.get(8..).unwrap_or_default())
}

/// Extract the session ID from a material-session key.
///
/// # Errors
///
/// Returns an error if the key is shorter than 16 bytes.
pub fn extract_session_id(key: &[u8]) -> Result<SessionId, IdError> {
    SessionId::from_be_slice(key.get(8..).unwrap_or_default())
}

/// Encode a sequence counter value.
#[must_use]
pub fn encode_sequence(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

/// Decode a sequence counter value.
///
/// # Errors
///
/// Returns an error if the value is not eight bytes.
pub fn decode_sequence(bytes: &[u8]) -> Result<u64, IdError> {
    let arr: [u8; 8] = bytes.try_into().map_err(|_| IdError::InvalidLength {
        expected: 8,
        got: bytes.len(),
    })?;
    Ok(u64::from_be_bytes(arr))
}
