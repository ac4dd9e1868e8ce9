//! Core identifier types for sinterlab.
//!
//! Every persisted entity is addressed by a numeric identifier allocated by the
//! store from a per-table sequence. The newtypes keep the different id spaces
//! apart at compile time and provide the big-endian encoding used for ordered
//! storage keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! numeric_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Create an identifier from its raw value.
            #[must_use]
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Return the raw numeric value.
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }

            /// Big-endian bytes, so that byte order matches numeric order.
            #[must_use]
            pub const fn to_be_bytes(self) -> [u8; 8] {
                self.0.to_be_bytes()
            }

            /// Decode an identifier from the first eight bytes of `bytes`.
            ///
            /// # Errors
            ///
            /// Returns `IdError::InvalidLength` if fewer than eight bytes are given.
            pub fn from_be_slice(bytes: &[u8]) -> Result<Self, IdError> {
                let arr: [u8; 8] = bytes
                    .get(..8)
                    .and_then(|b| b.try_into().ok())
                    .ok_or(IdError::InvalidLength {
                        expected: 8,
                        got: bytes.len(),
                    })?;
                Ok(Self(u64::from_be_bytes(arr)))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| IdError::InvalidNumber(s.to_string()))
            }
        }

        impl From<$name> for u64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

numeric_id!(
    /// Identifier of a user account.
    UserId
);

numeric_id!(
    /// Identifier of a material under study.
    MaterialId
);

numeric_id!(
    /// Identifier of one versioned coefficient set.
    ///
    /// Allocated monotonically, so a higher id always means a newer set.
    CoefficientSetId
);

numeric_id!(
    /// Identifier of a persisted calculation session.
    SessionId
);

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input is not a non-negative integer.
    #[error("invalid identifier: {0:?}")]
    InvalidNumber(String),

    /// The input has an incorrect length.
    #[error("invalid length: expected {expected} bytes, got {got}")]
    InvalidLength {
        /// The expected number of bytes.
        expected: usize,
        /// The actual number of bytes.
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_order_matches_numeric_order() {
        let low = MaterialId::new(9).to_be_bytes();
        let high = MaterialId::new(256).to_be_bytes();
        assert!(low < high);
    }

    #[test]
    fn decode_from_longer_key() {
        let mut key = MaterialId::new(7).to_be_bytes().to_vec();
        key.extend_from_slice(&CoefficientSetId::new(3).to_be_bytes());

        assert_eq!(MaterialId::from_be_slice(&key).unwrap(), MaterialId::new(7));
        assert_eq!(
            CoefficientSetId::from_be_slice(&key[8..]).unwrap(),
            CoefficientSetId::new(3)
        );
    }

    #[test]
    fn decode_short_key_fails() {
        let result = UserId::from_be_slice(&[1, 2, 3]);
        assert!(matches!(
            result,
            Err(IdError::InvalidLength {
                expected: 8,
                got: 3
            })
        ));
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("42".parse::<SessionId>().unwrap(), SessionId::new(42));
        assert!(matches!(
            "forty".parse::<SessionId>(),
            Err(IdError::InvalidNumber(_))
        ));
    }

    #[test]
    fn serde_is_transparent() {
        let json = serde_json::to_string(&UserId::new(5)).unwrap();
        assert_eq!(json, "5");
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, UserId::new(5));
    }

    #[test]
    fn debug_names_the_id_space() {
        assert_eq!(format!("{:?}", MaterialId::new(1)), "MaterialId(1)");
    }
}
