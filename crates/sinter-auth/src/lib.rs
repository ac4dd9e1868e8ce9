//! Credential hashing for sinterlab.
//!
//! User passwords are never stored in the clear. This crate turns a password
//! into a salted Argon2id digest and checks a candidate password against a
//! stored digest. Authentication failure is an ordinary `false`, never an error.
//!
//! # Example
//!
//! ```
//! use sinter_auth::{hash_password, verify_password, PasswordCost};
//!
//! let digest = hash_password("pass123", PasswordCost::minimal()).unwrap();
//! assert!(verify_password("pass123", &digest));
//! assert!(!verify_password("wrong", &digest));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod password;

pub use error::{AuthError, Result};
pub use password::{hash_password, verify_password, PasswordCost, PasswordDigest};
