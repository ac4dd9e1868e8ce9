//! Access-control roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RoleError;

/// The role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Runs density studies against existing materials.
    Researcher,
    /// Additionally manages materials and their coefficients.
    Admin,
}

impl Role {
    /// The canonical lowercase name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Researcher => "researcher",
            Self::Admin => "admin",
        }
    }

    /// Whether the role may create materials and edit coefficients.
    #[must_use]
    pub const fn can_manage_materials(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "researcher" => Ok(Self::Researcher),
            "admin" => Ok(Self::Admin),
            other => Err(RoleError(other.to_string())),
        }
    }
}
