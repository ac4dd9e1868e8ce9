//! Store configuration.

use serde::Deserialize;
use sinter_auth::PasswordCost;

/// Configuration for opening a store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Seed the default accounts and material into empty tables on open.
    #[serde(default = "StoreConfig::default_seed")]
    pub seed_defaults: bool,

    /// Argon2 cost for newly hashed passwords.
    #[serde(default)]
    pub password_cost: PasswordCost,
}

impl StoreConfig {
    const fn default_seed() -> bool {
        true
    }

    /// A configuration with the cheapest password hashing, for tests.
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            password_cost: PasswordCost::minimal(),
            ..Self::default()
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_defaults: Self::default_seed(),
            password_cost: PasswordCost::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert!(config.seed_defaults);
        assert_eq!(config.password_cost, PasswordCost::default());
    }

    #[test]
    fn test_config_keeps_seeding() {
        let config = StoreConfig::for_tests();
        assert!(config.seed_defaults);
        assert_eq!(config.password_cost, PasswordCost::minimal());
    }
}
