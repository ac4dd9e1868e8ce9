//! Default data for a fresh store.
//!
//! A new database gets one researcher account, one admin account and one
//! reference material (a WC-Ni hard alloy) with its fitted coefficients. The
//! material is seeded only while its table is empty. Default accounts are
//! seeded while the user table holds nothing but default accounts, so a pass
//! interrupted between two accounts is completed on the next open.

use sinter_core::{Coefficients, Role};

use crate::error::Result;
use crate::Store;

/// A seeded account.
#[derive(Debug, Clone, Copy)]
pub struct SeedAccount {
    /// Login name.
    pub login: &'static str,
    /// Initial password.
    pub password: &'static str,
    /// Access role.
    pub role: Role,
}

/// Accounts created when the user table is empty.
pub const DEFAULT_ACCOUNTS: [SeedAccount; 2] = [
    SeedAccount {
        login: "researcher",
        password: "pass123",
        role: Role::Researcher,
    },
    SeedAccount {
        login: "admin",
        password: "admin123",
        role: Role::Admin,
    },
];

/// Name of the material created when the material table is empty.
pub const DEFAULT_MATERIAL_NAME: &str = "Карбид вольфрама-никель";

/// Type of the default material.
pub const DEFAULT_MATERIAL_TYPE: &str = "Твёрдый сплав";

/// Description of the default material.
pub const DEFAULT_MATERIAL_DESCRIPTION: &str =
    "WC-Ni композит для производства режущего инструмента";

/// Fitted coefficients of the default material.
pub const DEFAULT_COEFFICIENTS: Coefficients =
    Coefficients::from_array([-17.46, -0.00622, 0.04293, 1.5e-5, -1.4e-5, -5e-9]);

/// What a seeding pass created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Number of accounts created.
    pub users_created: usize,
    /// Whether the default material was created.
    pub material_created: bool,
}

impl SeedReport {
    /// Whether the pass wrote nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.users_created == 0 && !self.material_created
    }
}

/// Seed `store` where its tables are empty.
///
/// `user_count` and `materials_empty` describe the tables as the caller, which
/// owns them, sees them. Missing default accounts are created only when every
/// existing user is a default account.
///
/// # Errors
///
/// Returns an error if any lookup or insert fails.
pub fn seed_defaults<S: Store + ?Sized>(
    store: &S,
    user_count: usize,
    materials_empty: bool,
) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    let mut missing = Vec::new();
    for account in DEFAULT_ACCOUNTS {
        if store.get_user_by_login(account.login)?.is_none() {
            missing.push(account);
        }
    }

    if user_count + missing.len() == DEFAULT_ACCOUNTS.len() {
        for account in missing {
            store.add_user(account.login, account.password, account.role)?;
            report.users_created += 1;
        }
    }

    if materials_empty {
        store.add_material(
            DEFAULT_MATERIAL_NAME,
            DEFAULT_MATERIAL_TYPE,
            DEFAULT_MATERIAL_DESCRIPTION,
            &DEFAULT_COEFFICIENTS,
        )?;
        report.material_created = true;
    }

    if !report.is_noop() {
        tracing::info!(
            users_created = report.users_created,
            material_created = report.material_created,
            "Seeded default data"
        );
    }

    Ok(report)
}
