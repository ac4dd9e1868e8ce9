//! Database schema definitions and column families.
//!
//! Each logical table is one column family holding CBOR rows keyed by the
//! big-endian row id. The `*_by_*` families are key-only indexes.

/// Column family names for the `RocksDB` database.
pub mod cf {
    /// User records, keyed by `user_id`.
    pub const USERS: &str = "users";

    /// Index: unique login, keyed by `login` with the `user_id` as value.
    pub const USERS_BY_LOGIN: &str = "users_by_login";

    /// Material records, keyed by `material_id`.
    pub const MATERIALS: &str = "materials";

    /// Index: unique material name, keyed by `name` with the `material_id` as value.
    ///
    /// Iteration order of this family is the name order used for listings.
    pub const MATERIALS_BY_NAME: &str = "materials_by_name";

    /// Append-only coefficient sets, keyed by `coefficient_id`.
    pub const COEFFICIENT_SETS: &str = "coefficient_sets";

    /// Index: coefficient sets per material, keyed by `material_id || coefficient_id`.
    pub const COEFFICIENT_SETS_BY_MATERIAL: &str = "coefficient_sets_by_material";

    /// Immutable calculation session records, keyed by `session_id`.
    pub const CALCULATION_SESSIONS: &str = "calculation_sessions";

    /// Index: sessions per material, keyed by `material_id || session_id`.
    pub const SESSIONS_BY_MATERIAL: &str = "sessions_by_material";

    /// Last allocated id per table, keyed by the table's column family name.
    pub const SEQUENCES: &str = "sequences";
}

/// Returns all column family names for database initialization.
#[must_use]
pub fn all_column_families() -> Vec<&'static str> {
    vec![
        cf::USERS,
        cf::USERS_BY_LOGIN,
        cf::MATERIALS,
        cf::MATERIALS_BY_NAME,
        cf::COEFFICIENT_SETS,
        cf::COEFFICIENT_SETS_BY_MATERIAL,
        cf::CALCULATION_SESSIONS,
        cf::SESSIONS_BY_MATERIAL,
        cf::SEQUENCES,
    ]
}
