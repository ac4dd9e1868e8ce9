//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, Direction, IteratorMode,
    MultiThreaded, Options, WriteBatch,
};
use sinter_auth::{hash_password, verify_password, PasswordCost};
use sinter_core::{
    Coefficients, CoefficientSetId, DensitySummary, GridSample, MaterialId, Role, SessionId,
    SweepSpec, UserId,
};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::keys;
use crate::schema::{all_column_families, cf};
use crate::seed::{self, SeedReport};
use crate::types::{
    AuthenticatedUser, CalculationSession, CoefficientSet, Material, MaterialSummary, User,
};
use crate::Store;

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
    /// Held across every read-check-write sequence (uniqueness checks and id
    /// allocation), so writes are applied one at a time.
    write_lock: Mutex<()>,
    password_cost: PasswordCost,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path with the default
    /// configuration, seeding default data into empty tables.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, created or seeded.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, &StoreConfig::default())
    }

    /// Open or create a `RocksDB` database at the given path.
    ///
    /// Creating the column families is idempotent. When `config.seed_defaults`
    /// is set, the default accounts and material are inserted into whichever of
    /// the user and material tables is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, created or seeded.
    pub fn open_with<P: AsRef<Path>>(path: P, config: &StoreConfig) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors: Vec<_> = all_column_families()
            .into_iter()
            .map(|name| ColumnFamilyDescriptor::new(name, Options::default()))
            .collect();

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::database(&e))?;

        let store = Self {
            db: Arc::new(db),
            write_lock: Mutex::new(()),
            password_cost: config.password_cost,
        };

        if config.seed_defaults {
            store.seed()?;
        }

        Ok(store)
    }

    /// Seed default data into empty tables. Safe to call repeatedly.
    ///
    /// # Errors
    ///
    /// Returns an error if a database operation fails.
    pub fn seed(&self) -> Result<SeedReport> {
        let user_count = self.count(cf::USERS)?;
        let materials_empty = self.is_empty(cf::MATERIALS)?;
        let report = seed::seed_defaults(self, user_count, materials_empty)?;
        if report.is_noop() {
            tracing::debug!("Store already initialized, skipping seed");
        }
        Ok(report)
    }

    /// Get a column family handle.
    fn cf(&self, name: &str) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {name}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read and decode one row.
    fn get_row<T: serde::de::DeserializeOwned>(&self, family: &str, key: &[u8]) -> Result<Option<T>> {
        let cf = self.cf(family)?;
        self.db
            .get_cf(&cf, key)
            .map_err(|e| StoreError::database(&e))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    /// Whether a key exists in a column family.
    fn contains(&self, family: &str, key: &[u8]) -> Result<bool> {
        let cf = self.cf(family)?;
        Ok(self
            .db
            .get_pinned_cf(&cf, key)
            .map_err(|e| StoreError::database(&e))?
            .is_some())
    }

    /// Whether a column family holds no keys at all.
    fn is_empty(&self, family: &str) -> Result<bool> {
        let cf = self.cf(family)?;
        let first = self
            .db
            .iterator_cf(&cf, IteratorMode::Start)
            .next()
            .transpose()
            .map_err(|e| StoreError::database(&e))?;
        Ok(first.is_none())
    }

    /// Number of keys in a column family.
    fn count(&self, family: &str) -> Result<usize> {
        let cf = self.cf(family)?;
        let mut count = 0;
        for entry in self.db.iterator_cf(&cf, IteratorMode::Start) {
            entry.map_err(|e| StoreError::database(&e))?;
            count += 1;
        }
        Ok(count)
    }

    /// Reserve the next id of `table`, recording the new high-water mark in `batch`.
    ///
    /// Must be called with the write lock held, so that no other writer can
    /// observe the same counter value before `batch` is written.
    fn allocate_id(&self, batch: &mut WriteBatch, table: &str) -> Result<u64> {
        let cf_seq = self.cf(cf::SEQUENCES)?;
        let last = self
            .db
            .get_cf(&cf_seq, table.as_bytes())
            .map_err(|e| StoreError::database(&e))?
            .map(|bytes| keys::decode_sequence(&bytes))
            .transpose()
            .map_err(|e| StoreError::Serialization(e.to_string()))?
            .unwrap_or(0);
        let next = last + 1;
        batch.put_cf(&cf_seq, table.as_bytes(), keys::encode_sequence(next));
        Ok(next)
    }

    /// Decode the id stored as the value of a name index entry.
    fn decode_index_id(bytes: &[u8]) -> Result<u64> {
        keys::decode_sequence(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn get_coefficient_set(&self, coefficient_id: CoefficientSetId) -> Result<Option<CoefficientSet>> {
        self.get_row(cf::COEFFICIENT_SETS, &keys::coefficient_key(coefficient_id))
    }

    /// Build the coefficient row and its index entry into `batch`.
    fn stage_coefficients(
        &self,
        batch: &mut WriteBatch,
        material_id: MaterialId,
        coefficients: &Coefficients,
        comment: Option<&str>,
    ) -> Result<CoefficientSet> {
        let cf_sets = self.cf(cf::COEFFICIENT_SETS)?;
        let cf_by_material = self.cf(cf::COEFFICIENT_SETS_BY_MATERIAL)?;

        let coefficient_id = CoefficientSetId::new(self.allocate_id(batch, cf::COEFFICIENT_SETS)?);
        let now = Utc::now();
        let set = CoefficientSet {
            coefficient_id,
            material_id,
            coefficients: *coefficients,
            valid_from: now.date_naive(),
            valid_to: None,
            comment: comment.map(str::to_string),
            created_at: now,
        };

        batch.put_cf(&cf_sets, keys::coefficient_key(coefficient_id), Self::serialize(&set)?);
        batch.put_cf(
            &cf_by_material,
            keys::material_coefficient_key(material_id, coefficient_id),
            [],
        );

        Ok(set)
    }

    /// Keys of a per-material index, oldest first.
    fn scan_material_index(&self, family: &str, material_id: MaterialId) -> Result<Vec<Box<[u8]>>> {
        let cf = self.cf(family)?;
        let prefix = keys::material_prefix(material_id);

        let mut found = Vec::new();
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&prefix, Direction::Forward));

        for item in iter {
            let (key, _) = item.map_err(|e| StoreError::database(&e))?;

            // Stop if we're past the prefix
            if !key.starts_with(&prefix) {
                break;
            }

            found.push(key);
        }

        Ok(found)
    }

    fn write(&self, batch: WriteBatch) -> Result<()> {
        self.db.write(batch).map_err(|e| StoreError::database(&e))
    }
}

impl Store for RocksStore {
    // =========================================================================
    // User Operations
    // =========================================================================

    fn authenticate(&self, login: &str, password: &str) -> Result<Option<AuthenticatedUser>> {
        let Some(user) = self.get_user_by_login(login)? else {
            tracing::debug!(login = %login, "Sign-in rejected: unknown login");
            return Ok(None);
        };

        if !verify_password(password, &user.password_digest) {
            tracing::debug!(login = %login, "Sign-in rejected: wrong password");
            return Ok(None);
        }

        tracing::debug!(user_id = %user.user_id, role = %user.role, "Signed in");
        Ok(Some(AuthenticatedUser {
            user_id: user.user_id,
            role: user.role,
        }))
    }

    fn add_user(&self, login: &str, password: &str, role: Role) -> Result<User> {
        let cf_users = self.cf(cf::USERS)?;
        let cf_by_login = self.cf(cf::USERS_BY_LOGIN)?;

        // Hash outside the lock; Argon2 is deliberately slow.
        let password_digest = hash_password(password, self.password_cost)?;

        let _guard = self.write_lock.lock();

        if self.contains(cf::USERS_BY_LOGIN, keys::login_key(login))? {
            return Err(StoreError::DuplicateName {
                kind: "user",
                name: login.to_string(),
            });
        }

        let mut batch = WriteBatch::default();
        let user_id = UserId::new(self.allocate_id(&mut batch, cf::USERS)?);
        let user = User {
            user_id,
            login: login.to_string(),
            password_digest,
            role,
            created_at: Utc::now(),
        };

        batch.put_cf(&cf_users, keys::user_key(user_id), Self::serialize(&user)?);
        batch.put_cf(&cf_by_login, keys::login_key(login), user_id.to_be_bytes());
        self.write(batch)?;

        tracing::info!(user_id = %user_id, login = %login, role = %role, "Created user");

        Ok(user)
    }

    fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        self.get_row(cf::USERS, &keys::user_key(user_id))
    }

    fn get_user_by_login(&self, login: &str) -> Result<Option<User>> {
        let cf = self.cf(cf::USERS_BY_LOGIN)?;
        let Some(id_bytes) = self
            .db
            .get_cf(&cf, keys::login_key(login))
            .map_err(|e| StoreError::database(&e))?
        else {
            return Ok(None);
        };
        self.get_user(UserId::new(Self::decode_index_id(&id_bytes)?))
    }

    // =========================================================================
    // Material Operations
    // =========================================================================

    fn list_materials(&self) -> Result<Vec<MaterialSummary>> {
        let cf = self.cf(cf::MATERIALS_BY_NAME)?;

        let mut materials = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| StoreError::database(&e))?;
            let name = String::from_utf8(key.into_vec())
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            materials.push(MaterialSummary {
                material_id: MaterialId::new(Self::decode_index_id(&value)?),
                name,
            });
        }

        Ok(materials)
    }

    fn add_material(
        &self,
        name: &str,
        material_type: &str,
        description: &str,
        coefficients: &Coefficients,
    ) -> Result<MaterialId> {
        let cf_materials = self.cf(cf::MATERIALS)?;
        let cf_by_name = self.cf(cf::MATERIALS_BY_NAME)?;

        let _guard = self.write_lock.lock();

        if self.contains(cf::MATERIALS_BY_NAME, keys::material_name_key(name))? {
            return Err(StoreError::DuplicateName {
                kind: "material",
                name: name.to_string(),
            });
        }

        let mut batch = WriteBatch::default();
        let material_id = MaterialId::new(self.allocate_id(&mut batch, cf::MATERIALS)?);
        let material = Material {
            material_id,
            name: name.to_string(),
            material_type: material_type.to_string(),
            description: description.to_string(),
            created_at: Utc::now(),
        };

        batch.put_cf(&cf_materials, keys::material_key(material_id), Self::serialize(&material)?);
        batch.put_cf(&cf_by_name, keys::material_name_key(name), material_id.to_be_bytes());
        let set = self.stage_coefficients(&mut batch, material_id, coefficients, None)?;

        // Material and initial coefficients land together or not at all.
        self.write(batch)?;

        tracing::info!(
            material_id = %material_id,
            coefficient_id = %set.coefficient_id,
            name = %name,
            "Created material"
        );

        Ok(material_id)
    }

    fn get_material(&self, material_id: MaterialId) -> Result<Option<Material>> {
        self.get_row(cf::MATERIALS, &keys::material_key(material_id))
    }

    // =========================================================================
    // Coefficient Operations
    // =========================================================================

    fn current_coefficient_set(&self, material_id: MaterialId) -> Result<Option<CoefficientSet>> {
        let cf = self.cf(cf::COEFFICIENT_SETS_BY_MATERIAL)?;
        let prefix = keys::material_prefix(material_id);
        let upper = keys::material_upper_bound(material_id);

        let newest = self
            .db
            .iterator_cf(&cf, IteratorMode::From(&upper, Direction::Reverse))
            .next()
            .transpose()
            .map_err(|e| StoreError::database(&e))?;

        match newest {
            Some((key, _)) if key.starts_with(&prefix) => {
                let coefficient_id = keys::extract_coefficient_id(&key)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                self.get_coefficient_set(coefficient_id)
            }
            _ => Ok(None),
        }
    }

    fn append_coefficients(
        &self,
        material_id: MaterialId,
        coefficients: &Coefficients,
        comment: Option<&str>,
    ) -> Result<CoefficientSet> {
        let _guard = self.write_lock.lock();

        if !self.contains(cf::MATERIALS, &keys::material_key(material_id))? {
            return Err(StoreError::not_found("material", material_id));
        }

        let mut batch = WriteBatch::default();
        let set = self.stage_coefficients(&mut batch, material_id, coefficients, comment)?;
        self.write(batch)?;

        tracing::info!(
            material_id = %material_id,
            coefficient_id = %set.coefficient_id,
            "Appended coefficient set"
        );

        Ok(set)
    }

    fn coefficient_history(&self, material_id: MaterialId) -> Result<Vec<CoefficientSet>> {
        let mut history = Vec::new();
        for key in self.scan_material_index(cf::COEFFICIENT_SETS_BY_MATERIAL, material_id)? {
            let coefficient_id = keys::extract_coefficient_id(&key)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            if let Some(set) = self.get_coefficient_set(coefficient_id)? {
                history.push(set);
            }
        }
        Ok(history)
    }

    // =========================================================================
    // Session Operations
    // =========================================================================

    fn record_session(
        &self,
        user_id: UserId,
        material_id: MaterialId,
        sweep: &SweepSpec,
        samples: &[GridSample],
        exec_time_sec: f64,
        operations_count: u64,
    ) -> Result<CalculationSession> {
        let cf_sessions = self.cf(cf::CALCULATION_SESSIONS)?;
        let cf_by_material = self.cf(cf::SESSIONS_BY_MATERIAL)?;

        let summary = DensitySummary::from_samples(samples);

        let _guard = self.write_lock.lock();

        if !self.contains(cf::USERS, &keys::user_key(user_id))? {
            return Err(StoreError::not_found("user", user_id));
        }
        if !self.contains(cf::MATERIALS, &keys::material_key(material_id))? {
            return Err(StoreError::not_found("material", material_id));
        }

        let mut batch = WriteBatch::default();
        let session_id = SessionId::new(self.allocate_id(&mut batch, cf::CALCULATION_SESSIONS)?);
        let session = CalculationSession {
            session_id,
            user_id,
            material_id,
            sweep: *sweep,
            num_points: samples.len(),
            operations_count,
            exec_time_sec,
            summary,
            created_at: Utc::now(),
        };

        batch.put_cf(&cf_sessions, keys::session_key(session_id), Self::serialize(&session)?);
        batch.put_cf(
            &cf_by_material,
            keys::material_session_key(material_id, session_id),
            [],
        );
        self.write(batch)?;

        tracing::info!(
            session_id = %session_id,
            user_id = %user_id,
            material_id = %material_id,
            num_points = session.num_points,
            "Recorded calculation session"
        );

        Ok(session)
    }

    fn get_session(&self, session_id: SessionId) -> Result<Option<CalculationSession>> {
        self.get_row(cf::CALCULATION_SESSIONS, &keys::session_key(session_id))
    }

    fn list_sessions(&self, material_id: Option<MaterialId>) -> Result<Vec<CalculationSession>> {
        let mut sessions = Vec::new();

        if let Some(material_id) = material_id {
            for key in self.scan_material_index(cf::SESSIONS_BY_MATERIAL, material_id)? {
                let session_id = keys::extract_session_id(&key)
                    .map_err(|e| StoreError::Serialization(e.to_string()))?;
                if let Some(session) = self.get_session(session_id)? {
                    sessions.push(session);
                }
            }
            return Ok(sessions);
        }

        let cf = self.cf(cf::CALCULATION_SESSIONS)?;
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::database(&e))?;
            sessions.push(Self::deserialize(&value)?);
        }

        Ok(sessions)
    }
}
