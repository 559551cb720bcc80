//! Sled-backed persistence for per-user tree state.
//!
//! One long-lived store handle is owned by the handler set for the life of
//! the process; callers never open a connection per action. `ensure` and
//! `update` are atomic per key (compare-and-swap on the absent key, CAS loop
//! for patches), so two racing writers for the same user cannot lose fields.
//! No ordering is guaranteed across different user identifiers.

use std::path::{Path, PathBuf};

use log::debug;
use sled::IVec;

use crate::tree::errors::TreeError;
use crate::tree::types::{UserId, UserPatch, UserRecord, USER_SCHEMA_VERSION};

const TREE_USERS: &str = "wildtree_users";

/// Helper builder so tests can easily create throwaway stores with custom
/// paths or a scratch backing directory.
pub struct TreeStoreBuilder {
    path: Option<PathBuf>,
}

impl TreeStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// A scratch store under a randomized temp path, removed when the handle
    /// drops. Safe to open several in parallel within one process.
    pub fn temporary() -> Self {
        Self { path: None }
    }

    pub fn open(self) -> Result<TreeStore, TreeError> {
        TreeStore::open_with_options(self.path)
    }
}

/// Sled-backed store holding one [`UserRecord`] per user identifier.
pub struct TreeStore {
    _db: sled::Db,
    users: sled::Tree,
}

impl TreeStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        Self::open_with_options(Some(path.as_ref().to_path_buf()))
    }

    fn open_with_options(path: Option<PathBuf>) -> Result<Self, TreeError> {
        let db = match path {
            Some(path) => {
                std::fs::create_dir_all(&path)?;
                sled::Config::new().path(path).open()?
            }
            // No path: a randomized scratch location sled cleans up on drop.
            None => sled::Config::new().temporary(true).open()?,
        };
        let users = db.open_tree(TREE_USERS)?;
        Ok(Self { _db: db, users })
    }

    fn user_key(id: UserId) -> Vec<u8> {
        format!("users:{}", id).into_bytes()
    }

    fn serialize(record: &UserRecord) -> Result<Vec<u8>, TreeError> {
        Ok(bincode::serialize(record)?)
    }

    fn deserialize(bytes: IVec) -> Result<UserRecord, TreeError> {
        let record: UserRecord = bincode::deserialize(&bytes)?;
        if record.schema_version != USER_SCHEMA_VERSION {
            return Err(TreeError::SchemaMismatch {
                entity: "user",
                expected: USER_SCHEMA_VERSION,
                found: record.schema_version,
            });
        }
        Ok(record)
    }

    /// Create a fresh level-1 record for `id` if none exists. Idempotent:
    /// an existing record is returned untouched, never overwritten, even
    /// under a racing double-ensure.
    pub fn ensure(&self, id: UserId) -> Result<UserRecord, TreeError> {
        let key = Self::user_key(id);
        let fresh = UserRecord::new(id);
        let bytes = Self::serialize(&fresh)?;
        match self.users.compare_and_swap(&key, None::<&[u8]>, Some(bytes))? {
            Ok(()) => {
                self.users.flush()?;
                debug!("created user record for {}", id);
                Ok(fresh)
            }
            Err(_) => self.get(id),
        }
    }

    /// Fetch the record for `id`, or `NotFound` if `ensure` was never called.
    pub fn get(&self, id: UserId) -> Result<UserRecord, TreeError> {
        let key = Self::user_key(id);
        let Some(bytes) = self.users.get(&key)? else {
            return Err(TreeError::NotFound(format!("user: {}", id)));
        };
        Self::deserialize(bytes)
    }

    /// Apply `patch` to the stored record for `id` atomically with respect to
    /// other updates of the same identifier, and return the merged record.
    /// Fields the patch leaves unset are untouched.
    pub fn update(&self, id: UserId, patch: &UserPatch) -> Result<UserRecord, TreeError> {
        let key = Self::user_key(id);
        let mut codec_err: Option<TreeError> = None;
        let merged = self.users.update_and_fetch(&key, |old| {
            let bytes = old?;
            match bincode::deserialize::<UserRecord>(bytes) {
                Ok(mut record) => {
                    patch.apply(&mut record);
                    match bincode::serialize(&record) {
                        Ok(updated) => Some(updated),
                        Err(err) => {
                            codec_err = Some(err.into());
                            Some(bytes.to_vec())
                        }
                    }
                }
                Err(err) => {
                    codec_err = Some(err.into());
                    Some(bytes.to_vec())
                }
            }
        })?;
        if let Some(err) = codec_err {
            return Err(err);
        }
        let Some(bytes) = merged else {
            return Err(TreeError::NotFound(format!("user: {}", id)));
        };
        self.users.flush()?;
        Self::deserialize(bytes)
    }

    /// Number of user records currently stored.
    pub fn user_count(&self) -> Result<usize, TreeError> {
        Ok(self.users.scan_prefix(b"users:").count())
    }

    /// List all stored user identifiers.
    pub fn list_user_ids(&self) -> Result<Vec<UserId>, TreeError> {
        let mut ids = Vec::new();
        for entry in self.users.scan_prefix(b"users:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(raw) = text.strip_prefix("users:") {
                if let Ok(id) = raw.parse::<UserId>() {
                    ids.push(id);
                }
            }
        }
        Ok(ids)
    }
}
