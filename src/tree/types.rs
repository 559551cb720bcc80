use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const USER_SCHEMA_VERSION: u8 = 1;

/// Opaque external user identifier, supplied by the transport.
pub type UserId = u64;

/// Persistent state tracked per user. One record per [`UserId`], created on
/// first contact and rewritten by every state-mutating action.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    /// First-contact timestamp; set once, never mutated afterwards.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_water_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_sun_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_daily_at: Option<DateTime<Utc>>,
    /// Tree level in `[1, MAX_LEVEL]`, never decreasing.
    pub level: u32,
    /// Experience toward the next level; consumed by level-up rollover.
    pub exp: u32,
    pub sun: u32,
    pub water: u32,
    pub schema_version: u8,
}

impl UserRecord {
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            last_water_at: None,
            last_sun_at: None,
            last_daily_at: None,
            level: 1,
            exp: 0,
            sun: 0,
            water: 0,
            schema_version: USER_SCHEMA_VERSION,
        }
    }
}

/// Explicit partial update for [`UserRecord`]. Fields left as `None` are
/// untouched by [`TreeStore::update`](crate::tree::TreeStore::update);
/// `id` and `created_at` are not patchable.
#[derive(Debug, Default, Clone)]
pub struct UserPatch {
    pub last_water_at: Option<DateTime<Utc>>,
    pub last_sun_at: Option<DateTime<Utc>>,
    pub last_daily_at: Option<DateTime<Utc>>,
    pub level: Option<u32>,
    pub exp: Option<u32>,
    pub sun: Option<u32>,
    pub water: Option<u32>,
}

impl UserPatch {
    /// Copy every named field onto `record`.
    pub fn apply(&self, record: &mut UserRecord) {
        if let Some(ts) = self.last_water_at {
            record.last_water_at = Some(ts);
        }
        if let Some(ts) = self.last_sun_at {
            record.last_sun_at = Some(ts);
        }
        if let Some(ts) = self.last_daily_at {
            record.last_daily_at = Some(ts);
        }
        if let Some(level) = self.level {
            record.level = level;
        }
        if let Some(exp) = self.exp {
            record.exp = exp;
        }
        if let Some(sun) = self.sun {
            record.sun = sun;
        }
        if let Some(water) = self.water {
            record.water = water;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.last_water_at.is_none()
            && self.last_sun_at.is_none()
            && self.last_daily_at.is_none()
            && self.level.is_none()
            && self.exp.is_none()
            && self.sun.is_none()
            && self.water.is_none()
    }
}
