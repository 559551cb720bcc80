//! Tree state and progression core: per-user records, Sled-backed storage,
//! the experience curve, and cooldown gating. The interaction layer in
//! [`crate::bot`] drives these pieces; nothing here touches the transport.

pub mod cooldown;
pub mod errors;
pub mod progression;
pub mod storage;
pub mod types;

pub use cooldown::{CooldownPolicy, GatedAction, Remaining};
pub use errors::TreeError;
pub use progression::{apply_experience, experience_required, LevelUp, MAX_LEVEL};
pub use storage::{TreeStore, TreeStoreBuilder};
pub use types::{UserId, UserPatch, UserRecord, USER_SCHEMA_VERSION};
