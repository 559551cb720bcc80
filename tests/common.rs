//! Test utilities & fixtures.
//! Flow tests run against scratch stores; anything that needs durability
//! across a reopen uses a tempfile-backed path instead.

use wildtree::bot::TreeHandlers;
use wildtree::config::CooldownConfig;
use wildtree::tree::{CooldownPolicy, TreeStore, TreeStoreBuilder};

/// A throwaway store sled removes when the handle drops.
#[allow(dead_code)]
pub fn scratch_store() -> TreeStore {
    TreeStoreBuilder::temporary()
        .open()
        .expect("open scratch store")
}

/// Handler set with default cooldowns over the given store.
#[allow(dead_code)]
pub fn handlers_over(store: TreeStore) -> TreeHandlers {
    let cooldowns = CooldownPolicy::from_config(&CooldownConfig::default());
    TreeHandlers::new(store, cooldowns, "Welcome to Wild Tree! 🌳".to_string())
}

/// Handler set over a throwaway store.
#[allow(dead_code)]
pub fn scratch_handlers() -> TreeHandlers {
    handlers_over(scratch_store())
}
