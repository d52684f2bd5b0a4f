//! Serialization boundary between the snapshot and the key-value store.
//!
//! This is the one encode/decode pair in the crate: `persist_snapshot` maps
//! the snapshot onto stable field-group keys, `load_snapshot` maps them
//! back. A missing or unreadable group loads as that group's default, so a
//! fresh install and a partially-written store both produce a usable
//! snapshot.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::progress::state::ProgressSnapshot;
use crate::storage::{KeyValueStore, StorageError};

// Stable field-group keys. Renaming any of these orphans persisted data.
pub const KEY_POINTS: &str = "points";
pub const KEY_SCHOLAR_BADGES: &str = "scholar_badges";
pub const KEY_EXPLORER_BADGES: &str = "explorer_badges";
pub const KEY_SELF_REPORTED: &str = "self_reported_sites";
pub const KEY_VERIFIED_VISITS: &str = "verified_visits";
pub const KEY_DISCOVERED_PLACES: &str = "discovered_places";
pub const KEY_COMPLETED_QUIZZES: &str = "completed_quizzes";
pub const KEY_ACHIEVEMENTS: &str = "achievements";
pub const KEY_FAVORITES: &str = "favorites";

/// Write every field group to the store.
pub fn persist_snapshot(
    snapshot: &ProgressSnapshot,
    store: &dyn KeyValueStore,
) -> Result<(), StorageError> {
    set_json(store, KEY_POINTS, &snapshot.total_points)?;
    set_json(store, KEY_SCHOLAR_BADGES, &snapshot.scholar_badges)?;
    set_json(store, KEY_EXPLORER_BADGES, &snapshot.explorer_badges)?;
    set_json(store, KEY_SELF_REPORTED, &snapshot.self_reported_sites)?;
    set_json(store, KEY_VERIFIED_VISITS, &snapshot.verified_visits)?;
    set_json(store, KEY_DISCOVERED_PLACES, &snapshot.discovered_places)?;
    set_json(store, KEY_COMPLETED_QUIZZES, &snapshot.completed_quizzes)?;
    set_json(store, KEY_ACHIEVEMENTS, &snapshot.unlocked_achievements)?;
    set_json(store, KEY_FAVORITES, &snapshot.favorite_sites)?;
    Ok(())
}

/// Read every field group, defaulting whatever is missing or unreadable.
pub fn load_snapshot(store: &dyn KeyValueStore) -> ProgressSnapshot {
    ProgressSnapshot {
        total_points: get_json(store, KEY_POINTS),
        scholar_badges: get_json(store, KEY_SCHOLAR_BADGES),
        explorer_badges: get_json(store, KEY_EXPLORER_BADGES),
        self_reported_sites: get_json(store, KEY_SELF_REPORTED),
        verified_visits: get_json(store, KEY_VERIFIED_VISITS),
        discovered_places: get_json(store, KEY_DISCOVERED_PLACES),
        completed_quizzes: get_json(store, KEY_COMPLETED_QUIZZES),
        unlocked_achievements: get_json(store, KEY_ACHIEVEMENTS),
        favorite_sites: get_json(store, KEY_FAVORITES),
    }
}

fn set_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(value)?;
    store.set(key, &bytes)
}

fn get_json<T: Default + DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> T {
    match store.get(key) {
        Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_default(),
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key, error = %e, "failed to read persisted progress group");
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_round_trip_through_store() {
        let store = MemoryStore::new();

        let mut snapshot = ProgressSnapshot::default();
        snapshot.credit(31);
        snapshot.explorer_badges.insert("abu_simbel".to_string());
        snapshot.self_reported_sites.insert("abu_simbel".to_string());
        snapshot
            .verified_visits
            .insert("abu_simbel".to_string(), 1_700_000_000);
        snapshot.favorite_sites.insert("philae".to_string());

        persist_snapshot(&snapshot, &store).unwrap();
        let loaded = load_snapshot(&store);

        assert_eq!(loaded.total_points, 31);
        assert!(loaded.is_self_reported("abu_simbel"));
        assert_eq!(loaded.last_visit("abu_simbel"), Some(1_700_000_000));
        assert!(loaded.is_favorite("philae"));
    }

    #[test]
    fn test_empty_store_loads_default() {
        let store = MemoryStore::new();
        let loaded = load_snapshot(&store);
        assert_eq!(loaded.total_points, 0);
        assert!(loaded.explorer_badges.is_empty());
    }

    #[test]
    fn test_corrupt_group_falls_back_to_default() {
        let store = MemoryStore::new();
        store.set(KEY_POINTS, b"not json").unwrap();
        store.set(KEY_EXPLORER_BADGES, b"[\"valid\"]").unwrap();

        let loaded = load_snapshot(&store);
        assert_eq!(loaded.total_points, 0, "corrupt group defaults");
        assert!(
            loaded.has_explorer_badge("valid"),
            "intact groups still load"
        );
    }
}
