//! Sled-backed persistence for player save snapshots.
//!
//! Snapshots are fire-and-forget: the session layer writes them on a timer
//! and at logout boundaries, and the progression core never blocks on them.
//! Nothing here loads state into a running game on its own; sessions always
//! begin from a fresh default state, so `load` exists for tooling and tests.

use std::path::{Path, PathBuf};

use sled::IVec;

use super::errors::GameError;
use super::types::{PlayerState, PLAYER_STATE_SCHEMA_VERSION};

const TREE_SAVES: &str = "swiftfood_saves";

/// Helper builder so tests can easily create throwaway stores with custom paths.
pub struct SaveStoreBuilder {
    path: PathBuf,
}

impl SaveStoreBuilder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open(self) -> Result<SaveStore, GameError> {
        SaveStore::open(self.path)
    }
}

/// Sled-backed snapshot store, keyed by lowercased username.
pub struct SaveStore {
    _db: sled::Db,
    saves: sled::Tree,
}

impl SaveStore {
    /// Open (or create) the save store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let saves = db.open_tree(TREE_SAVES)?;
        Ok(Self { _db: db, saves })
    }

    fn save_key(username: &str) -> Vec<u8> {
        format!("saves:{}", username.to_ascii_lowercase()).into_bytes()
    }

    fn serialize(state: &PlayerState) -> Result<Vec<u8>, GameError> {
        Ok(bincode::serialize(state)?)
    }

    fn deserialize(bytes: IVec) -> Result<PlayerState, GameError> {
        Ok(bincode::deserialize::<PlayerState>(&bytes)?)
    }

    /// Write the snapshot for `username`, replacing any previous one.
    pub fn save(&self, username: &str, state: &PlayerState) -> Result<(), GameError> {
        let mut snapshot = state.clone();
        snapshot.schema_version = PLAYER_STATE_SCHEMA_VERSION;
        let bytes = Self::serialize(&snapshot)?;
        self.saves.insert(Self::save_key(username), bytes)?;
        self.saves.flush()?;
        Ok(())
    }

    /// Fetch the stored snapshot, if any.
    pub fn load(&self, username: &str) -> Result<Option<PlayerState>, GameError> {
        let Some(bytes) = self.saves.get(Self::save_key(username))? else {
            return Ok(None);
        };
        let state = Self::deserialize(bytes)?;
        if state.schema_version != PLAYER_STATE_SCHEMA_VERSION {
            return Err(GameError::SchemaMismatch {
                expected: PLAYER_STATE_SCHEMA_VERSION,
                found: state.schema_version,
            });
        }
        Ok(Some(state))
    }

    /// Drop the stored snapshot for `username`. Invoked at session start and
    /// at logout; missing snapshots are not an error.
    pub fn clear(&self, username: &str) -> Result<(), GameError> {
        self.saves.remove(Self::save_key(username))?;
        self.saves.flush()?;
        Ok(())
    }

    /// Usernames with a stored snapshot, for the status tooling.
    pub fn list_save_names(&self) -> Result<Vec<String>, GameError> {
        let mut names = Vec::new();
        for entry in self.saves.scan_prefix(b"saves:") {
            let (key, _) = entry?;
            let text = String::from_utf8_lossy(&key);
            if let Some(name) = text.strip_prefix("saves:") {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn snapshot_round_trip_is_field_for_field_identical() {
        let dir = TempDir::new().expect("tempdir");
        let store = SaveStoreBuilder::new(dir.path()).open().expect("store");

        let mut state = PlayerState::new();
        state.player_level = 2;
        state.player_xp = 25;
        state.player_coins = 155;
        state.current_level_index = 2;
        state.completed_tasks_in_level = 3;

        store.save("Chef", &state).expect("save");
        let fetched = store.load("chef").expect("load").expect("present");
        assert_eq!(fetched, state);
    }

    #[test]
    fn load_without_snapshot_is_none() {
        let dir = TempDir::new().expect("tempdir");
        let store = SaveStoreBuilder::new(dir.path()).open().expect("store");
        assert!(store.load("nobody").expect("load").is_none());
    }

    #[test]
    fn clear_removes_the_snapshot() {
        let dir = TempDir::new().expect("tempdir");
        let store = SaveStoreBuilder::new(dir.path()).open().expect("store");
        store.save("alice", &PlayerState::new()).expect("save");
        assert!(store.load("alice").expect("load").is_some());

        store.clear("alice").expect("clear");
        assert!(store.load("alice").expect("load").is_none());
        // Clearing again is fine.
        store.clear("alice").expect("clear twice");
    }

    #[test]
    fn save_overwrites_previous_snapshot() {
        let dir = TempDir::new().expect("tempdir");
        let store = SaveStoreBuilder::new(dir.path()).open().expect("store");
        store.save("bob", &PlayerState::new()).expect("save");

        let mut later = PlayerState::new();
        later.player_coins = 999;
        store.save("bob", &later).expect("save again");

        let fetched = store.load("bob").expect("load").expect("present");
        assert_eq!(fetched.player_coins, 999);
    }

    #[test]
    fn list_save_names_reports_lowercased_keys() {
        let dir = TempDir::new().expect("tempdir");
        let store = SaveStoreBuilder::new(dir.path()).open().expect("store");
        store.save("Alice", &PlayerState::new()).expect("save");
        store.save("bob", &PlayerState::new()).expect("save");

        let mut names = store.list_save_names().expect("list");
        names.sort();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn schema_mismatch_is_rejected_on_load() {
        let dir = TempDir::new().expect("tempdir");
        let store = SaveStoreBuilder::new(dir.path()).open().expect("store");

        let mut doctored = PlayerState::new();
        doctored.schema_version = 9;
        let bytes = bincode::serialize(&doctored).expect("serialize");
        store
            .saves
            .insert(SaveStore::save_key("carol"), bytes)
            .expect("raw insert");

        let err = store.load("carol").expect_err("should reject");
        assert!(matches!(
            err,
            GameError::SchemaMismatch {
                expected: PLAYER_STATE_SCHEMA_VERSION,
                found: 9
            }
        ));
    }
}
