//! # Play Session Management
//!
//! One [`Session`] per logged-in player: it owns the progression engine and
//! mediates between the shell loop and the save store.
//!
//! ## Session Lifecycle
//!
//! 1. **Begin** - any stale snapshot for the username is cleared and a fresh
//!    engine is created; play never resumes a previous session.
//! 2. **Play** - the shell dispatches commands into the engine and triggers
//!    periodic autosaves.
//! 3. **Logout** - the snapshot is cleared and the state discarded.
//!
//! Snapshot writes are fire-and-forget: failures are logged and play
//! continues, since the snapshot is never read back into a live session.

use chrono::{DateTime, Utc};
use log::{debug, warn};

use crate::game::{LevelCatalog, ProgressionEngine, SaveStore};

use super::auth::Authed;

pub struct Session {
    pub user: Authed,
    pub engine: ProgressionEngine,
    pub last_activity: DateTime<Utc>,
}

impl Session {
    /// Start a session for `user` with a fresh default state, discarding any
    /// snapshot a previous session left behind.
    pub fn begin(user: Authed, store: &SaveStore) -> Self {
        if let Err(e) = store.clear(&user.username) {
            warn!("could not clear stale snapshot for {}: {}", user.username, e);
        }
        debug!("session {} started for {}", user.session_id, user.username);
        Self {
            user,
            engine: ProgressionEngine::new(LevelCatalog::standard()),
            last_activity: Utc::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Utc::now();
    }

    /// Snapshot the current state. Fire-and-forget: errors are logged, never
    /// surfaced to the player.
    pub fn autosave(&self, store: &SaveStore) {
        if let Err(e) = store.save(&self.user.username, self.engine.state()) {
            warn!("autosave failed for {}: {}", self.user.username, e);
        } else {
            debug!("autosaved snapshot for {}", self.user.username);
        }
    }

    /// End the session and drop the stored snapshot.
    pub fn logout(self, store: &SaveStore) {
        if let Err(e) = store.clear(&self.user.username) {
            warn!(
                "could not clear snapshot for {} at logout: {}",
                self.user.username, e
            );
        }
        debug!("session {} ended for {}", self.user.session_id, self.user.username);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{PlayerState, SaveStoreBuilder};
    use crate::shell::auth::{AuthProvider, OpenAuth};
    use tempfile::TempDir;

    fn store() -> (SaveStore, TempDir) {
        let dir = TempDir::new().expect("tempdir");
        let store = SaveStoreBuilder::new(dir.path()).open().expect("store");
        (store, dir)
    }

    fn login(name: &str) -> Authed {
        OpenAuth.authenticate(name, "pw").expect("login")
    }

    #[test]
    fn begin_discards_previous_snapshot() {
        let (store, _dir) = store();
        let mut stale = PlayerState::new();
        stale.player_coins = 9999;
        store.save("alice", &stale).expect("seed snapshot");

        let session = Session::begin(login("alice"), &store);
        assert!(store.load("alice").expect("load").is_none());
        // Fresh state, not the stale snapshot.
        assert_eq!(session.engine.state().player_coins, 100);
        assert_eq!(session.engine.state().player_level, 1);
    }

    #[test]
    fn autosave_writes_current_state() {
        let (store, _dir) = store();
        let mut session = Session::begin(login("bob"), &store);
        session.engine.start_level(1).expect("start");
        session.engine.complete_current_task().expect("task");

        session.autosave(&store);
        let snapshot = store.load("bob").expect("load").expect("present");
        assert_eq!(&snapshot, session.engine.state());
    }

    #[test]
    fn logout_clears_the_snapshot() {
        let (store, _dir) = store();
        let session = Session::begin(login("carol"), &store);
        session.autosave(&store);
        assert!(store.load("carol").expect("load").is_some());

        session.logout(&store);
        assert!(store.load("carol").expect("load").is_none());
    }
}
