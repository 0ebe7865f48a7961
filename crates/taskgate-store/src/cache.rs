//! State cache
//!
//! In-memory registry of server states, lazily materialized from the
//! durable repository. This is a registry, not an LRU cache: entries are
//! never evicted and live for the process lifetime. All locking discipline
//! for server-state access is centralized here.

use crate::errors::Result;
use crate::file_repo::StateRepository;
use crate::state::ServerState;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Concurrent, lazily-populated, write-through cache of server states
///
/// Invariants:
/// - at most one in-memory state per server id; concurrent `load`s of an
///   unseen id materialize exactly once and all callers get the same `Arc`
/// - `store` writes through to the repository first, but a durable-write
///   failure is logged and swallowed: the cache stays the operational
///   source of truth, losing only crash-recovery fidelity
pub struct StateCache {
    repository: Box<dyn StateRepository>,
    known: RwLock<HashMap<String, Arc<ServerState>>>,
}

impl StateCache {
    /// Create a cache over the given repository
    pub fn new(repository: Box<dyn StateRepository>) -> Self {
        Self {
            repository,
            known: RwLock::new(HashMap::new()),
        }
    }

    /// Load the state for a server id, materializing it on first access
    ///
    /// Cached entries return without I/O. On a miss the write lock is
    /// taken, the entry re-checked (another caller may have materialized it
    /// while this one waited), and only then is the repository consulted.
    /// An absent snapshot synthesizes the env-seeded default; a corrupt one
    /// propagates as an error and is never overwritten.
    ///
    /// # Errors
    ///
    /// Returns the repository's `Io` or `Corrupt` error when the snapshot
    /// exists but cannot be read.
    pub fn load(&self, server_id: &str) -> Result<Arc<ServerState>> {
        {
            let known = self.known.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(state) = known.get(server_id) {
                return Ok(Arc::clone(state));
            }
        }

        let mut known = self.known.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = known.get(server_id) {
            return Ok(Arc::clone(state));
        }

        let state = match self.repository.read(server_id)? {
            Some(state) => state,
            None => {
                tracing::debug!(server_id, "no durable snapshot; seeding default state");
                ServerState::seeded_from_env(server_id)
            }
        };
        let state = Arc::new(state);
        known.insert(server_id.to_string(), Arc::clone(&state));
        Ok(state)
    }

    /// Replace the state for a server id, writing through to the repository
    ///
    /// The durable write happens under the same lock that guards `load`, so
    /// no concurrent reader can observe a half-written snapshot. A failed
    /// durable write is logged at warn and does not fail the caller; the
    /// cache entry is updated unconditionally either way.
    pub fn store(&self, server_id: &str, state: ServerState) -> Arc<ServerState> {
        let mut known = self.known.write().unwrap_or_else(PoisonError::into_inner);

        if let Err(err) = self.repository.write(server_id, &state) {
            tracing::warn!(
                server_id,
                code = err.code(),
                error = %err,
                "durable state write failed; in-memory state remains authoritative"
            );
        }

        let state = Arc::new(state);
        known.insert(server_id.to_string(), Arc::clone(&state));
        state
    }

    /// Server ids currently materialized in memory
    pub fn known_ids(&self) -> Vec<String> {
        let known = self.known.read().unwrap_or_else(PoisonError::into_inner);
        known.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_repo::FileStateRepository;
    use crate::state::ConfigItem;
    use tempfile::TempDir;

    fn cache_in(dir: &TempDir) -> StateCache {
        StateCache::new(Box::new(FileStateRepository::new(dir.path())))
    }

    #[test]
    fn test_load_unseen_id_synthesizes_default() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        let state = cache.load("srv-fresh").unwrap();
        assert_eq!(state.server_id, "srv-fresh");
        assert!(state.containers.is_empty());
    }

    #[test]
    fn test_load_twice_returns_same_arc() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        let first = cache.load("srv-1").unwrap();
        let second = cache.load("srv-1").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_store_then_load_returns_stored_state() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        let mut state = ServerState::new("srv-1");
        state
            .configuration
            .add_item(ConfigItem::string("TASKGATE_MODE", "managed"));
        let stored = cache.store("srv-1", state);

        let loaded = cache.load("srv-1").unwrap();
        assert!(Arc::ptr_eq(&stored, &loaded));
        assert_eq!(loaded.configuration.value_of("TASKGATE_MODE"), Some("managed"));
    }

    #[test]
    fn test_store_survives_process_restart() {
        let dir = TempDir::new().unwrap();

        let mut state = ServerState::new("srv-1");
        state
            .configuration
            .add_item(ConfigItem::string("TASKGATE_MODE", "managed"));
        cache_in(&dir).store("srv-1", state.clone());

        // Fresh cache over the same root simulates a restart
        let reborn = cache_in(&dir);
        let loaded = reborn.load("srv-1").unwrap();
        assert_eq!(*loaded, state);
    }

    #[test]
    fn test_known_ids_tracks_materialized_entries() {
        let dir = TempDir::new().unwrap();
        let cache = cache_in(&dir);

        cache.load("srv-a").unwrap();
        cache.store("srv-b", ServerState::new("srv-b"));

        let mut ids = cache.known_ids();
        ids.sort();
        assert_eq!(ids, vec!["srv-a".to_string(), "srv-b".to_string()]);
    }
}
