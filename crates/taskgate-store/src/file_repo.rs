//! File-backed state repository
//!
//! One JSON resource per server id, named `<server_id>.json` inside a
//! configured root directory. This is the only component in the store crate
//! that touches the filesystem.

use crate::atomic::atomic_replace;
use crate::errors::{io_error, Result, StoreError};
use crate::state::ServerState;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable snapshot storage for server states
///
/// `read` distinguishes an absent snapshot (`Ok(None)`, the caller may
/// synthesize a default) from a corrupt one (`Err`, fatal configuration —
/// never silently overwritten).
pub trait StateRepository: Send + Sync {
    /// Read the durable snapshot for a server id, if one exists
    ///
    /// # Errors
    ///
    /// Returns `Io` when the resource cannot be read, `Corrupt` when it
    /// exists but does not parse as a valid state.
    fn read(&self, server_id: &str) -> Result<Option<ServerState>>;

    /// Durably write the full state for a server id
    ///
    /// # Errors
    ///
    /// Returns `Serialize` or `Io`; on failure no partially written
    /// resource is left behind.
    fn write(&self, server_id: &str, state: &ServerState) -> Result<()>;
}

/// Filesystem implementation of [`StateRepository`]
pub struct FileStateRepository {
    root: PathBuf,
}

impl FileStateRepository {
    /// Create a repository rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Repository rooted at the current working directory
    pub fn in_current_dir() -> Self {
        Self::new(".")
    }

    fn snapshot_path(&self, server_id: &str) -> PathBuf {
        self.root.join(format!("{server_id}.json"))
    }
}

impl StateRepository for FileStateRepository {
    fn read(&self, server_id: &str) -> Result<Option<ServerState>> {
        let path = self.snapshot_path(server_id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error("read_state", e)),
        };

        let state = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        Ok(Some(state))
    }

    fn write(&self, server_id: &str, state: &ServerState) -> Result<()> {
        let json = serde_json::to_vec_pretty(state).map_err(|e| StoreError::Serialize {
            reason: e.to_string(),
        })?;
        atomic_replace(&self.snapshot_path(server_id), &json)
    }
}

/// Name the durable resource for a server id under a root directory
///
/// Exposed for operational tooling that needs to locate snapshots without
/// constructing a repository.
pub fn snapshot_path(root: &Path, server_id: &str) -> PathBuf {
    root.join(format!("{server_id}.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ConfigItem, ServerState};
    use tempfile::TempDir;

    fn setup() -> (FileStateRepository, TempDir) {
        let dir = TempDir::new().unwrap();
        let repo = FileStateRepository::new(dir.path());
        (repo, dir)
    }

    #[test]
    fn test_read_absent_is_none() {
        let (repo, _dir) = setup();
        assert!(repo.read("srv-1").unwrap().is_none());
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let (repo, _dir) = setup();

        let mut state = ServerState::new("srv-1");
        state
            .configuration
            .add_item(ConfigItem::string("TASKGATE_MODE", "managed"));
        repo.write("srv-1", &state).unwrap();

        let loaded = repo.read("srv-1").unwrap().unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_one_resource_per_server_id() {
        let (repo, dir) = setup();

        repo.write("srv-1", &ServerState::new("srv-1")).unwrap();
        repo.write("srv-2", &ServerState::new("srv-2")).unwrap();

        assert!(dir.path().join("srv-1.json").exists());
        assert!(dir.path().join("srv-2.json").exists());
        assert_eq!(repo.read("srv-1").unwrap().unwrap().server_id, "srv-1");
    }

    #[test]
    fn test_corrupt_snapshot_is_an_error_not_none() {
        let (repo, dir) = setup();
        std::fs::write(dir.path().join("srv-1.json"), b"not json {").unwrap();

        let result = repo.read("srv-1");
        match result {
            Err(StoreError::Corrupt { path, .. }) => {
                assert!(path.ends_with("srv-1.json"));
            }
            other => panic!("Expected Corrupt, got {other:?}"),
        }
    }

    #[test]
    fn test_snapshot_path_naming() {
        let path = snapshot_path(Path::new("/var/lib/taskgate"), "srv-9");
        assert_eq!(path, PathBuf::from("/var/lib/taskgate/srv-9.json"));
    }
}
