//! Atomic write primitive
//!
//! Snapshot writes go to a temporary file beside the target and are renamed
//! into place, so a writer that dies partway never leaves a resource that
//! `read` would accept as a complete state.

use crate::errors::{io_error, Result};
use std::fs;
use std::path::Path;

/// Atomically replace `target_path` with `content`
///
/// The temporary file lives in the target's directory (rename is only
/// atomic within one filesystem) and carries a leading dot so it can never
/// collide with a `<server_id>.json` snapshot name.
///
/// # Errors
///
/// Returns `Io` when the directory, temp write, or rename fails; on failure
/// the target is either untouched or already fully replaced.
pub fn atomic_replace(target_path: &Path, content: &[u8]) -> Result<()> {
    let parent = target_path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(dir) = parent {
        fs::create_dir_all(dir).map_err(|e| io_error("create_state_dir", e))?;
    }

    let file_name = target_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            io_error(
                "resolve_state_path",
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid snapshot path {}", target_path.display()),
                ),
            )
        })?;
    let temp_path = target_path.with_file_name(format!(".{file_name}.tmp"));

    fs::write(&temp_path, content).map_err(|e| io_error("write_state_temp", e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_state_temp", e))?;

    Ok(())
}
