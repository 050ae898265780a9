//! Filesystem helpers shared by every stage that writes output.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{HeritageError, Result};

/// Create the parent directory of `path` if it does not exist yet.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(|e| HeritageError::io(parent, e))
        }
        _ => Ok(()),
    }
}

/// Confirm that a just-written artifact is on disk and non-empty.
///
/// Returns the file size in bytes.
pub fn verify_written(path: &Path) -> Result<u64> {
    let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
    if size == 0 {
        return Err(HeritageError::WriteVerification {
            path: path.to_path_buf(),
        });
    }
    debug!("verified {} ({} bytes)", path.display(), size);
    Ok(size)
}
