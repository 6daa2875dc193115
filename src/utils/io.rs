//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read file contents with standardized error handling.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// List the immediate entries of a directory, sorted by file name.
///
/// A listing failure is fatal for the walk, so it maps to `walk.list_failed`.
pub fn list_dir(path: &Path) -> Result<Vec<fs::DirEntry>> {
    let read_dir = fs::read_dir(path)
        .map_err(|e| Error::walk_list_failed(path.display().to_string(), e.to_string()))?;

    let mut entries = read_dir
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| Error::walk_list_failed(path.display().to_string(), e.to_string()))?;

    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Fail with `rename.collision` when `to` already exists (including dangling
/// symlinks).
pub fn ensure_rename_target_free(from: &Path, to: &Path) -> Result<()> {
    if fs::symlink_metadata(to).is_ok() {
        return Err(Error::rename_collision(
            from.display().to_string(),
            to.display().to_string(),
        ));
    }
    Ok(())
}

/// Rename `from` to `to`, refusing to replace an existing target.
pub fn rename_path(from: &Path, to: &Path) -> Result<()> {
    ensure_rename_target_free(from, to)?;

    fs::rename(from, to).map_err(|e| {
        Error::rename_failed(
            from.display().to_string(),
            to.display().to_string(),
            e.to_string(),
        )
    })
}
