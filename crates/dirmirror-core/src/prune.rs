//! Pruner: remove local content that the remote listing no longer has.
//!
//! Runs after a synchronization pass. Files are compared by their `/`-joined
//! relative key; directories left empty afterwards are removed children
//! first, so nested chains of empty directories disappear in one pass.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MirrorError, Result};
use crate::remote_set::RemoteFileSet;
use crate::url_model::local_relative_key;

/// Counters for one prune pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    pub files_deleted: usize,
    pub dirs_removed: usize,
    /// Nothing was deleted; counts describe what would have been.
    pub dry_run: bool,
}

/// Deletes every file under `local_root` whose relative key is not in
/// `remote_files`, then removes empty directories (never `local_root` itself).
///
/// With `dry_run`, logs and counts the same decisions without touching disk.
pub fn prune(
    local_root: &Path,
    remote_files: &RemoteFileSet,
    dry_run: bool,
) -> Result<PruneReport> {
    let mut report = PruneReport {
        dry_run,
        ..PruneReport::default()
    };
    let mut gone: HashSet<PathBuf> = HashSet::new();

    for path in stale_files(local_root, remote_files)? {
        if dry_run {
            tracing::info!("delete (dry run): {}", path.display());
        } else {
            tracing::info!("delete: {}", path.display());
            fs::remove_file(&path).map_err(|e| MirrorError::fs(&path, e))?;
        }
        report.files_deleted += 1;
        gone.insert(path);
    }

    for entry in WalkDir::new(local_root).min_depth(1).contents_first(true) {
        let entry = entry.map_err(walk_error)?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let dir = entry.path();
        if !is_empty_after(dir, &gone)? {
            continue;
        }
        if dry_run {
            tracing::info!("delete empty directory (dry run): {}", dir.display());
        } else {
            tracing::info!("delete empty directory: {}", dir.display());
            fs::remove_dir(dir).map_err(|e| MirrorError::fs(dir, e))?;
        }
        report.dirs_removed += 1;
        gone.insert(dir.to_path_buf());
    }

    Ok(report)
}

/// Files (anything that is not a directory) under `local_root` with no
/// remote counterpart.
fn stale_files(local_root: &Path, remote_files: &RemoteFileSet) -> Result<Vec<PathBuf>> {
    let mut stale = Vec::new();
    for entry in WalkDir::new(local_root).min_depth(1) {
        let entry = entry.map_err(walk_error)?;
        if entry.file_type().is_dir() {
            continue;
        }
        let keep = local_relative_key(local_root, entry.path())
            .map(|key| remote_files.contains(&key))
            .unwrap_or(false);
        if !keep {
            stale.push(entry.into_path());
        }
    }
    Ok(stale)
}

/// True if every entry of `dir` has been (or, in a dry run, would have been) removed.
fn is_empty_after(dir: &Path, gone: &HashSet<PathBuf>) -> Result<bool> {
    let entries = fs::read_dir(dir).map_err(|e| MirrorError::fs(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| MirrorError::fs(dir, e))?;
        if !gone.contains(&entry.path()) {
            return Ok(false);
        }
    }
    Ok(true)
}

fn walk_error(e: walkdir::Error) -> MirrorError {
    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
    let source = e
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    MirrorError::fs(path, source)
}
