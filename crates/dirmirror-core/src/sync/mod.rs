//! Synchronizer: depth-first walk of the remote autoindex tree.
//!
//! Creates local directories, downloads files that are missing locally and
//! records every listed file in a [`RemoteFileSet`] for the pruner. Existing
//! local files are never re-fetched or verified.

mod walk;

use std::path::Path;

use crate::error::MirrorError;
use crate::http::HttpClient;
use crate::remote_set::RemoteFileSet;

/// Counters for one synchronization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Directory listings fetched successfully.
    pub directories: usize,
    /// Files downloaded this run.
    pub downloaded: usize,
    /// Files already present locally.
    pub skipped: usize,
    /// URLs that could not be mirrored: failed downloads, and directories
    /// whose local path is taken by a non-directory.
    pub failed: Vec<String>,
    /// Bytes written by successful downloads.
    pub bytes: u64,
    /// Listing entries refused because their name was unsafe.
    pub rejected: usize,
}

/// Result of [`synchronize`].
#[derive(Debug)]
pub struct SyncOutcome {
    pub remote_files: RemoteFileSet,
    pub report: SyncReport,
    /// Error that stopped the walk (listing failure or local filesystem error).
    pub aborted: Option<MirrorError>,
}

impl SyncOutcome {
    /// True when every directory reachable from the root was listed.
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Mirrors `root_url` (a directory URL ending in `/`) into `local_root`.
///
/// `local_root` must already exist. A listing or filesystem failure anywhere
/// stops the walk; what was downloaded before stays, and the error is
/// returned in [`SyncOutcome::aborted`] together with the partial file set.
pub fn synchronize(client: &HttpClient, root_url: &str, local_root: &Path) -> SyncOutcome {
    let mut walker = walk::Walker::new(client);
    let result = walker.walk_dir(root_url, local_root, "");
    let (remote_files, report) = walker.finish();

    let aborted = match result {
        Ok(()) => None,
        Err(e) => {
            tracing::error!("synchronization error: {}", e);
            Some(e)
        }
    };

    SyncOutcome {
        remote_files,
        report,
        aborted,
    }
}
