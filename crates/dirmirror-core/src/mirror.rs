//! One mirror run: synchronize, then prune when it is safe to.

use std::fs;
use std::path::PathBuf;

use crate::config::{MirrorConfig, PruneConfig};
use crate::error::{MirrorError, Result};
use crate::http::{HttpClient, HttpOptions};
use crate::prune::{self, PruneReport};
use crate::sync::{self, SyncReport};
use crate::url_model::normalize_root_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PruneOptions {
    pub enabled: bool,
    pub after_partial_sync: bool,
    pub dry_run: bool,
}

impl From<&PruneConfig> for PruneOptions {
    fn from(cfg: &PruneConfig) -> Self {
        Self {
            enabled: cfg.enabled,
            after_partial_sync: cfg.after_partial_sync,
            dry_run: false,
        }
    }
}

/// Everything a run needs, after config file and command line are merged.
#[derive(Debug, Clone)]
pub struct MirrorOptions {
    pub remote_url: String,
    pub local_root: PathBuf,
    pub http: HttpOptions,
    pub prune: PruneOptions,
}

impl MirrorOptions {
    pub fn new(remote_url: impl Into<String>, local_root: impl Into<PathBuf>) -> Self {
        Self {
            remote_url: remote_url.into(),
            local_root: local_root.into(),
            http: HttpOptions::default(),
            prune: PruneOptions::from(&PruneConfig::default()),
        }
    }

    /// Options from a config file; `None` if it lacks `remote_url` or `local_root`.
    pub fn from_config(cfg: &MirrorConfig) -> Option<Self> {
        Some(Self {
            remote_url: cfg.remote_url.clone()?,
            local_root: cfg.local_root.clone()?,
            http: HttpOptions::from(&cfg.http),
            prune: PruneOptions::from(&cfg.prune),
        })
    }
}

/// Why pruning did not run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneSkipped {
    Disabled,
    /// The walk was aborted, so the remote file set is incomplete.
    IncompleteSync,
}

#[derive(Debug)]
pub struct MirrorReport {
    pub remote_url: String,
    pub local_root: PathBuf,
    pub sync: SyncReport,
    /// Number of distinct remote files observed.
    pub remote_files: usize,
    pub prune: std::result::Result<PruneReport, PruneSkipped>,
    /// Error that stopped the remote walk early, if any.
    pub aborted: Option<MirrorError>,
}

impl MirrorReport {
    /// True when the walk finished and every download succeeded.
    pub fn is_clean(&self) -> bool {
        self.aborted.is_none() && self.sync.failed.is_empty()
    }
}

/// Runs one synchronization followed by pruning.
///
/// Download failures and an aborted walk are reported in [`MirrorReport`],
/// not returned as errors. `Err` is reserved for an invalid root URL and
/// local filesystem failures outside the walk (creating the root, pruning).
pub fn run(opts: &MirrorOptions) -> Result<MirrorReport> {
    let root_url = normalize_root_url(&opts.remote_url)?;
    let local_root = opts.local_root.clone();
    fs::create_dir_all(&local_root).map_err(|e| MirrorError::fs(&local_root, e))?;

    tracing::info!("mirroring {} into {}", root_url, local_root.display());
    let client = HttpClient::new(opts.http.clone());
    let outcome = sync::synchronize(&client, &root_url, &local_root);

    let prune = if !opts.prune.enabled {
        Err(PruneSkipped::Disabled)
    } else if !outcome.is_complete() && !opts.prune.after_partial_sync {
        tracing::warn!("remote walk incomplete; skipping prune to keep unvisited files");
        Err(PruneSkipped::IncompleteSync)
    } else {
        if outcome.remote_files.is_empty() {
            tracing::warn!("remote tree lists no files; pruning removes every local file");
        }
        Ok(prune::prune(&local_root, &outcome.remote_files, opts.prune.dry_run)?)
    };

    Ok(MirrorReport {
        remote_url: root_url,
        local_root,
        remote_files: outcome.remote_files.len(),
        sync: outcome.report,
        prune,
        aborted: outcome.aborted,
    })
}
