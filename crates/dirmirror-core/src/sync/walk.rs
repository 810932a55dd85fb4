//! Recursive directory walk.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use super::SyncReport;
use crate::error::{MirrorError, Result};
use crate::http::HttpClient;
use crate::listing::{self, Classified, Entry, EntryKind};
use crate::remote_set::RemoteFileSet;
use crate::url_model::{child_url, join_relative};

pub(super) struct Walker<'a> {
    client: &'a HttpClient,
    remote_files: RemoteFileSet,
    report: SyncReport,
    visited: HashSet<String>,
}

impl<'a> Walker<'a> {
    pub(super) fn new(client: &'a HttpClient) -> Self {
        Self {
            client,
            remote_files: RemoteFileSet::new(),
            report: SyncReport::default(),
            visited: HashSet::new(),
        }
    }

    pub(super) fn finish(self) -> (RemoteFileSet, SyncReport) {
        (self.remote_files, self.report)
    }

    /// Lists `url` and mirrors its children into `local_dir`. `rel_prefix` is
    /// the decoded path of this directory relative to the remote root.
    pub(super) fn walk_dir(
        &mut self,
        url: &str,
        local_dir: &Path,
        rel_prefix: &str,
    ) -> Result<()> {
        if !self.visited.insert(url.to_string()) {
            tracing::debug!("already walked {}", url);
            return Ok(());
        }

        tracing::info!("sync {}", url);
        let html = self.client.fetch_listing(url)?;
        self.report.directories += 1;

        for classified in listing::parse_listing(&html) {
            match classified {
                Classified::Ignored => {}
                Classified::Unsafe { href, name } => {
                    tracing::warn!("ignoring entry {:?} in {}: unsafe name {:?}", href, url, name);
                    self.report.rejected += 1;
                }
                Classified::Child(entry) => {
                    let entry_url = child_url(url, &entry.href);
                    let entry_local = local_dir.join(&entry.name);
                    let entry_rel = join_relative(rel_prefix, &entry.name);
                    match entry.kind {
                        EntryKind::Directory => {
                            if is_non_directory(&entry_local) {
                                // Left unrecorded: pruning removes it and the next
                                // run mirrors the directory.
                                tracing::error!(
                                    "cannot mirror {}: {} exists and is not a directory",
                                    entry_url,
                                    entry_local.display()
                                );
                                self.report.failed.push(entry_url);
                                continue;
                            }
                            fs::create_dir_all(&entry_local)
                                .map_err(|e| MirrorError::fs(&entry_local, e))?;
                            self.walk_dir(&entry_url, &entry_local, &entry_rel)?;
                        }
                        EntryKind::File => {
                            self.sync_file(&entry, &entry_url, &entry_local, entry_rel)
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Records a remote file and downloads it if no local file exists.
    /// Download failures are logged and counted, never propagated.
    fn sync_file(&mut self, entry: &Entry, url: &str, local_path: &Path, rel: String) {
        self.remote_files.insert(rel);

        if local_path.is_file() {
            tracing::info!("skip: already present {}", local_path.display());
            self.report.skipped += 1;
            return;
        }

        tracing::info!("new: downloading {}", url);
        match self.client.download(url, local_path) {
            Ok(bytes) => {
                tracing::info!("ok: downloaded {} ({} bytes)", local_path.display(), bytes);
                self.report.downloaded += 1;
                self.report.bytes += bytes;
            }
            Err(e) => {
                tracing::error!("could not download {}: {}", entry.name, e);
                self.report.failed.push(url.to_string());
            }
        }
    }
}

/// True when something other than a directory (file, symlink, socket) occupies `path`.
fn is_non_directory(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| !meta.is_dir())
        .unwrap_or(false)
}
