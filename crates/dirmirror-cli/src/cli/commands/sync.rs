//! `dirmirror sync` – one mirror run: synchronize, then prune.

use anyhow::{Context, Result};
use dirmirror_core::config::MirrorConfig;
use dirmirror_core::http::HttpOptions;
use dirmirror_core::mirror::{self, MirrorOptions, MirrorReport, PruneOptions, PruneSkipped};
use std::path::PathBuf;

use crate::cli::HttpArgs;

#[derive(Debug, Clone, Default)]
pub struct SyncArgs {
    pub url: Option<String>,
    pub dest: Option<PathBuf>,
    pub http: HttpArgs,
    pub no_prune: bool,
    pub dry_run: bool,
    pub prune_partial: bool,
}

/// Merges config file values with command-line arguments (arguments win).
pub fn build_options(cfg: &MirrorConfig, args: SyncArgs) -> Result<MirrorOptions> {
    let remote_url = args
        .url
        .or_else(|| cfg.remote_url.clone())
        .context("no remote URL: pass one or set remote_url in the config file")?;
    let local_root = args
        .dest
        .or_else(|| cfg.local_root.clone())
        .context("no local directory: pass one or set local_root in the config file")?;

    let mut http = cfg.http.clone();
    args.http.apply(&mut http);

    let mut prune = PruneOptions::from(&cfg.prune);
    if args.no_prune {
        prune.enabled = false;
    }
    if args.prune_partial {
        prune.after_partial_sync = true;
    }
    prune.dry_run = args.dry_run;

    Ok(MirrorOptions {
        remote_url,
        local_root,
        http: HttpOptions::from(&http),
        prune,
    })
}

pub fn run_sync(cfg: &MirrorConfig, args: SyncArgs) -> Result<()> {
    let opts = build_options(cfg, args)?;
    println!("=== dirmirror: {} -> {} ===", opts.remote_url, opts.local_root.display());
    let report = mirror::run(&opts)?;
    print_summary(&report);
    Ok(())
}

/// "y" or "ies" for director-/entr- counts.
fn ies(n: usize) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}

fn print_summary(report: &MirrorReport) {
    let s = &report.sync;
    println!(
        "Listed {} director{}, {} remote file(s)",
        s.directories,
        ies(s.directories),
        report.remote_files
    );
    println!(
        "{} downloaded ({} bytes), {} already present, {} failed",
        s.downloaded,
        s.bytes,
        s.skipped,
        s.failed.len()
    );
    for url in &s.failed {
        println!("  failed: {}", url);
    }
    if s.rejected > 0 {
        println!("Ignored {} entr{} with unsafe names", s.rejected, ies(s.rejected));
    }
    if let Some(err) = &report.aborted {
        println!("Remote walk stopped early: {}", err);
    }
    match &report.prune {
        Ok(p) if p.dry_run => println!(
            "Prune (dry run): would delete {} file(s) and {} empty director{}",
            p.files_deleted,
            p.dirs_removed,
            ies(p.dirs_removed)
        ),
        Ok(p) => println!(
            "Pruned {} file(s) and {} empty director{}",
            p.files_deleted,
            p.dirs_removed,
            ies(p.dirs_removed)
        ),
        Err(PruneSkipped::Disabled) => println!("Prune disabled"),
        Err(PruneSkipped::IncompleteSync) => {
            println!("Prune skipped: remote walk incomplete (use --prune-partial to force)")
        }
    }
    println!("=== done ===");
}
