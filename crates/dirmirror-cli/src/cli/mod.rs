//! CLI for dirmirror.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dirmirror_core::config::{self, HttpConfig, MirrorConfig};
use std::path::PathBuf;

use commands::{run_list, run_sync, SyncArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dirmirror")]
#[command(about = "Mirror an HTTP directory listing onto a local directory", long_about = None)]
pub struct Cli {
    /// Log to ~/.local/state/dirmirror/dirmirror.log instead of stdout.
    #[arg(long, global = true)]
    pub log_file: bool,

    /// Config file to use instead of ~/.config/dirmirror/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Transport overrides shared by commands that talk to the server.
#[derive(Debug, Clone, Default, Args)]
pub struct HttpArgs {
    /// Verify TLS certificates (the default configuration accepts any certificate).
    #[arg(long)]
    pub verify_tls: bool,

    /// Connect timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub connect_timeout: Option<u64>,

    /// Timeout for each whole request in seconds (default: none).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl HttpArgs {
    /// Applies command-line overrides on top of the config file values.
    pub fn apply(&self, cfg: &mut HttpConfig) {
        if self.verify_tls {
            cfg.accept_invalid_certs = false;
        }
        if let Some(secs) = self.connect_timeout {
            cfg.connect_timeout_secs = Some(secs);
        }
        if let Some(secs) = self.timeout {
            cfg.timeout_secs = Some(secs);
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Mirror the remote directory, then delete local files no longer listed.
    Sync {
        /// Remote directory URL (defaults to remote_url from the config file).
        url: Option<String>,

        /// Local root directory (defaults to local_root from the config file).
        dest: Option<PathBuf>,

        #[command(flatten)]
        http: HttpArgs,

        /// Do not delete anything locally.
        #[arg(long)]
        no_prune: bool,

        /// Report what pruning would delete without deleting it.
        #[arg(long)]
        dry_run: bool,

        /// Prune even if some remote directory could not be listed.
        #[arg(long)]
        prune_partial: bool,
    },

    /// Fetch one listing and print the entries dirmirror would act on.
    List {
        /// Remote directory URL.
        url: String,

        #[command(flatten)]
        http: HttpArgs,
    },
}

impl Cli {
    fn load_config(&self) -> Result<MirrorConfig> {
        let cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn run(self) -> Result<()> {
        let cfg = self.load_config()?;

        match self.command {
            CliCommand::Sync {
                url,
                dest,
                http,
                no_prune,
                dry_run,
                prune_partial,
            } => run_sync(
                &cfg,
                SyncArgs {
                    url,
                    dest,
                    http,
                    no_prune,
                    dry_run,
                    prune_partial,
                },
            )?,
            CliCommand::List { url, http } => run_list(&cfg, &url, &http)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
