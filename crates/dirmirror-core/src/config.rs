use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// HTTP transport settings (`[http]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Accept any TLS certificate. On by default so self-signed mirrors work;
    /// set to false to enforce certificate validation.
    pub accept_invalid_certs: bool,
    /// Connect timeout in seconds (None = libcurl default).
    pub connect_timeout_secs: Option<u64>,
    /// Whole-request timeout in seconds (None = wait forever).
    pub timeout_secs: Option<u64>,
    /// User-Agent header; defaults to `dirmirror/<version>`.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: true,
            connect_timeout_secs: Some(30),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

/// Pruning settings (`[prune]` section in config.toml).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PruneConfig {
    /// Delete local files that are not listed remotely.
    pub enabled: bool,
    /// Also prune when the remote walk was aborted by a listing failure.
    /// The remote file set is incomplete then, so files under the failed
    /// directory would be deleted.
    pub after_partial_sync: bool,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            after_partial_sync: false,
        }
    }
}

/// Global configuration loaded from `~/.config/dirmirror/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Remote directory URL (Apache-style autoindex). May be given on the command line instead.
    #[serde(default)]
    pub remote_url: Option<String>,
    /// Local root directory. May be given on the command line instead.
    #[serde(default)]
    pub local_root: Option<PathBuf>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub prune: PruneConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dirmirror")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MirrorConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = MirrorConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit file; it must exist.
pub fn load_from_path(path: &Path) -> Result<MirrorConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: MirrorConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
