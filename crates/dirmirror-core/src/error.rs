//! Error types for a mirror run.
//!
//! Failures are classified so callers can tell a missing listing from a
//! failed download or a local filesystem problem.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MirrorError>;

/// Why a single HTTP transfer failed (curl failure, HTTP status or local write).
#[derive(Debug, Error)]
pub enum TransferError {
    /// Curl reported an error (timeout, connection, TLS, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// HTTP response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the response body to disk failed.
    #[error("storage: {0}")]
    Storage(#[source] io::Error),
}

#[derive(Debug, Error)]
pub enum MirrorError {
    /// A directory listing could not be fetched; the walk below it is abandoned.
    #[error("remote listing unavailable: {url}: {source}")]
    RemoteUnavailable {
        url: String,
        #[source]
        source: TransferError,
    },

    /// A single file could not be downloaded; the walk continues.
    #[error("download failed: {url}: {source}")]
    DownloadFailed {
        url: String,
        #[source]
        source: TransferError,
    },

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid remote URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl MirrorError {
    pub(crate) fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        MirrorError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_unavailable_names_url_and_status() {
        let e = MirrorError::RemoteUnavailable {
            url: "https://example.com/mp3/".to_string(),
            source: TransferError::Http(503),
        };
        assert_eq!(
            e.to_string(),
            "remote listing unavailable: https://example.com/mp3/: HTTP 503"
        );
    }

    #[test]
    fn filesystem_error_names_path() {
        let e = MirrorError::fs(
            "/tmp/mirror/a.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = e.to_string();
        assert!(msg.starts_with("filesystem error at /tmp/mirror/a.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn download_failed_keeps_storage_source() {
        let e = MirrorError::DownloadFailed {
            url: "http://h/x.bin".to_string(),
            source: TransferError::Storage(io::Error::new(io::ErrorKind::Other, "disk full")),
        };
        let source = std::error::Error::source(&e).expect("has source");
        assert_eq!(source.to_string(), "storage: disk full");
    }
}
