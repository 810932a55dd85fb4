//! HTTP transport for listing pages and file downloads.
//!
//! Uses the curl crate (libcurl easy interface). Every request blocks the
//! current thread; the walk issues one request at a time.

use std::cell::RefCell;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::{MirrorError, Result, TransferError};
use crate::storage::PartFile;
use std::path::Path;

/// Transport options applied to every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpOptions {
    /// Accept any TLS certificate (peer and host verification off).
    pub accept_invalid_certs: bool,
    /// Connection phase timeout; `None` leaves libcurl's default.
    pub connect_timeout: Option<Duration>,
    /// Whole-transfer timeout; `None` means no limit.
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        HttpOptions::from(&HttpConfig::default())
    }
}

impl From<&HttpConfig> for HttpOptions {
    fn from(cfg: &HttpConfig) -> Self {
        Self {
            accept_invalid_certs: cfg.accept_invalid_certs,
            connect_timeout: cfg.connect_timeout_secs.map(Duration::from_secs),
            timeout: cfg.timeout_secs.map(Duration::from_secs),
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Blocking HTTP client shared by the whole walk.
#[derive(Debug, Clone, Default)]
pub struct HttpClient {
    opts: HttpOptions,
}

impl HttpClient {
    pub fn new(opts: HttpOptions) -> Self {
        if opts.accept_invalid_certs {
            tracing::warn!(
                "TLS certificate verification is disabled (accept_invalid_certs = true)"
            );
        }
        Self { opts }
    }

    fn easy_for(&self, url: &str) -> std::result::Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        if self.opts.accept_invalid_certs {
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }
        if let Some(t) = self.opts.connect_timeout {
            easy.connect_timeout(t)?;
        }
        if let Some(t) = self.opts.timeout {
            easy.timeout(t)?;
        }
        let agent = self
            .opts
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("dirmirror/{}", env!("CARGO_PKG_VERSION")));
        easy.useragent(&agent)?;
        Ok(easy)
    }

    /// GETs a directory listing and returns its body as text (lossy UTF-8).
    ///
    /// Any transport error or non-2xx status is `RemoteUnavailable`.
    pub fn fetch_listing(&self, url: &str) -> Result<String> {
        let unavailable = |source: TransferError| MirrorError::RemoteUnavailable {
            url: url.to_string(),
            source,
        };

        let mut body: Vec<u8> = Vec::new();
        let mut easy = self.easy_for(url).map_err(|e| unavailable(e.into()))?;
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(|e| unavailable(e.into()))?;
            transfer.perform().map_err(|e| unavailable(e.into()))?;
        }

        let code = easy.response_code().map_err(|e| unavailable(e.into()))?;
        if !(200..300).contains(&code) {
            return Err(unavailable(TransferError::Http(code)));
        }
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// GETs `url` into `target` through a hidden temp file and returns the byte count.
    ///
    /// Transport, HTTP and write errors are `DownloadFailed`; the part file is
    /// removed in every failure case and `target` is left untouched.
    pub fn download(&self, url: &str, target: &Path) -> Result<u64> {
        let failed = |source: TransferError| MirrorError::DownloadFailed {
            url: url.to_string(),
            source,
        };

        let part = PartFile::create(target).map_err(|e| failed(TransferError::Storage(e)))?;
        let part = RefCell::new(part);
        let mut write_error: Option<std::io::Error> = None;

        let outcome = self.transfer_into(url, &part, &mut write_error);
        let part = part.into_inner();

        let err = match (write_error, outcome) {
            (Some(e), _) => Some(TransferError::Storage(e)),
            (None, Err(e)) => Some(e),
            (None, Ok(code)) if !(200..300).contains(&code) => Some(TransferError::Http(code)),
            (None, Ok(_)) => None,
        };
        if let Some(err) = err {
            if let Err(e) = part.discard() {
                tracing::warn!("could not remove partial download for {}: {}", url, e);
            }
            return Err(failed(err));
        }

        part.finalize()
            .map_err(|e| failed(TransferError::Storage(e)))
    }

    /// Runs the GET, streaming the body into `part`. Returns the HTTP status.
    fn transfer_into(
        &self,
        url: &str,
        part: &RefCell<PartFile>,
        write_error: &mut Option<std::io::Error>,
    ) -> std::result::Result<u32, TransferError> {
        let mut easy = self.easy_for(url)?;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| match part.borrow_mut().write_all(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    *write_error = Some(e);
                    Ok(0) // abort transfer
                }
            })?;
            transfer.perform()
        };
        // A write error makes curl report its own failure; the caller prefers the io error.
        if write_error.is_none() {
            performed?;
        }
        Ok(easy.response_code()?)
    }
}
