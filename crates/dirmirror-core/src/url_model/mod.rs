//! URL modeling for the remote tree.
//!
//! Validates the root URL, builds child URLs from raw listing tokens, and
//! turns tokens into decoded names and `/`-joined relative keys shared by the
//! synchronizer and the pruner.

mod decode;
mod relpath;

pub use decode::{percent_decode, unescape_html};
pub use relpath::{join_relative, local_relative_key};

use crate::error::{MirrorError, Result};

/// Validates a remote root URL and makes sure it names a directory.
///
/// The URL must parse and use `http` or `https`. A trailing `/` is appended
/// when missing so that child tokens can be concatenated onto it.
///
/// # Examples
///
/// - `normalize_root_url("https://host/mp3")` → `"https://host/mp3/"`
/// - `normalize_root_url("ftp://host/")` → `Err(InvalidUrl)`
pub fn normalize_root_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let parsed = url::Url::parse(raw).map_err(|e| MirrorError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(MirrorError::InvalidUrl {
                url: raw.to_string(),
                reason: format!("unsupported scheme {:?}", other),
            })
        }
    }
    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(MirrorError::InvalidUrl {
            url: raw.to_string(),
            reason: "query strings and fragments are not allowed".to_string(),
        });
    }

    let mut s = parsed.to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    Ok(s)
}

/// URL of a child entry: the parent directory URL followed by the raw
/// (still encoded) token from the listing.
pub fn child_url(parent: &str, raw_token: &str) -> String {
    format!("{}{}", parent, raw_token)
}
