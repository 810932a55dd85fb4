//! Relative keys shared by the remote file set and the local tree.
//!
//! Both sides use decoded names joined with `/`, independent of the host's
//! path separator, so membership is a plain string comparison.

use std::path::{Component, Path};

/// Joins a relative directory prefix (possibly empty) and a decoded name.
pub fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}

/// Key of `path` relative to `root`, or `None` when `path` is not under
/// `root`, is the root itself, or has a component that is not valid UTF-8.
pub fn local_relative_key(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in rel.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
