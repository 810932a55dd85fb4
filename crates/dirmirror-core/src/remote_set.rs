//! Set of relative file paths observed on the remote side during one walk.

use std::collections::HashSet;

/// Decoded, `/`-joined paths relative to the remote root.
///
/// Filled by the synchronizer for every listed file (downloaded or not) and
/// only read by the pruner afterwards.
#[derive(Debug, Clone, Default)]
pub struct RemoteFileSet {
    paths: HashSet<String>,
}

impl RemoteFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a path; returns false if it was already present.
    pub fn insert(&mut self, rel_path: impl Into<String>) -> bool {
        self.paths.insert(rel_path.into())
    }

    pub fn contains(&self, rel_path: &str) -> bool {
        self.paths.contains(rel_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for RemoteFileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().map(Into::into).collect(),
        }
    }
}
