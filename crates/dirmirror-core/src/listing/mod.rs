//! Autoindex listing parsing: raw href tokens to classified child entries.

mod scan;

pub use scan::scan_hrefs;

use crate::url_model::percent_decode;

/// Kind of a listing entry, decided only by the raw token's trailing `/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

/// One child of a remote directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Token as it appeared in the `href` (still percent-encoded).
    pub href: String,
    /// Decoded name without the trailing `/`; used for local paths and keys.
    pub name: String,
    pub kind: EntryKind,
}

/// Outcome of classifying one href token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Child(Entry),
    /// Sort link, absolute link or parent link.
    Ignored,
    /// Decoded name would escape or alias the local directory.
    Unsafe { href: String, name: String },
}

/// True for tokens that are never children: `?` sort links, `/` absolute
/// links and the `../` parent link.
pub fn is_navigation_link(href: &str) -> bool {
    href.starts_with('?') || href.starts_with('/') || href == "../"
}

/// Classifies a single href token.
pub fn classify(href: &str) -> Classified {
    if is_navigation_link(href) {
        return Classified::Ignored;
    }
    let (kind, trimmed) = match href.strip_suffix('/') {
        Some(rest) => (EntryKind::Directory, rest.trim_end_matches('/')),
        None => (EntryKind::File, href),
    };
    let name = percent_decode(trimmed);
    if !is_safe_name(&name) {
        return Classified::Unsafe {
            href: href.to_string(),
            name,
        };
    }
    Classified::Child(Entry {
        href: href.to_string(),
        name,
        kind,
    })
}

fn is_safe_name(name: &str) -> bool {
    !(name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0'))
}

/// Scans a listing page and returns every classified token in page order.
pub fn parse_listing(html: &str) -> Vec<Classified> {
    scan_hrefs(html).iter().map(|href| classify(href)).collect()
}
