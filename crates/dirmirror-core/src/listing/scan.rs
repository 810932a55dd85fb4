//! Heuristic href scan over autoindex markup.
//!
//! This is a pattern match, not an HTML parser. It finds `<a href="...">`
//! anchors case-insensitively and ignores document structure, so markup that
//! is not Apache-style autoindex may yield nonsense tokens.

use regex::Regex;
use std::sync::OnceLock;

use crate::url_model::unescape_html;

fn href_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)<a\s+href="([^"]+)""#).expect("valid href regex"))
}

/// Returns every anchor `href` value in document order, with HTML entities
/// unescaped. Percent escapes are left untouched.
pub fn scan_hrefs(html: &str) -> Vec<String> {
    href_regex()
        .captures_iter(html)
        .map(|cap| unescape_html(&cap[1]))
        .collect()
}
