//! Stylesheet matching and cache-busting.
//!
//! A file event carries a server-relative path like `css/style.css`. A link
//! element matches when its href, stripped of any existing query string,
//! ends with that path. Matching links get the query replaced with a fresh
//! timestamp so the browser bypasses its cache.

/// Whether a changed file is one we can refresh in place.
pub fn is_css_path(path: &str) -> bool {
    path.ends_with(".css")
}

/// Drop the query string from an href, if any.
pub fn strip_query(href: &str) -> &str {
    match href.find('?') {
        Some(pos) => &href[..pos],
        None => href,
    }
}

/// Suffix-match a link href against a changed file path, ignoring the query
/// string. The href is usually an absolute resolved URL while the event
/// carries a relative path, hence suffix rather than equality.
pub fn matches_stylesheet(href: &str, file: &str) -> bool {
    !file.is_empty() && strip_query(href).ends_with(file)
}

/// Issues strictly increasing cache-busting stamps.
///
/// `Date.now()` can repeat within a millisecond; tracking the last issued
/// stamp keeps every rewritten href distinct from the previous one.
#[derive(Debug, Clone, Default)]
pub struct CacheBuster {
    last: u64,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next stamp: the current time, bumped past the previous stamp when the
    /// clock has not advanced.
    pub fn next(&mut self, now_ms: u64) -> u64 {
        self.last = now_ms.max(self.last + 1);
        self.last
    }

    /// Rewrite an href with a fresh cache-busting query parameter.
    pub fn bust(&mut self, href: &str, now_ms: u64) -> String {
        format!("{}?{}", strip_query(href), self.next(now_ms))
    }
}
