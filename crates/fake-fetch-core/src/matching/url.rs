//! URL identity matching.

/// Exact URL comparison.
///
/// No templates, no trailing-slash folding and no query-string normalization:
/// `/api/users?b=2&a=1` and `/api/users?a=1&b=2` are different URLs.
pub fn url_matches(pattern: &str, url: &str) -> bool {
    pattern == url
}
